//! 카탈로그(카테고리, 서브카테고리, 상품) 요청/응답 DTO

pub mod category_request;
pub mod product_request;
pub mod product_response;

pub use category_request::*;
pub use product_request::*;
pub use product_response::*;
