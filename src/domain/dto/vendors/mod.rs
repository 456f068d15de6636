//! 벤더 인증/프로필 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
