//! Catalog Entity Module
//!
//! 카테고리, 서브카테고리, 상품(색상/사이즈 변형 포함) 엔티티입니다.

pub mod category;
pub mod product;

pub use category::*;
pub use product::*;
