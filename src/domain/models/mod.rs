//! # Domain Models Module
//!
//! 컬렉션에 저장되지 않는 도메인 모델입니다.
//!
//! - [`auth`] - 인증 모드와 요청에 붙는 [`AuthenticatedVendor`]
//! - [`token`] - 벤더 세션 JWT 클레임
//! - [`analytics`] - 대시보드 매출 요약, 월별/사이즈/인기 상품 집계

pub mod analytics;
pub mod auth;
pub mod token;

pub use analytics::*;
pub use auth::*;
pub use token::*;
