//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 [`ServiceLocator`](crate::core::registry::ServiceLocator)에 싱글톤으로
//! 캐시되며, 필요한 리포지토리와 다른 서비스를 생성 시점에 주입받습니다.
//!
//! # Modules
//!
//! - [`auth`] - 토큰 발급/검증, 가입/로그인
//! - [`vendors`] - 벤더 프로필과 스냅샷
//! - [`catalog`] - 카테고리, 서브카테고리, 상품
//! - [`coupons`] - 쿠폰
//! - [`orders`] - 주문 조회와 라인 아이템 상태 변경
//! - [`dashboard`] - 대시보드 요약과 분석
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::catalog::CategoryService;
//!
//! let categories = CategoryService::instance()?.get_all().await?;
//! ```

pub mod auth;
pub mod vendors;
pub mod catalog;
pub mod coupons;
pub mod orders;
pub mod dashboard;
