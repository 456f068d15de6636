//! # Core Module
//!
//! 서비스 전역에서 공유하는 기반 기능입니다.
//!
//! - [`errors`] - `AppError`와 HTTP 응답 매핑
//! - [`registry`] - 타입 기반 싱글톤 컨테이너(`ServiceLocator`)와
//!   리포지토리 자동 등록

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
