//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 담당합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `vendor_token` 쿠키 또는 Bearer 토큰 검증
//! - 벤더 정보를 request extension에 저장
//! - 필수/선택/게스트 전용 모드 지원
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1/vendor/auth")
//!             .wrap(AuthMiddleware::guest_only()) // 로그인 상태면 거부
//!             .service(login)
//!     )
//!     .service(
//!         web::scope("/api/v1/vendor")
//!             .wrap(AuthMiddleware::required())
//!             .service(get_categories)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
