//! 벤더 인증 서비스 모듈
//!
//! - [`TokenService`] - HS256 JWT 발급/검증
//! - [`VendorAuthService`] - 가입, 로그인, 인증 쿠키 생성
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenService, VendorAuthService};
//!
//! let session = VendorAuthService::instance()?.login(request).await?;
//! let claims = TokenService::instance()?.verify_token(&session.token.token)?;
//! ```

pub mod token_service;
pub mod vendor_auth_service;

pub use token_service::*;
pub use vendor_auth_service::*;
