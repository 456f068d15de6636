//! # Authentication Configuration Module
//!
//! 벤더 인증에 쓰이는 JWT 토큰과 인증 쿠키 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_DAYS="90"
//! export COOKIE_SECURE="true"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{CookieConfig, JwtConfig};
//!
//! let secret = JwtConfig::secret();
//! let cookie_name = CookieConfig::name();
//! ```

use std::env;
use crate::config::data_config::Environment;

/// JWT 토큰 설정
///
/// 벤더 로그인 시 발급되는 HS256 토큰의 서명 키와 만료 기간입니다.
/// 리프레시 토큰은 발급하지 않으며, 쿠키 수명과 토큰 수명이 같습니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 환경 변수가 설정되지 않은 경우 개발용 기본값을 사용하며 경고 로그를 남깁니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "vendor-dev-secret-key".to_string()
            })
    }

    /// 토큰 만료 기간(일). 기본값: 90일
    pub fn expiration_days() -> i64 {
        env::var("JWT_EXPIRATION_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(90)
    }

    /// 토큰 발급자(`iss`)
    pub fn issuer() -> String {
        env::var("JWT_ISSUER").unwrap_or_else(|_| "vendor-backoffice".to_string())
    }
}

/// 인증 쿠키 설정
///
/// | 속성 | 값 |
/// |------|----|
/// | 이름 | `vendor_token` |
/// | HttpOnly | 항상 |
/// | Secure | `COOKIE_SECURE`, 미설정 시 로컬 환경이 아니면 `true` |
/// | SameSite | Lax |
/// | Path | `/` |
/// | Max-Age | [`JwtConfig::expiration_days`] |
pub struct CookieConfig;

impl CookieConfig {
    pub const NAME: &'static str = "vendor_token";

    pub fn name() -> &'static str {
        Self::NAME
    }

    pub fn secure() -> bool {
        match env::var("COOKIE_SECURE") {
            Ok(raw) => Self::parse_flag(&raw).unwrap_or(true),
            Err(_) => Self::secure_for_env(&Environment::current()),
        }
    }

    pub fn secure_for_env(env: &Environment) -> bool {
        !env.is_local()
    }

    pub fn max_age_days() -> i64 {
        JwtConfig::expiration_days()
    }

    fn parse_flag(raw: &str) -> Option<bool> {
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_secure_per_environment() {
        assert!(!CookieConfig::secure_for_env(&Environment::Development));
        assert!(!CookieConfig::secure_for_env(&Environment::Test));
        assert!(CookieConfig::secure_for_env(&Environment::Staging));
        assert!(CookieConfig::secure_for_env(&Environment::Production));
    }

    #[test]
    fn test_cookie_flag_parsing() {
        assert_eq!(CookieConfig::parse_flag("TRUE"), Some(true));
        assert_eq!(CookieConfig::parse_flag(" 0 "), Some(false));
        assert_eq!(CookieConfig::parse_flag("maybe"), None);
    }

    #[test]
    fn test_jwt_defaults() {
        if env::var("JWT_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::expiration_days(), 90);
            assert_eq!(CookieConfig::max_age_days(), 90);
        }
        assert_eq!(CookieConfig::name(), "vendor_token");
    }
}
