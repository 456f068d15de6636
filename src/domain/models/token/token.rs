//! 벤더 세션 JWT 클레임
//!
//! `vendor_token` 쿠키(또는 Bearer 헤더)에 담기는 HS256 토큰의 payload입니다.
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 벤더 ID (ObjectId hex)
/// - `role`: 항상 `"vendor"`
/// - `iat` / `exp`: Unix timestamp (초)
/// - `iss`: 발급자
/// - `jti`: 토큰 고유 ID (UUID v4)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub jti: String,
}

/// 로그인/가입 직후 발급된 토큰
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    /// 토큰(및 쿠키) 유효 기간 (초)
    pub expires_in: i64,
}
