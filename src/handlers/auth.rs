//! Vendor Authentication HTTP Handlers
//!
//! 벤더 가입, 로그인, 로그아웃 엔드포인트입니다.
//! 세션 토큰은 httpOnly `vendor_token` 쿠키로 내려가며, 같은 토큰을
//! 응답 본문에도 실어 Bearer 방식 클라이언트도 쓸 수 있게 합니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/vendor/auth/signup` - 게스트 전용
//! - `POST /api/v1/vendor/auth/login` - 게스트 전용
//! - `POST /api/v1/vendor/logout` - 로그인 필요
use actix_web::{post, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::config::CookieConfig;
use crate::core::errors::AppError;
use crate::domain::dto::vendors::{VendorLoginRequest, VendorSessionResponse, VendorSignupRequest};
use crate::domain::models::auth::AuthenticatedVendor;
use crate::services::auth::vendor_auth_service::{expired_cookie, session_cookie, VendorAuthService, VendorSession};
use crate::utils::json_utils::to_plain_json;

/// 벤더 가입 핸들러
///
/// # Endpoint
/// `POST /api/v1/vendor/auth/signup`
#[post("/signup")]
pub async fn signup(
    payload: web::Json<VendorSignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let session = VendorAuthService::instance()?
        .signup(payload.into_inner())
        .await?;

    session_response(HttpResponse::Created(), session, "Vendor registered successfully")
}

/// 벤더 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/vendor/auth/login`
#[post("/login")]
pub async fn login(
    payload: web::Json<VendorLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let session = VendorAuthService::instance()?
        .login(payload.into_inner())
        .await?;

    session_response(HttpResponse::Ok(), session, "Login successful")
}

/// 로그아웃 핸들러
///
/// 인증 쿠키를 만료시킵니다. 토큰 자체는 서버에 저장하지 않으므로
/// Bearer 클라이언트는 보관 중인 토큰을 버리면 됩니다.
///
/// # Endpoint
/// `POST /api/v1/vendor/logout`
#[post("/logout")]
pub async fn logout(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    log::info!("👋 Vendor logged out: {}", vendor.vendor_id);

    Ok(HttpResponse::Ok()
        .cookie(expired_cookie(CookieConfig::secure()))
        .json(json!({
            "success": true,
            "message": "Logged out successfully"
        })))
}

fn session_response(
    mut builder: actix_web::HttpResponseBuilder,
    session: VendorSession,
    message: &str,
) -> Result<HttpResponse, AppError> {
    let cookie = session_cookie(&session.token.token, CookieConfig::secure(), CookieConfig::max_age_days());
    let body = to_plain_json(&VendorSessionResponse {
        vendor: session.vendor,
        token: session.token.token,
    })?;

    Ok(builder.cookie(cookie).json(json!({
        "success": true,
        "message": message,
        "vendor": body["vendor"],
        "token": body["token"],
        "expiresIn": session.token.expires_in
    })))
}
