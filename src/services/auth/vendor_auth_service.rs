//! # 벤더 인증 서비스
//!
//! 가입과 로그인을 처리하고 `vendor_token` 인증 쿠키를 만듭니다.
//!
//! ```text
//! signup ─┬─ 이메일 중복 확인 (409)
//!         ├─ bcrypt 해시 (PasswordConfig::bcrypt_cost)
//!         ├─ 미승인 벤더 저장
//!         └─ 토큰 발급 → 쿠키
//!
//! login ──┬─ 빈 필드 (400)
//!         ├─ 이메일/비밀번호 불일치 (401, 단일 메시지)
//!         └─ 토큰 발급 → 쿠키
//! ```

use std::sync::Arc;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use bcrypt::{hash, verify};
use crate::config::{CookieConfig, PasswordConfig};
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::dto::vendors::{VendorLoginRequest, VendorResponse, VendorSignupRequest};
use crate::domain::entities::vendors::Vendor;
use crate::domain::models::token::IssuedToken;
use crate::repositories::vendors::VendorRepository;
use crate::services::auth::TokenService;

pub const FILL_ALL_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// 가입/로그인 결과
#[derive(Debug, Clone)]
pub struct VendorSession {
    pub vendor: VendorResponse,
    pub token: IssuedToken,
}

/// 인증 쿠키를 만듭니다.
pub fn session_cookie(token: &str, secure: bool, max_age_days: i64) -> Cookie<'static> {
    Cookie::build(CookieConfig::NAME, token.to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(max_age_days))
        .finish()
}

/// 로그아웃용 만료 쿠키
pub fn expired_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie("", secure, 0);
    cookie.make_removal();
    cookie
}

/// 이메일은 앞뒤 공백을 제거하고 소문자로 저장/비교합니다.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct VendorAuthService {
    vendor_repo: Arc<VendorRepository>,
    token_service: Arc<TokenService>,
}

impl VendorAuthService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                vendor_repo: VendorRepository::instance()?,
                token_service: TokenService::instance()?,
            })
        })
    }

    /// 벤더 가입
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 입력 형식 오류
    /// * `AppError::ConflictError` - 이미 가입된 이메일
    /// * `AppError::InternalError` - 해싱/토큰 생성 실패
    pub async fn signup(&self, request: VendorSignupRequest) -> AppResult<VendorSession> {
        let start_time = std::time::Instant::now();
        let email = normalize_email(&request.email);

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let vendor = Vendor::new(
            request.name.trim().to_string(),
            email,
            password_hash,
            request.address.trim().to_string(),
            request.phone_number,
            request.zip_code,
            request.description,
        );

        let created = self.vendor_repo.create(vendor).await?;
        let vendor_id = created
            .id
            .ok_or_else(|| AppError::InternalError("Vendor has no id after insert".to_string()))?;
        let token = self.token_service.issue_token(&vendor_id)?;

        log::info!("✅ Vendor registered: {} ({:?})", vendor_id, start_time.elapsed());

        Ok(VendorSession {
            vendor: VendorResponse::from(created),
            token,
        })
    }

    /// 벤더 로그인
    ///
    /// 알 수 없는 이메일과 틀린 비밀번호는 같은 메시지로 거부합니다.
    pub async fn login(&self, request: VendorLoginRequest) -> AppResult<VendorSession> {
        let email = normalize_email(&request.email);

        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(FILL_ALL_FIELDS_MESSAGE.to_string()));
        }

        let vendor = match self.vendor_repo.find_by_email(&email).await? {
            Some(vendor) => vendor,
            None => {
                log::warn!("Login failed: unknown email {}", email);
                return Err(AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string()));
            }
        };

        let matches = verify(&request.password, &vendor.password)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;
        if !matches {
            log::warn!("Login failed: wrong password for {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string()));
        }

        let vendor_id = vendor
            .id
            .ok_or_else(|| AppError::InternalError("Stored vendor has no id".to_string()))?;
        let token = self.token_service.issue_token(&vendor_id)?;

        log::info!("🔑 Vendor logged in: {}", vendor_id);

        Ok(VendorSession {
            vendor: VendorResponse::from(vendor),
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc.def", true, 90);

        assert_eq!(cookie.name(), "vendor_token");
        assert_eq!(cookie.value(), "abc.def");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(CookieDuration::days(90)));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_cookie(false);

        assert_eq!(cookie.name(), "vendor_token");
        assert!(cookie.value().is_empty());
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Loom@Example.COM "), "loom@example.com");
        assert_eq!(normalize_email("   "), "");
    }
}
