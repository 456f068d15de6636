//! JWT 토큰 관리 서비스 구현
//!
//! 벤더 세션 토큰(HS256)의 생성과 검증을 담당합니다.
//! 리프레시 토큰은 없으며, 토큰 수명은 인증 쿠키 수명과 같습니다.

use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use uuid::Uuid;
use crate::config::JwtConfig;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::entities::vendors::VENDOR_ROLE;
use crate::domain::models::auth::{AuthenticatedVendor, LOGIN_REQUIRED_MESSAGE};
use crate::domain::models::token::{IssuedToken, TokenClaims};

/// JWT 토큰 관리 서비스
///
/// 서명 키와 발급자는 생성 시점의 [`JwtConfig`] 값으로 고정됩니다.
pub struct TokenService {
    secret: String,
    issuer: String,
    expiration_days: i64,
}

impl TokenService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self::new(
                JwtConfig::secret(),
                JwtConfig::issuer(),
                JwtConfig::expiration_days(),
            ))
        })
    }

    pub fn new(secret: String, issuer: String, expiration_days: i64) -> Self {
        Self { secret, issuer, expiration_days }
    }

    /// 벤더 세션 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 인코딩 실패
    pub fn issue_token(&self, vendor_id: &ObjectId) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expiration = now + Duration::days(self.expiration_days);

        let claims = TokenClaims {
            sub: vendor_id.to_hex(),
            role: VENDOR_ROLE.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(format!("JWT encoding failed: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in: self.expiration_days * 24 * 3600,
        })
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 서명 불일치, 형식 오류, 발급자 불일치
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[self.issuer.as_str()]);

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("Session expired, please login again".to_string())
            }
            _ => AppError::AuthenticationError(LOGIN_REQUIRED_MESSAGE.to_string()),
        })
    }

    /// 토큰을 검증하고 요청에 붙일 벤더 정보를 만듭니다.
    pub fn authenticate(&self, token: &str) -> AppResult<AuthenticatedVendor> {
        let claims = self.verify_token(token)?;

        if claims.role != VENDOR_ROLE {
            return Err(AppError::AuthorizationError("Vendor access only".to_string()));
        }

        let vendor_id = ObjectId::parse_str(&claims.sub)
            .map_err(|_| AppError::AuthenticationError(LOGIN_REQUIRED_MESSAGE.to_string()))?;

        Ok(AuthenticatedVendor { vendor_id, role: claims.role })
    }

    /// `Authorization: Bearer {token}`에서 토큰 부분만 꺼냅니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("Invalid authorization header".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret".to_string(), "vendor-backoffice".to_string(), 90)
    }

    #[test]
    fn test_issued_token_carries_vendor_claims() {
        let service = service();
        let vendor_id = ObjectId::new();

        let issued = service.issue_token(&vendor_id).unwrap();
        let claims = service.verify_token(&issued.token).unwrap();

        assert_eq!(claims.sub, vendor_id.to_hex());
        assert_eq!(claims.role, "vendor");
        assert_eq!(claims.iss, "vendor-backoffice");
        assert_eq!(claims.exp - claims.iat, 90 * 24 * 3600);
        assert_eq!(issued.expires_in, 90 * 24 * 3600);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let service = service();
        let vendor_id = ObjectId::new();

        let first = service.verify_token(&service.issue_token(&vendor_id).unwrap().token).unwrap();
        let second = service.verify_token(&service.issue_token(&vendor_id).unwrap().token).unwrap();

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_rejects_foreign_signature_and_issuer() {
        let vendor_id = ObjectId::new();
        let foreign = TokenService::new("other-secret".to_string(), "vendor-backoffice".to_string(), 90);
        let other_issuer = TokenService::new("test-secret".to_string(), "storefront".to_string(), 90);

        let forged = foreign.issue_token(&vendor_id).unwrap().token;
        assert!(matches!(service().verify_token(&forged), Err(AppError::AuthenticationError(_))));

        let wrong_issuer = other_issuer.issue_token(&vendor_id).unwrap().token;
        assert!(service().verify_token(&wrong_issuer).is_err());

        assert!(service().verify_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let expired = TokenService::new("test-secret".to_string(), "vendor-backoffice".to_string(), -1);
        let token = expired.issue_token(&ObjectId::new()).unwrap().token;

        let error = service().verify_token(&token).unwrap_err();
        assert!(matches!(error, AppError::AuthenticationError(msg) if msg.contains("expired")));
    }

    #[test]
    fn test_authenticate_builds_vendor() {
        let service = service();
        let vendor_id = ObjectId::new();
        let token = service.issue_token(&vendor_id).unwrap().token;

        let vendor = service.authenticate(&token).unwrap();
        assert_eq!(vendor.vendor_id, vendor_id);
        assert_eq!(vendor.role, "vendor");
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = service();

        assert_eq!(service.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }
}
