use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use crate::core::errors::AppError;
use crate::domain::models::auth::authentication_request::LOGIN_REQUIRED_MESSAGE;

/// JWT 토큰에서 추출된 벤더 정보
///
/// 인증 미들웨어가 요청 extensions에 넣어두며, 핸들러는 추출자로 받습니다.
/// 모든 벤더 범위 작업의 벤더 ID는 요청 본문이 아니라 이 값에서 옵니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthenticatedVendor {
    pub vendor_id: ObjectId,
    pub role: String,
}

impl FromRequest for AuthenticatedVendor {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedVendor>() {
            Some(vendor) => ready(Ok(vendor.clone())),
            None => ready(Err(AppError::AuthenticationError(LOGIN_REQUIRED_MESSAGE.to_string()))),
        }
    }
}

/// 선택적 인증 벤더 추출자
#[derive(Debug, Clone)]
pub struct OptionalVendor(pub Option<AuthenticatedVendor>);

impl FromRequest for OptionalVendor {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let vendor = req.extensions().get::<AuthenticatedVendor>().cloned();
        ready(Ok(OptionalVendor(vendor)))
    }
}
