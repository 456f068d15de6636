//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::config::CookieConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::{
    AuthMode, AuthenticatedVendor, ALREADY_LOGGED_IN_MESSAGE, LOGIN_REQUIRED_MESSAGE,
};
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;

        Box::pin(async move {
            let auth_result = authenticate_request(&req);

            match (mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {} {} - {}", req.method(), req.path(), err);
                    return Ok(reject(req, &err));
                }
                (AuthMode::Required, Ok(vendor)) | (AuthMode::Optional, Ok(vendor)) => {
                    log::debug!("인증 성공: 벤더 ID {}", vendor.vendor_id);
                    req.extensions_mut().insert(vendor);
                }
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 토큰 없음, 요청 진행");
                }
                (AuthMode::GuestOnly, Ok(vendor)) => {
                    log::debug!("이미 로그인한 벤더의 접근: {}", vendor.vendor_id);
                    let err = AppError::AuthenticationError(ALREADY_LOGGED_IN_MESSAGE.to_string());
                    return Ok(reject(req, &err));
                }
                (AuthMode::GuestOnly, Err(_)) => {}
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, err: &AppError) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, err.error_response()).map_into_right_body()
}

/// 쿠키를 우선으로, 없으면 Authorization 헤더에서 토큰을 꺼내 검증합니다.
fn authenticate_request(req: &ServiceRequest) -> AppResult<AuthenticatedVendor> {
    let token_service = TokenService::instance()?;

    if let Some(cookie) = req.cookie(CookieConfig::NAME) {
        if !cookie.value().is_empty() {
            return token_service.authenticate(cookie.value());
        }
    }

    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError(LOGIN_REQUIRED_MESSAGE.to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    token_service.authenticate(token)
}
