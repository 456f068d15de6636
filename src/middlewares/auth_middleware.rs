//! 벤더 인증 미들웨어
//!
//! 요청의 `vendor_token` 쿠키(없으면 `Authorization: Bearer`)를 검증하고
//! 벤더 정보를 request extensions에 넣습니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 벤더 인증 미들웨어
pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 로그인한 벤더만 통과
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 토큰이 있으면 벤더 정보를 붙이고, 없어도 통과
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 로그인하지 않은 요청만 통과 (가입/로그인)
    pub fn guest_only() -> Self {
        Self::new(AuthMode::GuestOnly)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::{cookie::Cookie, test, web, App, HttpResponse};
    use mongodb::bson::oid::ObjectId;
    use serde_json::Value;
    use crate::core::registry::ServiceLocator;
    use crate::domain::models::auth::{
        AuthenticatedVendor, OptionalVendor, ALREADY_LOGGED_IN_MESSAGE, LOGIN_REQUIRED_MESSAGE,
    };
    use crate::services::auth::TokenService;
    use super::*;

    fn install_token_service() -> Arc<TokenService> {
        let service = Arc::new(TokenService::new(
            "middleware-test-secret".to_string(),
            "vendor-backoffice".to_string(),
            90,
        ));
        ServiceLocator::set(service.clone()).unwrap();
        service
    }

    async fn whoami(vendor: AuthenticatedVendor) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "vendorId": vendor.vendor_id.to_hex() }))
    }

    async fn maybe(vendor: OptionalVendor) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "loggedIn": vendor.0.is_some() }))
    }

    async fn guest() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_required_rejects_missing_token() {
        install_token_service();
        let app = test::init_service(
            App::new().service(
                web::scope("/api").wrap(AuthMiddleware::required()).route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/me").to_request()).await;
        assert_eq!(res.status(), 401);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], LOGIN_REQUIRED_MESSAGE);
    }

    #[actix_web::test]
    async fn test_required_accepts_cookie_and_bearer() {
        let tokens = install_token_service();
        let vendor_id = ObjectId::new();
        let token = tokens.issue_token(&vendor_id).unwrap().token;
        let app = test::init_service(
            App::new().service(
                web::scope("/api").wrap(AuthMiddleware::required()).route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let by_cookie = test::TestRequest::get()
            .uri("/api/me")
            .cookie(Cookie::new("vendor_token", token.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, by_cookie).await;
        assert_eq!(body["vendorId"], vendor_id.to_hex());

        let by_header = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, by_header).await;
        assert_eq!(body["vendorId"], vendor_id.to_hex());
    }

    #[actix_web::test]
    async fn test_optional_passes_without_token() {
        install_token_service();
        let app = test::init_service(
            App::new().service(
                web::scope("/api").wrap(AuthMiddleware::optional()).route("/maybe", web::get().to(maybe)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/maybe")
            .cookie(Cookie::new("vendor_token", "garbage"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["loggedIn"], false);
    }

    #[actix_web::test]
    async fn test_guest_only_rejects_logged_in_vendor() {
        let tokens = install_token_service();
        let token = tokens.issue_token(&ObjectId::new()).unwrap().token;
        let app = test::init_service(
            App::new().service(
                web::scope("/auth").wrap(AuthMiddleware::guest_only()).route("/login", web::post().to(guest)),
            ),
        )
        .await;

        let anonymous = test::TestRequest::post().uri("/auth/login").to_request();
        assert!(test::call_service(&app, anonymous).await.status().is_success());

        let logged_in = test::TestRequest::post()
            .uri("/auth/login")
            .cookie(Cookie::new("vendor_token", token))
            .to_request();
        let res = test::call_service(&app, logged_in).await;
        assert_eq!(res.status(), 401);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], ALREADY_LOGGED_IN_MESSAGE);
    }
}
