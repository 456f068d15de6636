//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 핸들러는 요청을 추출/검증한 뒤
//! 서비스를 호출하고, 결과를 `{ success, message, ... }` 형태의 JSON으로
//! 돌려줍니다. 실패는 모두 `AppError`로 전파되어 `{ success: false, message }`
//! 로 렌더링됩니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Vendor Dashboard (Browser)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP + vendor_token 쿠키
//! ┌─────────────────────▼───────────────────────┐
//!   Middlewares - 인증 (Required/Optional/GuestOnly)
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈)                             ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - MongoDB 접근                    ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 공통 패턴
//!
//! ```rust,ignore
//! #[post("/coupons")]
//! pub async fn create_coupon(
//!     vendor: AuthenticatedVendor,          // 미들웨어가 넣은 벤더
//!     payload: web::Json<CouponRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;
//!     let coupons = CouponService::instance()?
//!         .create(&vendor.vendor_id, payload.into_inner())
//!         .await?;
//!     Ok(HttpResponse::Created().json(json!({
//!         "success": true,
//!         "coupons": to_plain_json(&coupons)?
//!     })))
//! }
//! ```
//!
//! 벤더 범위 작업의 벤더 id는 항상 토큰에서 가져오며, 요청 본문의 값은 쓰지 않습니다.
//! 응답 직전에 [`to_plain_json`](crate::utils::json_utils::to_plain_json)으로
//! `ObjectId`와 날짜를 문자열로 평탄화합니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 가입, 로그인, 로그아웃
//! - **`vendors`**: 내 정보, 벤더 조회/존재/승인 확인
//! - **`categories`**: 카테고리, 서브카테고리
//! - **`products`**: 상품과 색상 변형
//! - **`coupons`**: 쿠폰
//! - **`orders`**: 주문 조회, 라인 아이템 상태
//! - **`dashboard`**: 대시보드 카드, 분석 차트

pub mod auth;
pub mod vendors;
pub mod categories;
pub mod products;
pub mod coupons;
pub mod orders;
pub mod dashboard;
