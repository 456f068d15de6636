//! 벤더 백오피스 백엔드
//!
//! 멀티 벤더 마켓플레이스에서 판매자(벤더)가 사용하는 관리 API입니다.
//! 벤더는 가입/로그인 후 카테고리와 상품을 관리하고, 쿠폰을 발행하며,
//! 자신의 상품이 포함된 주문을 처리하고 매출/재고 현황을 확인합니다.
//!
//! # Features
//!
//! - **벤더 인증**: bcrypt 비밀번호, HS256 JWT, httpOnly `vendor_token` 쿠키
//! - **카탈로그**: 카테고리, 서브카테고리, 색상/사이즈 변형을 가진 상품
//! - **이미지**: Cloudinary 업로드/삭제 (동시 처리)
//! - **쿠폰**: 벤더별 할인 코드
//! - **주문**: 라인 아이템 상태 관리, 완료 시 재고/판매량 반영
//! - **대시보드**: 매출 요약, 재고 경고, 월별 추이, 인기 상품
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 인증 수준별 스코프
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    MongoDB      │ ← 저장소 (+ Cloudinary 이미지)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use vendor_backoffice_backend::services::coupons::CouponService;
//!
//! let coupons = CouponService::instance()?
//!     .get_all(&vendor.vendor_id)
//!     .await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod media;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
