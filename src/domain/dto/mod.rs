//! # Data Transfer Objects
//!
//! HTTP 요청 본문/쿼리와 응답의 계약입니다. 요청 DTO는 `validator`로 형식을
//! 검증하고, 도메인 규칙(쿠폰 기간, 상태 전이 등)은 엔티티와 서비스가 검증합니다.
//!
//! ```text
//! dto/
//! ├── vendors   ← 가입, 로그인, 벤더 응답 (비밀번호 제외)
//! ├── catalog   ← 카테고리, 서브카테고리, 상품
//! ├── coupons   ← 쿠폰
//! └── orders    ← 주문 필터, 라인 아이템 상태
//! ```

pub mod vendors;
pub mod catalog;
pub mod coupons;
pub mod orders;

pub use vendors::*;
pub use catalog::*;
pub use coupons::*;
pub use orders::*;
