//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1로 매핑되는 엔티티입니다. 필드 이름은 스토어프론트와
//! 컬렉션을 공유하므로 camelCase로 저장됩니다.
//!
//! ```text
//! entities/
//! ├── common      ← 임베디드 값 객체 (이미지, 벤더 스냅샷, 색상)
//! ├── vendors     ← vendors
//! ├── users       ← users (읽기 전용 고객 요약)
//! ├── catalog     ← categories, subcategories, products
//! ├── coupons     ← coupons
//! └── orders      ← orders
//! ```
//!
//! 엔티티는 저장소 접근 없이 검증 가능한 규칙(가격 계산, 재고 차감,
//! 상태 전이)을 메서드로 가집니다.

pub mod common;
pub mod vendors;
pub mod users;
pub mod catalog;
pub mod coupons;
pub mod orders;

pub use common::*;
pub use vendors::*;
pub use users::*;
pub use catalog::*;
pub use coupons::*;
pub use orders::*;
