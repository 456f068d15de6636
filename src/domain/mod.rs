//! # Domain Layer Module
//!
//! 벤더 백오피스의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서 (벤더, 카탈로그, 쿠폰, 주문)
//! ├── dto       - HTTP 요청/응답 계약
//! └── models    - 인증 컨텍스트, 토큰 클레임, 분석 집계
//!      │
//!      ▼
//! Services → Repositories → MongoDB
//! ```
//!
//! 엔티티는 저장 형식을 그대로 따르고, DTO는 `validator`로 입력을 검증한 뒤
//! 서비스가 이해하는 값으로 변환합니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
