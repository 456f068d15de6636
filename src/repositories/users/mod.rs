//! 고객 조회 리포지토리
//!
//! `users` 컬렉션은 스토어프론트가 관리하며, 여기서는 주문에 고객 요약을
//! 붙이기 위해 읽기만 합니다.

pub mod user_repo;

pub use user_repo::*;
