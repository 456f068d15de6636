//! Users Entity Module
//!
//! 스토어프론트 고객 문서 중 벤더 백오피스가 읽는 부분만 정의합니다.

pub mod user;

pub use user::*;
