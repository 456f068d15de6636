//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 슬러그, 숫자 입력 역직렬화
//! - [`time_utils`] - 주문 기간 필터와 월별 버킷 계산
//! - [`json_utils`] - BSON 확장 JSON을 평문 JSON으로 변환
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::parse_object_id;
//! use crate::utils::string_utils::slugify;
//!
//! let id = parse_object_id(&path, "Invalid Vendor ID.")?;
//! let slug = slugify("Cotton Shirts");
//! ```

pub mod string_utils;
pub mod time_utils;
pub mod json_utils;
pub mod display_terminal;

use mongodb::bson::oid::ObjectId;
use crate::core::errors::{AppError, AppResult};

/// 문자열 id를 `ObjectId`로 변환합니다.
///
/// # Errors
///
/// * `AppError::ValidationError(message)` - 24자리 16진수가 아닌 경우
pub fn parse_object_id(id: &str, message: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim()).map_err(|_| AppError::ValidationError(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("65f2a1b2c3d4e5f60718293a", "bad").is_ok());
        assert!(parse_object_id(" 65f2a1b2c3d4e5f60718293a ", "bad").is_ok());

        let error = parse_object_id("not-an-id", "Invalid Vendor ID.").unwrap_err();
        assert!(matches!(error, AppError::ValidationError(msg) if msg == "Invalid Vendor ID."));
    }
}
