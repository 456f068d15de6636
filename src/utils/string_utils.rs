//! # 문자열 유틸리티
//!
//! 입력 정리, 슬러그 생성, 숫자/문자열 혼합 입력 역직렬화 등
//! 요청 처리 전반에서 쓰이는 함수들입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 필수 문자열을 검증하고 앞뒤 공백을 제거합니다.
///
/// # Errors
///
/// * `AppError::ValidationError` - 공백만 있거나 비어있는 경우
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", field_name)));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열을 정리합니다. 공백뿐인 값은 `None`이 됩니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// URL에 사용할 슬러그를 생성합니다.
///
/// 소문자 ASCII 영숫자만 남기고, 그 외 문자 구간은 하이픈 하나로 접습니다.
/// 앞뒤 하이픈은 제거됩니다.
///
/// ```rust,ignore
/// assert_eq!(slugify("Cotton Shirts & Tees"), "cotton-shirts-tees");
/// ```
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' || ch.is_ascii_punctuation() {
            pending_dash = true;
        }
    }

    slug
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Float(f64),
    Text(String),
}

impl NumberOrString {
    fn into_f64(self) -> Result<f64, String> {
        match self {
            NumberOrString::Float(value) => Ok(value),
            NumberOrString::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", text)),
        }
    }
}

/// 숫자 또는 숫자 문자열(`"12.5"`)을 `f64`로 역직렬화합니다.
pub fn deserialize_flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?
        .into_f64()
        .map_err(serde::de::Error::custom)
}

/// 숫자 또는 숫자 문자열(`"3"`)을 `i64`로 역직렬화합니다.
///
/// 소수점 이하가 있는 값은 거부합니다.
pub fn deserialize_flexible_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = NumberOrString::deserialize(deserializer)?
        .into_f64()
        .map_err(serde::de::Error::custom)?;

    if value.fract() != 0.0 || !value.is_finite() {
        return Err(serde::de::Error::custom(format!("{} is not a whole number", value)));
    }
    Ok(value as i64)
}

/// 숫자 또는 문자열을 문자열로 역직렬화합니다.
///
/// 전화번호, 우편번호처럼 과거 문서에 숫자로 저장된 값을 읽을 때 사용합니다.
pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Integer(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
        Raw::Text(text) => text.trim().to_string(),
    })
}
