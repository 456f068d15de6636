//! 벤더 인증 요청 DTO
use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::utils::string_utils::{deserialize_optional_string, deserialize_string_or_number};

/// 벤더 가입 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VendorSignupRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[serde(deserialize_with = "deserialize_string_or_number")]
    #[validate(custom(function = "validate_digits"))]
    pub phone_number: String,

    #[serde(deserialize_with = "deserialize_string_or_number")]
    #[validate(custom(function = "validate_digits"))]
    pub zip_code: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
}

/// 숫자(와 앞의 `+`)만 허용
fn validate_digits(value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or(value);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("invalid_number")
            .with_message("Phone number and zip code must contain digits only".into()));
    }
    Ok(())
}

/// 벤더 로그인 요청
///
/// 빈 필드는 서비스에서 "Please fill in all fields"로 거부합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorLoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signup(phone: serde_json::Value) -> VendorSignupRequest {
        serde_json::from_value(json!({
            "name": "Loom House",
            "email": "loom@example.com",
            "password": "secret123",
            "address": "12 Weaver St",
            "phoneNumber": phone,
            "zipCode": 560001,
            "description": "  ",
        }))
        .unwrap()
    }

    #[test]
    fn test_signup_accepts_numeric_contact_fields() {
        let request = signup(json!(9876543210_i64));

        assert!(request.validate().is_ok());
        assert_eq!(request.phone_number, "9876543210");
        assert_eq!(request.zip_code, "560001");
        assert!(request.description.is_none());
    }

    #[test]
    fn test_signup_rejects_bad_input() {
        assert!(signup(json!("98-76")).validate().is_err());

        let mut request = signup(json!("+919876543210"));
        assert!(request.validate().is_ok());

        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_defaults_missing_fields() {
        let request: VendorLoginRequest = serde_json::from_value(json!({ "email": "a@b.c" })).unwrap();
        assert!(request.password.is_empty());
    }
}
