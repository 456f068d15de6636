//! 카테고리/서브카테고리 요청 DTO
use serde::Deserialize;
use validator::{Validate, ValidationError};

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;

/// 저장 전에 이름을 trim하므로 길이도 trim한 값으로 셉니다.
fn trimmed_name_length(name: &str, message: &'static str) -> Result<(), ValidationError> {
    let length = name.trim().chars().count();

    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
        return Err(ValidationError::new("invalid_name_length").with_message(message.into()));
    }
    Ok(())
}

fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    trimmed_name_length(name, "Category name must be between 2 and 50 characters")
}

fn validate_sub_category_name(name: &str) -> Result<(), ValidationError> {
    trimmed_name_length(name, "Sub category name must be between 2 and 50 characters")
}

/// 카테고리 생성 요청
///
/// `images`는 data URI 또는 base64 문자열 목록입니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(custom(function = "validate_category_name"))]
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(custom(function = "validate_category_name"))]
    pub name: String,
}

/// 서브카테고리 생성 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubCategoryRequest {
    #[validate(custom(function = "validate_sub_category_name"))]
    pub name: String,
    /// 상위 카테고리 id
    #[validate(length(min = 1, message = "Parent category is required"))]
    pub parent: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSubCategoryRequest {
    #[validate(custom(function = "validate_sub_category_name"))]
    pub name: String,
    #[validate(length(min = 1, message = "Parent category is required"))]
    pub parent: String,
}

/// `GET /sub-categories/by-parent?category=<id>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubCategoriesQuery {
    #[serde(default)]
    pub category: Option<String>,
}

impl SubCategoriesQuery {
    /// 비어 있지 않은 카테고리 id
    pub fn category_id(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_name_length() {
        let request = CreateCategoryRequest { name: "A".to_string(), images: vec![] };
        assert!(request.validate().is_err());

        let request = CreateCategoryRequest { name: "Sarees".to_string(), images: vec![] };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_names_are_rejected_after_trim() {
        let request = CreateCategoryRequest { name: "    ".to_string(), images: vec![] };
        assert!(request.validate().is_err());

        let request = UpdateCategoryRequest { name: " A  ".to_string() };
        assert!(request.validate().is_err());

        let request = CreateSubCategoryRequest {
            name: "   ".to_string(),
            parent: "65f2a1b2c3d4e5f60718293a".to_string(),
            images: vec![],
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let request = UpdateSubCategoryRequest {
            name: "  Silk  ".to_string(),
            parent: "65f2a1b2c3d4e5f60718293a".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_sub_categories_query_blank_category() {
        let query = SubCategoriesQuery { category: Some("  ".to_string()) };
        assert!(query.category_id().is_none());
        assert!(SubCategoriesQuery::default().category_id().is_none());

        let query = SubCategoriesQuery { category: Some("abc".to_string()) };
        assert_eq!(query.category_id(), Some("abc"));
    }
}
