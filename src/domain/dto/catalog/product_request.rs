//! 상품 요청 DTO
use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::domain::entities::catalog::{ProductEdit, SizeVariant};
use crate::domain::entities::common::{ColorSwatch, Detail, NamedItem, Question};
use crate::utils::string_utils::{deserialize_flexible_f64, deserialize_flexible_i64, deserialize_optional_string};

/// 사이즈 입력 (`qty`, `price`는 숫자 문자열도 허용)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SizeInput {
    #[validate(length(min = 1, message = "Size label is required"))]
    pub size: String,
    #[serde(default, deserialize_with = "deserialize_flexible_i64")]
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub qty: i64,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
}

impl From<&SizeInput> for SizeVariant {
    fn from(input: &SizeInput) -> Self {
        SizeVariant::new(input.size.trim().to_string(), input.qty, input.price)
    }
}

/// 색상 입력. 색상 이름 문자열 또는 `{ color, image }` 객체를 받습니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
    Name(String),
    Swatch(ColorSwatch),
}

impl Default for ColorInput {
    fn default() -> Self {
        ColorInput::Swatch(ColorSwatch::default())
    }
}

impl ColorInput {
    pub fn into_swatch(self) -> ColorSwatch {
        match self {
            ColorInput::Name(color) => ColorSwatch { color: color.trim().to_string(), image: String::new() },
            ColorInput::Swatch(swatch) => swatch,
        }
    }
}

/// 상품 생성 요청
///
/// `parent`가 있으면 새 상품 대신 해당 상품에 색상 변형을 추가합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub color: ColorInput,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub sizes: Vec<SizeInput>,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    pub discount: f64,
    #[serde(default)]
    pub details: Vec<Detail>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub benefits: Vec<NamedItem>,
    #[serde(default)]
    pub ingredients: Vec<NamedItem>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_categories: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub parent: Option<String>,
}

impl CreateProductRequest {
    pub fn size_variants(&self) -> Vec<SizeVariant> {
        self.sizes.iter().map(SizeVariant::from).collect()
    }
}

/// 상품 수정 요청
///
/// 상위 필드와 첫 번째 변형의 sku/할인/색상/사이즈를 덮어씁니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(custom(function = "validate_product_name"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub color: ColorInput,
    #[serde(default)]
    #[validate(nested)]
    pub sizes: Vec<SizeInput>,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    pub discount: f64,
    #[serde(default)]
    pub details: Vec<Detail>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub benefits: Vec<NamedItem>,
    #[serde(default)]
    pub ingredients: Vec<NamedItem>,
}

fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Product name is required".into()));
    }
    Ok(())
}

impl From<UpdateProductRequest> for ProductEdit {
    fn from(request: UpdateProductRequest) -> Self {
        let sizes = request.sizes.iter().map(SizeVariant::from).collect();

        ProductEdit {
            name: request.name.trim().to_string(),
            description: request.description,
            long_description: request.long_description,
            brand: request.brand,
            details: request.details,
            questions: request.questions,
            benefits: request.benefits,
            ingredients: request.ingredients,
            sku: request.sku.trim().to_string(),
            discount: request.discount,
            color: request.color.into_swatch(),
            sizes,
        }
    }
}

/// `GET /products/{id}/variant?style=0&size=0`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct VariantQuery {
    #[serde(default)]
    pub style: usize,
    #[serde(default)]
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_normalizes_sizes_and_color() {
        let request: CreateProductRequest = serde_json::from_value(json!({
            "name": "Linen Kurta",
            "sku": "LK-01",
            "color": "White",
            "sizes": [
                { "size": " S ", "qty": "10", "price": "999.5" },
                { "size": "M", "qty": 4, "price": 1200 }
            ],
            "discount": "15",
            "category": "65f2a1b2c3d4e5f60718293a",
            "parent": "",
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert!(request.parent.is_none());
        assert_eq!(request.discount, 15.0);

        let sizes = request.size_variants();
        assert_eq!(sizes[0], SizeVariant::new("S".to_string(), 10, 999.5));
        assert_eq!(sizes[1].price, 1200.0);
        assert_eq!(request.color.into_swatch().color, "White");
    }

    #[test]
    fn test_color_object_is_accepted() {
        let request: CreateProductRequest = serde_json::from_value(json!({
            "name": "Linen Kurta",
            "color": { "color": "Blue", "image": "https://cdn/blue.png" },
        }))
        .unwrap();

        let swatch = request.color.into_swatch();
        assert_eq!(swatch.color, "Blue");
        assert_eq!(swatch.image, "https://cdn/blue.png");
    }

    #[test]
    fn test_invalid_sizes_and_discount_rejected() {
        let request: UpdateProductRequest = serde_json::from_value(json!({
            "name": "Linen Kurta",
            "sizes": [{ "size": "S", "qty": -1, "price": 10 }],
            "discount": 10,
        }))
        .unwrap();
        assert!(request.validate().is_err());

        let request: UpdateProductRequest = serde_json::from_value(json!({
            "name": "Linen Kurta",
            "discount": 120,
        }))
        .unwrap();
        assert!(request.validate().is_err());

        let request: UpdateProductRequest = serde_json::from_value(json!({ "name": "   " })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_into_edit() {
        let request: UpdateProductRequest = serde_json::from_value(json!({
            "name": "  Linen Kurta Classic ",
            "sku": " SKU-NEW ",
            "color": "Ivory",
            "sizes": [{ "size": " S ", "qty": 4, "price": 1100 }],
            "discount": 15,
        }))
        .unwrap();

        let edit = ProductEdit::from(request);

        assert_eq!(edit.name, "Linen Kurta Classic");
        assert_eq!(edit.sku, "SKU-NEW");
        assert_eq!(edit.color.color, "Ivory");
        assert_eq!(edit.sizes, vec![SizeVariant::new("S".to_string(), 4, 1100.0)]);
    }
}
