//! 상품 응답 DTO
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use crate::domain::entities::catalog::{Product, SizeVariant, SubProduct, VariantPricing};
use crate::domain::entities::common::{ColorSwatch, ImageAsset};

/// 특정 스타일/사이즈로 본 상품
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariantView {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub style: usize,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub brand: String,
    pub slug: String,
    pub category: ObjectId,
    pub sub_categories: Vec<ObjectId>,
    pub sku: String,
    pub images: Vec<ImageAsset>,
    pub color: ColorSwatch,
    pub sizes: Vec<SizeVariant>,
    pub colors: Vec<ColorSwatch>,
    pub rating: f64,
    pub num_reviews: i64,
    #[serde(flatten)]
    pub pricing: VariantPricing,
}

impl ProductVariantView {
    pub fn new(product: &Product, style: usize, sub_product: &SubProduct, pricing: VariantPricing) -> Self {
        Self {
            id: product.id,
            style,
            name: product.name.clone(),
            description: product.description.clone(),
            long_description: product.long_description.clone(),
            brand: product.brand.clone(),
            slug: product.slug.clone(),
            category: product.category,
            sub_categories: product.sub_categories.clone(),
            sku: sub_product.sku.clone(),
            images: sub_product.images.clone(),
            color: sub_product.color.clone(),
            sizes: sub_product.sizes.clone(),
            colors: product.sub_products.iter().map(|sp| sp.color.clone()).collect(),
            rating: product.rating,
            num_reviews: product.num_reviews,
            pricing,
        }
    }
}

/// 색상 변형을 추가할 수 있는 부모 상품 (`{ _id, name, subProducts }`)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductParent {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub sub_products: Vec<SubProduct>,
}

impl From<Product> for ProductParent {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            sub_products: product.sub_products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::product::tests::sample_product;
    use crate::utils::json_utils::to_plain_json;

    #[test]
    fn test_variant_view_flattens_pricing() {
        let product = sample_product(ObjectId::new());
        let (sub_product, pricing) = product.pricing(1, 1).unwrap();

        let view = ProductVariantView::new(&product, 1, sub_product, pricing);
        let json = to_plain_json(&view).unwrap();

        assert_eq!(json["style"], 1);
        assert_eq!(json["sku"], "SKU-Blue");
        assert_eq!(json["size"], "L");
        assert_eq!(json["priceBefore"], 950.0);
        assert_eq!(json["price"], 855.0);
        assert_eq!(json["quantity"], 6);
        assert_eq!(json["colors"].as_array().unwrap().len(), 2);
    }
}
