//! Product Entity
//!
//! 상품은 색상별 변형(`SubProduct`)을 가지고, 각 변형은 사이즈별 재고/가격을 가집니다.
//!
//! ```text
//! Product
//! └── subProducts[style]
//!     ├── color { color, image }
//!     ├── discount (%)
//!     └── sizes[size] { size, qty, price, sold }
//! ```

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::common::{public_ids, ColorSwatch, Detail, ImageAsset, NamedItem, Question, VendorSnapshot};
use crate::utils::string_utils::{deserialize_flexible_f64, deserialize_flexible_i64};

/// 이 수량 이하이면 재고 부족으로 봅니다.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// 사이즈별 재고와 가격
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeVariant {
    #[serde(default)]
    pub size: String,
    #[serde(default, deserialize_with = "deserialize_flexible_i64")]
    pub qty: i64,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "deserialize_flexible_i64")]
    pub sold: i64,
}

impl SizeVariant {
    pub fn new(size: String, qty: i64, price: f64) -> Self {
        Self { size, qty, price, sold: 0 }
    }
}

/// 할인 후 가격. 할인율이 0 이하면 원가, 결과는 음수가 되지 않습니다.
pub fn discounted_price(price_before: f64, discount_percent: f64) -> f64 {
    if discount_percent <= 0.0 {
        return price_before;
    }
    (price_before - price_before * (discount_percent / 100.0)).max(0.0)
}

/// 특정 스타일/사이즈의 가격 정보
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPricing {
    pub size: String,
    pub price_before: f64,
    pub price: f64,
    pub discount: f64,
    pub quantity: i64,
}

/// 색상 변형
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubProduct {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    #[serde(default)]
    pub description_images: Vec<ImageAsset>,
    #[serde(default)]
    pub color: ColorSwatch,
    #[serde(default)]
    pub sizes: Vec<SizeVariant>,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    pub discount: f64,
    #[serde(default, deserialize_with = "deserialize_flexible_i64")]
    pub sold: i64,
}

impl SubProduct {
    pub fn new(
        sku: String,
        color: ColorSwatch,
        images: Vec<ImageAsset>,
        sizes: Vec<SizeVariant>,
        discount: f64,
    ) -> Self {
        Self {
            id: Some(ObjectId::new()),
            sku,
            images,
            description_images: Vec::new(),
            color,
            sizes,
            discount,
            sold: 0,
        }
    }

    pub fn pricing(&self, size_index: usize) -> Option<VariantPricing> {
        let size = self.sizes.get(size_index)?;

        Some(VariantPricing {
            size: size.size.clone(),
            price_before: size.price,
            price: discounted_price(size.price, self.discount),
            discount: self.discount,
            quantity: size.qty,
        })
    }

    pub fn image_public_ids(&self) -> Vec<String> {
        let mut ids = public_ids(&self.images);
        ids.extend(public_ids(&self.description_images));
        ids
    }
}

/// 상품 리뷰 (스토어프론트에서 작성, 여기서는 읽기만 함)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub review_by: ObjectId,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    pub rating: f64,
    #[serde(default)]
    pub review: String,
}

/// 재고 경고 항목
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub sub_product_id: Option<ObjectId>,
    pub style: usize,
    pub sku: String,
    pub color: String,
    pub size: String,
    pub qty: i64,
}

/// 주문 완료 시 재고를 차감할 위치
///
/// `size`는 저장된 라벨 그대로이며, 배열 필터에서 정확히 일치시키는 데 씁니다.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleTarget {
    pub style: usize,
    pub size: String,
}

/// 상품 수정 내용
///
/// 상위 필드와 첫 번째 변형의 sku/할인/색상/사이즈만 바꿉니다. 슬러그,
/// 카테고리, 리뷰와 나머지 변형은 그대로 둡니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEdit {
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub brand: String,
    pub details: Vec<Detail>,
    pub questions: Vec<Question>,
    pub benefits: Vec<NamedItem>,
    pub ingredients: Vec<NamedItem>,
    pub sku: String,
    pub discount: f64,
    pub color: ColorSwatch,
    pub sizes: Vec<SizeVariant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub brand: String,
    /// URL 슬러그 (unique)
    pub slug: String,
    pub category: ObjectId,
    #[serde(default)]
    pub sub_categories: Vec<ObjectId>,
    #[serde(default)]
    pub details: Vec<Detail>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub benefits: Vec<NamedItem>,
    #[serde(default)]
    pub ingredients: Vec<NamedItem>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    pub rating: f64,
    #[serde(default, deserialize_with = "deserialize_flexible_i64")]
    pub num_reviews: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorSnapshot>,
    #[serde(default)]
    pub sub_products: Vec<SubProduct>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Product {
    /// 첫 번째 변형 하나를 가진 새 상품
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        description: String,
        long_description: String,
        brand: String,
        slug: String,
        category: ObjectId,
        sub_categories: Vec<ObjectId>,
        vendor: VendorSnapshot,
        primary: SubProduct,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            description,
            long_description,
            brand,
            slug,
            category,
            sub_categories,
            details: Vec::new(),
            questions: Vec::new(),
            benefits: Vec::new(),
            ingredients: Vec::new(),
            reviews: Vec::new(),
            rating: 0.0,
            num_reviews: 0,
            vendor: Some(vendor),
            sub_products: vec![primary],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, vendor_id: &ObjectId) -> bool {
        self.vendor.as_ref().is_some_and(|vendor| &vendor.id == vendor_id)
    }

    pub fn has_primary_variant(&self) -> bool {
        !self.sub_products.is_empty()
    }

    pub fn pricing(&self, style: usize, size_index: usize) -> Option<(&SubProduct, VariantPricing)> {
        let sub_product = self.sub_products.get(style)?;
        let pricing = sub_product.pricing(size_index)?;
        Some((sub_product, pricing))
    }

    /// 주문 라인의 색상에 맞는 변형 인덱스. 일치하는 색상이 없으면 첫 번째 변형입니다.
    pub fn style_for_color(&self, color: &str) -> Option<usize> {
        if self.sub_products.is_empty() {
            return None;
        }

        let wanted = color.trim();
        let matched = (!wanted.is_empty())
            .then(|| {
                self.sub_products
                    .iter()
                    .position(|sp| sp.color.color.trim().eq_ignore_ascii_case(wanted))
            })
            .flatten();

        Some(matched.unwrap_or(0))
    }

    /// 판매 완료를 반영할 변형과 사이즈를 찾습니다.
    ///
    /// 색상으로 변형을 고르고(없으면 첫 번째 변형), 사이즈 라벨은 대소문자와
    /// 앞뒤 공백을 무시하고 비교합니다. 찾지 못하면 `None`입니다.
    pub fn sale_target(&self, color: &str, size: &str) -> Option<SaleTarget> {
        let style = self.style_for_color(color)?;
        let size_variant = self.sub_products
            .get(style)?
            .sizes
            .iter()
            .find(|s| s.size.trim().eq_ignore_ascii_case(size.trim()))?;

        Some(SaleTarget { style, size: size_variant.size.clone() })
    }

    fn stock_alerts<F>(&self, predicate: F) -> Vec<StockAlert>
    where
        F: Fn(&SizeVariant) -> bool,
    {
        self.sub_products
            .iter()
            .enumerate()
            .flat_map(|(style, sp)| {
                sp.sizes.iter().filter(|s| predicate(s)).map(move |s| StockAlert {
                    sub_product_id: sp.id,
                    style,
                    sku: sp.sku.clone(),
                    color: sp.color.color.clone(),
                    size: s.size.clone(),
                    qty: s.qty,
                })
            })
            .collect()
    }

    /// `qty <= threshold`인 사이즈들
    pub fn low_stock(&self, threshold: i64) -> Vec<StockAlert> {
        self.stock_alerts(|s| s.qty <= threshold)
    }

    /// `qty == 0`인 사이즈들
    pub fn out_of_stock(&self) -> Vec<StockAlert> {
        self.stock_alerts(|s| s.qty <= 0)
    }

    pub fn total_sold(&self) -> i64 {
        self.sub_products.iter().map(|sp| sp.sold).sum()
    }

    pub fn image_public_ids(&self) -> Vec<String> {
        self.sub_products
            .iter()
            .flat_map(|sp| sp.image_public_ids())
            .collect()
    }
}

/// 슬러그 중복 시 시도할 후보 (`base`, `base-2`, `base-3`, ...)
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn snapshot(id: ObjectId) -> VendorSnapshot {
        VendorSnapshot {
            id,
            name: "Loom House".to_string(),
            email: "loom@example.com".to_string(),
            description: None,
            address: None,
            phone_number: None,
            zip_code: None,
            verified: true,
        }
    }

    fn variant(color: &str, sizes: &[(&str, i64, f64)]) -> SubProduct {
        SubProduct::new(
            format!("SKU-{}", color),
            ColorSwatch { color: color.to_string(), image: String::new() },
            vec![ImageAsset { url: "u".to_string(), public_id: format!("img-{}", color) }],
            sizes
                .iter()
                .map(|(size, qty, price)| SizeVariant::new(size.to_string(), *qty, *price))
                .collect(),
            10.0,
        )
    }

    /// 저장소의 재고 차감(`$inc` 후 0 하한)을 메모리에서 재현합니다.
    pub(crate) fn record_sale(product: &mut Product, color: &str, size: &str, qty: i64) -> Option<SaleTarget> {
        let target = product.sale_target(color, size)?;
        let sub_product = &mut product.sub_products[target.style];
        let size_variant = sub_product.sizes.iter_mut().find(|s| s.size == target.size)?;

        size_variant.qty = (size_variant.qty - qty).max(0);
        size_variant.sold += qty;
        sub_product.sold += qty;
        Some(target)
    }

    pub(crate) fn sample_product(vendor: ObjectId) -> Product {
        let mut product = Product::new(
            "Linen Kurta".to_string(),
            "Breathable".to_string(),
            String::new(),
            "Loom".to_string(),
            "linen-kurta".to_string(),
            ObjectId::new(),
            vec![],
            snapshot(vendor),
            variant("White", &[("S", 10, 1000.0), ("M", 3, 1200.0)]),
        );
        product.sub_products.push(variant("Blue", &[("S", 0, 900.0), ("L", 6, 950.0)]));
        product
    }

    #[test]
    fn test_discounted_price() {
        assert_eq!(discounted_price(1000.0, 0.0), 1000.0);
        assert_eq!(discounted_price(1000.0, -5.0), 1000.0);
        assert_eq!(discounted_price(1000.0, 25.0), 750.0);
        assert_eq!(discounted_price(1000.0, 100.0), 0.0);
        assert_eq!(discounted_price(1000.0, 150.0), 0.0);
    }

    #[test]
    fn test_pricing_by_style_and_size() {
        let product = sample_product(ObjectId::new());

        let (sub_product, pricing) = product.pricing(0, 1).unwrap();
        assert_eq!(sub_product.sku, "SKU-White");
        assert_eq!(pricing.size, "M");
        assert_eq!(pricing.price_before, 1200.0);
        assert_eq!(pricing.price, 1080.0);
        assert_eq!(pricing.quantity, 3);

        assert!(product.pricing(2, 0).is_none());
        assert!(product.pricing(0, 5).is_none());
    }

    #[test]
    fn test_sale_target_matches_color_and_size_label() {
        let product = sample_product(ObjectId::new());

        let target = product.sale_target("blue", " l ").unwrap();

        assert_eq!(target, SaleTarget { style: 1, size: "L".to_string() });
    }

    #[test]
    fn test_sale_target_falls_back_to_primary_variant() {
        let mut product = sample_product(ObjectId::new());

        assert_eq!(product.sale_target("", "S").unwrap().style, 0);
        assert_eq!(product.sale_target("Magenta", "M").unwrap().style, 0);

        record_sale(&mut product, "", "S", 12).unwrap();
        assert_eq!(product.sub_products[0].sizes[0].qty, 0);
        assert_eq!(product.total_sold(), 12);
    }

    #[test]
    fn test_sale_target_unknown_size_or_no_variants() {
        let mut product = sample_product(ObjectId::new());
        assert!(product.sale_target("White", "XXL").is_none());

        product.sub_products.clear();
        assert!(product.sale_target("White", "S").is_none());
        assert!(!product.has_primary_variant());
    }

    #[test]
    fn test_stock_alerts() {
        let product = sample_product(ObjectId::new());

        let low: Vec<_> = product.low_stock(LOW_STOCK_THRESHOLD).into_iter().map(|a| a.size).collect();
        assert_eq!(low, vec!["M".to_string(), "S".to_string()]);

        let out = product.out_of_stock();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].color, "Blue");
        assert_eq!(out[0].style, 1);
    }

    #[test]
    fn test_ownership_and_images() {
        let vendor = ObjectId::new();
        let product = sample_product(vendor);

        assert!(product.is_owned_by(&vendor));
        assert!(!product.is_owned_by(&ObjectId::new()));
        assert_eq!(product.image_public_ids(), vec!["img-White".to_string(), "img-Blue".to_string()]);
    }

    #[test]
    fn test_slug_candidate() {
        assert_eq!(slug_candidate("linen-kurta", 1), "linen-kurta");
        assert_eq!(slug_candidate("linen-kurta", 3), "linen-kurta-3");
    }
}
