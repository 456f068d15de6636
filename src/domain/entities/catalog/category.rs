//! 카테고리 / 서브카테고리 엔티티

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::common::{public_ids, ImageAsset, VendorSnapshot};
use crate::utils::string_utils::slugify;

/// 최상위 상품 카테고리
///
/// 카테고리는 모든 벤더가 공유합니다. `vendor`는 생성한 벤더의 스냅샷입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 카테고리 이름 (unique, trim)
    pub name: String,
    /// URL 슬러그 (unique, 소문자)
    pub slug: String,
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorSnapshot>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Category {
    pub fn new(name: String, images: Vec<ImageAsset>, vendor: Option<VendorSnapshot>) -> Self {
        let now = DateTime::now();
        let name = name.trim().to_string();

        Self {
            id: None,
            slug: slugify(&name),
            name,
            images,
            vendor,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn image_public_ids(&self) -> Vec<String> {
        public_ids(&self.images)
    }
}

/// 카테고리 하위 분류
///
/// `parent`는 반드시 존재하는 [`Category`]를 가리킵니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorSnapshot>,
    pub parent: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl SubCategory {
    pub fn new(
        name: String,
        parent: ObjectId,
        images: Vec<ImageAsset>,
        vendor: Option<VendorSnapshot>,
    ) -> Self {
        let now = DateTime::now();
        let name = name.trim().to_string();

        Self {
            id: None,
            slug: slugify(&name),
            name,
            images,
            vendor,
            parent,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn image_public_ids(&self) -> Vec<String> {
        public_ids(&self.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_slug_and_trim() {
        let category = Category::new("  Cotton Shirts ".to_string(), vec![], None);

        assert_eq!(category.name, "Cotton Shirts");
        assert_eq!(category.slug, "cotton-shirts");
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn test_sub_category_keeps_parent() {
        let parent = ObjectId::new();
        let images = vec![ImageAsset { url: "u".to_string(), public_id: "p1".to_string() }];
        let sub = SubCategory::new("Linen & Silk".to_string(), parent, images, None);

        assert_eq!(sub.parent, parent);
        assert_eq!(sub.slug, "linen-silk");
        assert_eq!(sub.image_public_ids(), vec!["p1".to_string()]);
    }
}
