//! Vendor Entity Implementation
//!
//! 마켓플레이스에 상품을 등록하는 판매자 계정입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::common::VendorSnapshot;
use crate::utils::string_utils::deserialize_string_or_number;

pub const VENDOR_ROLE: &str = "vendor";

fn default_role() -> String {
    VENDOR_ROLE.to_string()
}

/// 벤더 엔티티
///
/// `password`는 bcrypt 해시이며 응답에는 절대 포함하지 않습니다.
/// 외부로 내보낼 때는 [`VendorResponse`](crate::domain::dto::vendors::response::VendorResponse)를 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// 로그인 이메일 (unique)
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub phone_number: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub zip_code: String,
    #[serde(default)]
    pub available_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    /// 관리자 승인 여부
    #[serde(default)]
    pub verified: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Vendor {
    /// 가입 직후의 미승인 벤더를 생성합니다.
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        address: String,
        phone_number: String,
        zip_code: String,
        description: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password: password_hash,
            description,
            address,
            phone_number,
            role: default_role(),
            zip_code,
            available_balance: 0.0,
            commission: None,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// 상품/쿠폰/카테고리에 임베드할 스냅샷
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 아직 저장되지 않아 id가 없는 경우
    pub fn snapshot(&self) -> AppResult<VendorSnapshot> {
        let id = self
            .id
            .ok_or_else(|| AppError::InternalError("Vendor has no id yet".to_string()))?;

        Ok(VendorSnapshot {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            description: self.description.clone(),
            address: Some(self.address.clone()),
            phone_number: Some(self.phone_number.clone()),
            zip_code: Some(self.zip_code.clone()),
            verified: self.verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document, to_document};

    fn sample() -> Vendor {
        Vendor::new(
            "Loom House".to_string(),
            "loom@example.com".to_string(),
            "$2b$04$hash".to_string(),
            "12 Weaver St".to_string(),
            "9876543210".to_string(),
            "560001".to_string(),
            None,
        )
    }

    #[test]
    fn test_new_vendor_defaults() {
        let vendor = sample();

        assert_eq!(vendor.role, "vendor");
        assert!(!vendor.verified);
        assert_eq!(vendor.available_balance, 0.0);
        assert!(vendor.id.is_none());
    }

    #[test]
    fn test_snapshot_requires_id() {
        let mut vendor = sample();
        assert!(vendor.snapshot().is_err());

        let id = ObjectId::new();
        vendor.id = Some(id);
        let snapshot = vendor.snapshot().unwrap();

        assert_eq!(snapshot.id, id);
        assert_eq!(snapshot.email, "loom@example.com");
    }

    #[test]
    fn test_document_uses_camel_case() {
        let document = to_document(&sample()).unwrap();

        assert!(document.contains_key("phoneNumber"));
        assert!(document.contains_key("zipCode"));
        assert!(document.contains_key("availableBalance"));
        assert!(!document.contains_key("_id"));
    }

    #[test]
    fn test_reads_legacy_numeric_fields() {
        let vendor: Vendor = from_document(doc! {
            "_id": ObjectId::new(),
            "name": "Old Vendor",
            "email": "old@example.com",
            "password": "hash",
            "address": "Somewhere",
            "phoneNumber": 1234567890_i64,
            "zipCode": 110001,
            "createdAt": DateTime::now(),
            "updatedAt": DateTime::now(),
        })
        .unwrap();

        assert_eq!(vendor.phone_number, "1234567890");
        assert_eq!(vendor.zip_code, "110001");
        assert_eq!(vendor.role, "vendor");
    }
}
