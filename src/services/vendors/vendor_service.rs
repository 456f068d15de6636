//! # 벤더 프로필 서비스
//!
//! 벤더 조회와 존재/승인 확인, 그리고 다른 서비스가 문서에 임베드할
//! 벤더 스냅샷 조회를 담당합니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::dto::vendors::VendorResponse;
use crate::domain::entities::common::VendorSnapshot;
use crate::domain::entities::vendors::Vendor;
use crate::repositories::vendors::VendorRepository;
use crate::utils::parse_object_id;

pub const INVALID_VENDOR_ID_MESSAGE: &str = "Invalid Vendor ID.";
pub const VENDOR_NOT_FOUND_MESSAGE: &str = "Vendor not found.";
pub const VENDOR_NOT_VERIFIED_MESSAGE: &str = "Vendor is not verified.";

/// 승인되지 않은 벤더는 403입니다.
pub fn ensure_verified(vendor: &Vendor) -> AppResult<()> {
    if vendor.verified {
        Ok(())
    } else {
        Err(AppError::AuthorizationError(VENDOR_NOT_VERIFIED_MESSAGE.to_string()))
    }
}

pub struct VendorService {
    vendor_repo: Arc<VendorRepository>,
}

impl VendorService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                vendor_repo: VendorRepository::instance()?,
            })
        })
    }

    async fn find(&self, vendor_id: &ObjectId) -> AppResult<Vendor> {
        self.vendor_repo
            .find_by_id(vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(VENDOR_NOT_FOUND_MESSAGE.to_string()))
    }

    /// 경로의 벤더 ID로 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 잘못된 ObjectId ("Invalid Vendor ID.")
    /// * `AppError::NotFound` - 벤더 없음 ("Vendor not found.")
    pub async fn get_single_vendor(&self, id: &str) -> AppResult<VendorResponse> {
        let vendor_id = parse_object_id(id, INVALID_VENDOR_ID_MESSAGE)?;
        self.find(&vendor_id).await.map(VendorResponse::from)
    }

    /// 존재하면 `Ok(())`
    pub async fn check_vendor(&self, id: &str) -> AppResult<()> {
        let vendor_id = parse_object_id(id, INVALID_VENDOR_ID_MESSAGE)?;
        self.find(&vendor_id).await.map(|_| ())
    }

    /// 존재하고 승인된 경우에만 `Ok(())`
    pub async fn check_vendor_verified(&self, id: &str) -> AppResult<()> {
        let vendor_id = parse_object_id(id, INVALID_VENDOR_ID_MESSAGE)?;
        let vendor = self.find(&vendor_id).await?;
        ensure_verified(&vendor)
    }

    /// 토큰의 벤더
    pub async fn current_vendor(&self, vendor_id: &ObjectId) -> AppResult<VendorResponse> {
        self.find(vendor_id).await.map(VendorResponse::from)
    }

    /// 문서에 임베드할 벤더 스냅샷. 벤더가 없으면 404입니다.
    pub async fn snapshot(&self, vendor_id: &ObjectId) -> AppResult<VendorSnapshot> {
        self.find(vendor_id).await?.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(verified: bool) -> Vendor {
        let mut vendor = Vendor::new(
            "Loom House".to_string(),
            "loom@example.com".to_string(),
            "hash".to_string(),
            "12 Weaver St".to_string(),
            "9876543210".to_string(),
            "560001".to_string(),
            None,
        );
        vendor.verified = verified;
        vendor
    }

    #[test]
    fn test_ensure_verified() {
        assert!(ensure_verified(&vendor(true)).is_ok());

        let error = ensure_verified(&vendor(false)).unwrap_err();
        assert!(matches!(error, AppError::AuthorizationError(msg) if msg == VENDOR_NOT_VERIFIED_MESSAGE));
    }
}
