//! # 쿠폰 서비스
//!
//! 쿠폰은 벤더 소유이며, 변경 작업은 벤더의 최신 쿠폰 목록을 반환합니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::dto::coupons::CouponRequest;
use crate::domain::entities::coupons::Coupon;
use crate::repositories::coupons::{CouponRepository, COUPON_CONFLICT};
use crate::services::vendors::VendorService;
use crate::utils::parse_object_id;

pub const INVALID_COUPON_ID_MESSAGE: &str = "Invalid Coupon ID.";
pub const COUPON_NOT_FOUND_MESSAGE: &str = "No Coupon found with this Id!";

pub struct CouponService {
    coupon_repo: Arc<CouponRepository>,
    vendor_service: Arc<VendorService>,
}

impl CouponService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                coupon_repo: CouponRepository::instance()?,
                vendor_service: VendorService::instance()?,
            })
        })
    }

    pub async fn get_all(&self, vendor_id: &ObjectId) -> AppResult<Vec<Coupon>> {
        self.coupon_repo.find_by_vendor(vendor_id).await
    }

    /// # Errors
    ///
    /// * `AppError::ValidationError` - 코드 길이, 할인율, 기간 오류
    /// * `AppError::NotFound` - 벤더 없음
    /// * `AppError::ConflictError` - 이미 사용 중인 코드
    pub async fn create(&self, vendor_id: &ObjectId, request: CouponRequest) -> AppResult<Vec<Coupon>> {
        let terms = request.terms()?;
        let vendor = self.vendor_service.snapshot(vendor_id).await?;

        if self.coupon_repo.code_taken(&terms.code, None).await? {
            return Err(AppError::ConflictError(COUPON_CONFLICT.to_string()));
        }

        let created = self.coupon_repo.create(Coupon::new(terms, vendor)).await?;
        log::info!("🏷️ Coupon {} created by vendor {}", created.coupon, vendor_id);

        self.get_all(vendor_id).await
    }

    pub async fn delete(&self, vendor_id: &ObjectId, id: &str) -> AppResult<Vec<Coupon>> {
        let coupon_id = parse_object_id(id, INVALID_COUPON_ID_MESSAGE)?;

        self.coupon_repo
            .delete_owned(&coupon_id, vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(COUPON_NOT_FOUND_MESSAGE.to_string()))?;

        self.get_all(vendor_id).await
    }

    /// 다른 쿠폰과 코드가 겹치면 409입니다. 자기 자신의 코드는 유지할 수 있습니다.
    pub async fn update(&self, vendor_id: &ObjectId, id: &str, request: CouponRequest) -> AppResult<Vec<Coupon>> {
        let coupon_id = parse_object_id(id, INVALID_COUPON_ID_MESSAGE)?;
        let terms = request.terms()?;

        let mut coupon = self.coupon_repo
            .find_owned(&coupon_id, vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(COUPON_NOT_FOUND_MESSAGE.to_string()))?;

        if self.coupon_repo.code_taken(&terms.code, Some(&coupon_id)).await? {
            return Err(AppError::ConflictError(COUPON_CONFLICT.to_string()));
        }

        coupon.apply(terms);
        self.coupon_repo.replace(&coupon).await?;

        self.get_all(vendor_id).await
    }
}
