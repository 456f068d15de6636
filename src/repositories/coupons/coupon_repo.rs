//! # 쿠폰 리포지토리

use std::sync::Arc;
use futures_util::{future::BoxFuture, TryStreamExt};
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::coupons::Coupon;
use crate::repositories::{db_error, inserted_object_id, vendor_scope, write_error};

pub const COUPON_CONFLICT: &str = "Coupon already exists, try a different coupon name.";

/// - **컬렉션명**: `coupons`
/// - **인덱스**: coupon(unique), vendor._id
pub struct CouponRepository {
    db: Arc<Database>,
}

impl CouponRepository {
    pub const COLLECTION: &'static str = "coupons";

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                db: ServiceLocator::get::<Database>()?,
            })
        })
    }

    fn collection(&self) -> Collection<Coupon> {
        self.db.collection::<Coupon>(Self::COLLECTION)
    }

    /// 벤더의 쿠폰 목록 (최근 수정 순)
    pub async fn find_by_vendor(&self, vendor_id: &ObjectId) -> AppResult<Vec<Coupon>> {
        self.collection()
            .find(vendor_scope(vendor_id))
            .sort(doc! { "updatedAt": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    pub async fn find_owned(&self, id: &ObjectId, vendor_id: &ObjectId) -> AppResult<Option<Coupon>> {
        let mut filter = vendor_scope(vendor_id);
        filter.insert("_id", *id);

        self.collection()
            .find_one(filter)
            .await
            .map_err(db_error)
    }

    /// 다른 쿠폰이 같은 코드를 쓰고 있는지 확인합니다.
    pub async fn code_taken(&self, code: &str, except: Option<&ObjectId>) -> AppResult<bool> {
        let mut filter = doc! { "coupon": code };
        if let Some(id) = except {
            filter.insert("_id", doc! { "$ne": *id });
        }

        let count = self.collection()
            .count_documents(filter)
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }

    pub async fn create(&self, mut coupon: Coupon) -> AppResult<Coupon> {
        let result = self.collection()
            .insert_one(&coupon)
            .await
            .map_err(|e| write_error(e, COUPON_CONFLICT))?;

        coupon.id = Some(inserted_object_id(&result.inserted_id)?);
        Ok(coupon)
    }

    pub async fn replace(&self, coupon: &Coupon) -> AppResult<()> {
        let id = coupon.id.ok_or_else(|| AppError::InternalError("Coupon has no id".to_string()))?;

        self.collection()
            .replace_one(doc! { "_id": id }, coupon)
            .await
            .map_err(|e| write_error(e, COUPON_CONFLICT))?;

        Ok(())
    }

    pub async fn delete_owned(&self, id: &ObjectId, vendor_id: &ObjectId) -> AppResult<Option<Coupon>> {
        let mut filter = vendor_scope(vendor_id);
        filter.insert("_id", *id);

        self.collection()
            .find_one_and_delete(filter)
            .await
            .map_err(db_error)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let code_index = IndexModel::builder()
            .keys(doc! { "coupon": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("coupon_unique".to_string())
                .build())
            .build();

        let vendor_index = IndexModel::builder()
            .keys(doc! { "vendor._id": 1 })
            .options(IndexOptions::builder()
                .name("vendor_id".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([code_index, vendor_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

fn init_coupon_repository() -> BoxFuture<'static, AppResult<()>> {
    Box::pin(async { CouponRepository::instance()?.create_indexes().await })
}

inventory::submit! {
    RepositoryRegistration {
        name: "CouponRepository",
        collection: CouponRepository::COLLECTION,
        init: init_coupon_repository,
    }
}
