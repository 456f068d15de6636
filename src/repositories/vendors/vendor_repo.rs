//! # 벤더 리포지토리
//!
//! `vendors` 컬렉션의 데이터 액세스 계층입니다.

use std::sync::Arc;
use futures_util::future::BoxFuture;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, Collection, IndexModel};
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::vendors::Vendor;
use crate::repositories::{db_error, inserted_object_id, write_error};

/// 벤더 데이터 액세스 리포지토리
///
/// - **컬렉션명**: `vendors`
/// - **인덱스**: email(unique)
pub struct VendorRepository {
    db: Arc<Database>,
}

impl VendorRepository {
    pub const COLLECTION: &'static str = "vendors";

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                db: ServiceLocator::get::<Database>()?,
            })
        })
    }

    fn collection(&self) -> Collection<Vendor> {
        self.db.collection::<Vendor>(Self::COLLECTION)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Vendor>> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    /// 이메일로 벤더 조회 (로그인)
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Vendor>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(db_error)
    }

    /// 새 벤더 저장
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일이 이미 등록된 경우
    pub async fn create(&self, mut vendor: Vendor) -> AppResult<Vendor> {
        if self.find_by_email(&vendor.email).await?.is_some() {
            return Err(AppError::ConflictError("Vendor already exists with this email.".to_string()));
        }

        let result = self.collection()
            .insert_one(&vendor)
            .await
            .map_err(|e| write_error(e, "Vendor already exists with this email."))?;

        vendor.id = Some(inserted_object_id(&result.inserted_id)?);
        Ok(vendor)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

fn init_vendor_repository() -> BoxFuture<'static, AppResult<()>> {
    Box::pin(async { VendorRepository::instance()?.create_indexes().await })
}

inventory::submit! {
    RepositoryRegistration {
        name: "VendorRepository",
        collection: VendorRepository::COLLECTION,
        init: init_vendor_repository,
    }
}
