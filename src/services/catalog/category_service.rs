//! # 카테고리 서비스
//!
//! 카테고리는 모든 벤더가 공유하며, 변경 작업은 항상 최신 전체 목록
//! (`updatedAt` 내림차순)을 반환합니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::dto::catalog::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::entities::catalog::Category;
use crate::media::MediaStore;
use crate::repositories::catalog::{CategoryRepository, CATEGORY_CONFLICT};
use crate::services::catalog::{discard_images, media_store, release_images, upload_images};
use crate::services::vendors::VendorService;
use crate::utils::parse_object_id;
use crate::utils::string_utils::slugify;

pub const INVALID_CATEGORY_ID_MESSAGE: &str = "Invalid Category ID.";
pub const CATEGORY_NOT_FOUND_MESSAGE: &str = "Category not found.";

pub struct CategoryService {
    category_repo: Arc<CategoryRepository>,
    vendor_service: Arc<VendorService>,
    media: Arc<dyn MediaStore>,
}

impl CategoryService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                category_repo: CategoryRepository::instance()?,
                vendor_service: VendorService::instance()?,
                media: media_store()?,
            })
        })
    }

    pub async fn get_all(&self) -> AppResult<Vec<Category>> {
        self.category_repo.find_all().await
    }

    /// 이름 중복을 먼저 확인한 뒤 이미지를 올리고 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 같은 이름의 카테고리가 있음
    /// * `AppError::ExternalServiceError` - 이미지 업로드 실패
    pub async fn create(&self, vendor_id: &ObjectId, request: CreateCategoryRequest) -> AppResult<Vec<Category>> {
        let name = request.name.trim().to_string();

        if self.category_repo.name_taken(&name, None).await? {
            return Err(AppError::ConflictError(CATEGORY_CONFLICT.to_string()));
        }

        let vendor = self.vendor_service.snapshot(vendor_id).await?;
        let images = upload_images(self.media.as_ref(), &request.images).await?;
        let category = Category::new(name, images.clone(), Some(vendor));

        if let Err(e) = self.category_repo.create(category).await {
            discard_images(self.media.as_ref(), &images).await;
            return Err(e);
        }

        log::info!("📁 Category created by vendor {}", vendor_id);
        self.get_all().await
    }

    /// 카테고리를 삭제하고 이미지를 정리합니다.
    pub async fn delete(&self, id: &str) -> AppResult<Vec<Category>> {
        let category_id = parse_object_id(id, INVALID_CATEGORY_ID_MESSAGE)?;

        let deleted = self.category_repo
            .delete(&category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(CATEGORY_NOT_FOUND_MESSAGE.to_string()))?;

        release_images(self.media.as_ref(), "Category", &deleted.image_public_ids()).await;
        self.get_all().await
    }

    /// 이름과 슬러그를 변경합니다.
    pub async fn update(&self, id: &str, request: UpdateCategoryRequest) -> AppResult<Vec<Category>> {
        let category_id = parse_object_id(id, INVALID_CATEGORY_ID_MESSAGE)?;
        let name = request.name.trim().to_string();

        if self.category_repo.name_taken(&name, Some(&category_id)).await? {
            return Err(AppError::ConflictError(CATEGORY_CONFLICT.to_string()));
        }

        self.category_repo
            .rename(&category_id, &name, &slugify(&name))
            .await?
            .ok_or_else(|| AppError::NotFound(CATEGORY_NOT_FOUND_MESSAGE.to_string()))?;

        self.get_all().await
    }
}
