//! # 서브카테고리 서비스

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::dto::catalog::{CreateSubCategoryRequest, UpdateSubCategoryRequest};
use crate::domain::entities::catalog::{Category, SubCategory};
use crate::media::MediaStore;
use crate::repositories::catalog::{CategoryRepository, SubCategoryRepository, SUB_CATEGORY_CONFLICT};
use crate::services::catalog::{discard_images, media_store, release_images, upload_images, CATEGORY_NOT_FOUND_MESSAGE, INVALID_CATEGORY_ID_MESSAGE};
use crate::services::vendors::VendorService;
use crate::utils::parse_object_id;
use crate::utils::string_utils::slugify;

pub const INVALID_SUB_CATEGORY_ID_MESSAGE: &str = "Invalid Sub Category ID.";
pub const SUB_CATEGORY_NOT_FOUND_MESSAGE: &str = "Sub Category not found.";
pub const NO_CATEGORY_PROVIDED_MESSAGE: &str = "No Category provided.";
pub const PARENT_NOT_FOUND_MESSAGE: &str = "Parent category not found.";

/// 부모 카테고리가 채워진 서브카테고리
pub type SubCategoryWithParent = (SubCategory, Option<Category>);

/// 서브카테고리마다 부모 카테고리를 찾아 붙입니다. 순서는 유지됩니다.
pub fn pair_with_parents(sub_categories: Vec<SubCategory>, categories: &[Category]) -> Vec<SubCategoryWithParent> {
    let by_id: HashMap<ObjectId, &Category> = categories
        .iter()
        .filter_map(|category| category.id.map(|id| (id, category)))
        .collect();

    sub_categories
        .into_iter()
        .map(|sub| {
            let parent = by_id.get(&sub.parent).map(|category| (*category).clone());
            (sub, parent)
        })
        .collect()
}

pub struct SubCategoryService {
    sub_category_repo: Arc<SubCategoryRepository>,
    category_repo: Arc<CategoryRepository>,
    vendor_service: Arc<VendorService>,
    media: Arc<dyn MediaStore>,
}

impl SubCategoryService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                sub_category_repo: SubCategoryRepository::instance()?,
                category_repo: CategoryRepository::instance()?,
                vendor_service: VendorService::instance()?,
                media: media_store()?,
            })
        })
    }

    /// 부모 ID가 올바르고 실제로 존재하는지 확인합니다.
    async fn existing_parent(&self, parent: &str) -> AppResult<ObjectId> {
        let parent_id = parse_object_id(parent, INVALID_CATEGORY_ID_MESSAGE)?;

        if self.category_repo.find_by_id(&parent_id).await?.is_none() {
            return Err(AppError::NotFound(PARENT_NOT_FOUND_MESSAGE.to_string()));
        }
        Ok(parent_id)
    }

    /// 전체 서브카테고리 (부모 채움)
    pub async fn get_all(&self) -> AppResult<Vec<SubCategoryWithParent>> {
        let sub_categories = self.sub_category_repo.find_all().await?;

        let mut parent_ids: Vec<ObjectId> = sub_categories.iter().map(|sub| sub.parent).collect();
        parent_ids.sort();
        parent_ids.dedup();

        let parents = self.category_repo.find_by_ids(&parent_ids).await?;
        let paired = pair_with_parents(sub_categories, &parents);

        let orphans = orphan_count(&paired);
        if orphans > 0 {
            log::warn!("{} sub categories point to a missing parent", orphans);
        }
        Ok(paired)
    }

    /// `{categories, subCategories}`
    pub async fn get_all_with_categories(&self) -> AppResult<(Vec<Category>, Vec<SubCategoryWithParent>)> {
        let categories = self.category_repo.find_all().await?;
        let sub_categories = self.sub_category_repo.find_all().await?;
        let paired = pair_with_parents(sub_categories, &categories);

        Ok((categories, paired))
    }

    /// 카테고리 아래 서브카테고리 이름 목록
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 카테고리가 주어지지 않았거나 잘못된 ID
    pub async fn get_by_parent(&self, category: Option<&str>) -> AppResult<Vec<SubCategory>> {
        let category = category.ok_or_else(|| AppError::ValidationError(NO_CATEGORY_PROVIDED_MESSAGE.to_string()))?;
        let parent_id = parse_object_id(category, INVALID_CATEGORY_ID_MESSAGE)?;

        self.sub_category_repo.find_by_parent(&parent_id).await
    }

    pub async fn create(&self, vendor_id: &ObjectId, request: CreateSubCategoryRequest) -> AppResult<Vec<SubCategoryWithParent>> {
        let name = request.name.trim().to_string();

        if self.sub_category_repo.name_taken(&name, None).await? {
            return Err(AppError::ConflictError(SUB_CATEGORY_CONFLICT.to_string()));
        }

        let parent_id = self.existing_parent(&request.parent).await?;
        let vendor = self.vendor_service.snapshot(vendor_id).await?;
        let images = upload_images(self.media.as_ref(), &request.images).await?;
        let sub_category = SubCategory::new(name, parent_id, images.clone(), Some(vendor));

        if let Err(e) = self.sub_category_repo.create(sub_category).await {
            discard_images(self.media.as_ref(), &images).await;
            return Err(e);
        }

        self.get_all().await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Vec<SubCategoryWithParent>> {
        let sub_category_id = parse_object_id(id, INVALID_SUB_CATEGORY_ID_MESSAGE)?;

        let deleted = self.sub_category_repo
            .delete(&sub_category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(SUB_CATEGORY_NOT_FOUND_MESSAGE.to_string()))?;

        release_images(self.media.as_ref(), "SubCategory", &deleted.image_public_ids()).await;
        self.get_all().await
    }

    /// 이름, 슬러그, 부모를 변경합니다. 부모는 존재하는 카테고리여야 합니다.
    pub async fn update(&self, id: &str, request: UpdateSubCategoryRequest) -> AppResult<Vec<SubCategoryWithParent>> {
        let sub_category_id = parse_object_id(id, INVALID_SUB_CATEGORY_ID_MESSAGE)?;
        let name = request.name.trim().to_string();

        let parent_id = self.existing_parent(&request.parent).await?;
        if self.sub_category_repo.name_taken(&name, Some(&sub_category_id)).await? {
            return Err(AppError::ConflictError(SUB_CATEGORY_CONFLICT.to_string()));
        }

        self.sub_category_repo
            .update(&sub_category_id, &name, &slugify(&name), &parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound(SUB_CATEGORY_NOT_FOUND_MESSAGE.to_string()))?;

        self.get_all().await
    }
}

/// 부모 카테고리를 찾지 못한 서브카테고리 수
pub(crate) fn orphan_count(paired: &[SubCategoryWithParent]) -> usize {
    paired.iter().filter(|(_, parent)| parent.is_none()).count()
}
