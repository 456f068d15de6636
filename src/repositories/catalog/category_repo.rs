//! # 카테고리 리포지토리

use std::sync::Arc;
use futures_util::{future::BoxFuture, TryStreamExt};
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::core::errors::AppResult;
use crate::core::registry::{RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::catalog::Category;
use crate::repositories::{db_error, inserted_object_id, write_error};

pub const CATEGORY_CONFLICT: &str = "Category already exists, try a different name.";

/// - **컬렉션명**: `categories`
/// - **인덱스**: name(unique), slug(unique), updatedAt(desc)
pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    pub const COLLECTION: &'static str = "categories";

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                db: ServiceLocator::get::<Database>()?,
            })
        })
    }

    fn collection(&self) -> Collection<Category> {
        self.db.collection::<Category>(Self::COLLECTION)
    }

    /// 최근 수정 순 전체 목록
    pub async fn find_all(&self) -> AppResult<Vec<Category>> {
        self.collection()
            .find(doc! {})
            .sort(doc! { "updatedAt": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    /// 같은 이름의 다른 카테고리가 있는지 확인합니다.
    pub async fn name_taken(&self, name: &str, except: Option<&ObjectId>) -> AppResult<bool> {
        let mut filter = doc! { "name": name };
        if let Some(id) = except {
            filter.insert("_id", doc! { "$ne": *id });
        }

        let count = self.collection()
            .count_documents(filter)
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }

    pub async fn create(&self, mut category: Category) -> AppResult<Category> {
        let result = self.collection()
            .insert_one(&category)
            .await
            .map_err(|e| write_error(e, CATEGORY_CONFLICT))?;

        category.id = Some(inserted_object_id(&result.inserted_id)?);
        Ok(category)
    }

    /// 이름과 슬러그를 변경하고 변경된 문서를 반환합니다.
    pub async fn rename(&self, id: &ObjectId, name: &str, slug: &str) -> AppResult<Option<Category>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": { "name": name, "slug": slug, "updatedAt": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| write_error(e, CATEGORY_CONFLICT))
    }

    /// 삭제된 문서를 반환합니다 (이미지 정리용).
    pub async fn delete(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        self.collection()
            .find_one_and_delete(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unique".to_string())
                .build())
            .build();

        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("slug_unique".to_string())
                .build())
            .build();

        let updated_at_index = IndexModel::builder()
            .keys(doc! { "updatedAt": -1 })
            .options(IndexOptions::builder()
                .name("updated_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([name_index, slug_index, updated_at_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

fn init_category_repository() -> BoxFuture<'static, AppResult<()>> {
    Box::pin(async { CategoryRepository::instance()?.create_indexes().await })
}

inventory::submit! {
    RepositoryRegistration {
        name: "CategoryRepository",
        collection: CategoryRepository::COLLECTION,
        init: init_category_repository,
    }
}
