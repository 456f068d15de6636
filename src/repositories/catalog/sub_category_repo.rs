//! # 서브카테고리 리포지토리

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
use crate::domain::entities::catalog::SubCategory;
use crate::repositories::{db_error, inserted_object_id, write_error};

pub const SUB_CATEGORY_CONFLICT: &str = "Sub Category already exists.";

/// - **컬렉션명**: `subcategories`
/// - **인덱스**: name(unique), slug(unique), parent
pub struct SubCategoryRepository {
    db: Arc<Database>,
}

impl SubCategoryRepository {
    pub const COLLECTION: &'static str = "subcategories";

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                db: ServiceLocator::get::<Database>()?,
            })
        })
    }

    fn collection(&self) -> Collection<SubCategory> {
        self.db.collection::<SubCategory>(Self::COLLECTION)
    }

    pub async fn find_all(&self) -> AppResult<Vec<SubCategory>> {
        self.collection()
            .find(doc! {})
            .sort(doc! { "updatedAt": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    pub async fn find_by_parent(&self, parent: &ObjectId) -> AppResult<Vec<SubCategory>> {
        self.collection()
            .find(doc! { "parent": *parent })
            .sort(doc! { "name": 1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

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

    pub async fn create(&self, mut sub_category: SubCategory) -> AppResult<SubCategory> {
        let result = self.collection()
            .insert_one(&sub_category)
            .await
            .map_err(|e| write_error(e, SUB_CATEGORY_CONFLICT))?;

        sub_category.id = Some(inserted_object_id(&result.inserted_id)?);
        Ok(sub_category)
    }

    pub async fn update(
        &self,
        id: &ObjectId,
        name: &str,
        slug: &str,
        parent: &ObjectId,
    ) -> AppResult<Option<SubCategory>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": {
                    "name": name,
                    "slug": slug,
                    "parent": *parent,
                    "updatedAt": DateTime::now(),
                } },
            )
            .with_options(options)
            .await
            .map_err(|e| write_error(e, SUB_CATEGORY_CONFLICT))
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<Option<SubCategory>> {
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

        let parent_index = IndexModel::builder()
            .keys(doc! { "parent": 1 })
            .options(IndexOptions::builder()
                .name("parent".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([name_index, slug_index, parent_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

fn init_sub_category_repository() -> BoxFuture<'static, AppResult<()>> {
    Box::pin(async { SubCategoryRepository::instance()?.create_indexes().await })
}

inventory::submit! {
    RepositoryRegistration {
        name: "SubCategoryRepository",
        collection: SubCategoryRepository::COLLECTION,
        init: init_sub_category_repository,
    }
}
