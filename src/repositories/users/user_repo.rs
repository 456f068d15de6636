//! # 고객 리포지토리

use std::collections::HashMap;
use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document}, Collection};
use crate::core::errors::AppResult;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::entities::users::CustomerSummary;
use crate::repositories::db_error;

/// 고객 요약 projection (`{ name: 1, email: 1, image: 1 }`)
pub(crate) fn summary_projection() -> Document {
    CustomerSummary::PROJECTION
        .iter()
        .fold(Document::new(), |mut projection, field| {
            projection.insert(*field, 1);
            projection
        })
}

/// - **컬렉션명**: `users` (읽기 전용, 인덱스는 스토어프론트 소유)
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                db: ServiceLocator::get::<Database>()?,
            })
        })
    }

    fn collection(&self) -> Collection<CustomerSummary> {
        self.db.collection::<CustomerSummary>(Self::COLLECTION)
    }

    /// 고객 ID 목록의 요약을 ID별로 돌려줍니다. 없는 고객은 결과에서 빠집니다.
    pub async fn find_summaries(&self, ids: &[ObjectId]) -> AppResult<HashMap<ObjectId, CustomerSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let summaries: Vec<CustomerSummary> = self.collection()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .projection(summary_projection())
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)?;

        Ok(summaries.into_iter().map(|summary| (summary.id, summary)).collect())
    }
}
