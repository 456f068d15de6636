//! # 주문 리포지토리
//!
//! 주문은 여러 벤더의 라인 아이템을 담고 있으므로, 벤더 범위 조회는
//! `products` 배열에 대한 `$elemMatch`로 표현합니다.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use futures_util::{future::BoxFuture, TryStreamExt};
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::core::errors::AppResult;
use crate::core::registry::{RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::orders::{LineItemStatus, Order};
use crate::repositories::{db_error, vendor_scope};
use crate::utils::time_utils::{to_bson, DateWindow};

/// 벤더의 라인 아이템을 하나 이상 가진 주문
pub(crate) fn has_vendor_item(vendor_id: &ObjectId) -> Document {
    doc! { "products": { "$elemMatch": vendor_scope(vendor_id) } }
}

/// 주문 목록 조회 필터
///
/// 기간은 `createdAt` 기준 닫힌 구간이며, 결제 여부와 결제 수단은 주어진 경우에만 거릅니다.
pub(crate) fn vendor_orders_filter(
    vendor_id: &ObjectId,
    window: &DateWindow,
    is_paid: Option<bool>,
    payment_method: Option<&str>,
) -> Document {
    let mut filter = has_vendor_item(vendor_id);
    filter.insert(
        "createdAt",
        doc! { "$gte": to_bson(window.from), "$lte": to_bson(window.to) },
    );

    if let Some(paid) = is_paid {
        filter.insert("isPaid", paid);
    }
    if let Some(method) = payment_method {
        filter.insert("paymentMethod", method);
    }

    filter
}

/// 벤더의 라인 아이템 중 하나가 `status`인 주문
pub(crate) fn item_status_filter(vendor_id: &ObjectId, status: LineItemStatus) -> Document {
    let mut item = vendor_scope(vendor_id);
    item.insert("status", status.as_str());

    doc! { "products": { "$elemMatch": item } }
}

/// 주문 안에서 벤더 소유의 특정 라인 아이템을 가리키는 필터
///
/// `open_only`이면 아직 완료 시각이 없는 라인 아이템만 매칭합니다.
/// 완료 처리는 이 조건으로 한 번만 성공합니다.
pub(crate) fn line_item_filter(
    order_id: &ObjectId,
    item_id: &ObjectId,
    vendor_id: &ObjectId,
    open_only: bool,
) -> Document {
    let mut item = vendor_scope(vendor_id);
    item.insert("_id", *item_id);
    if open_only {
        item.insert("productCompletedAt", Bson::Null);
    }

    doc! { "_id": *order_id, "products": { "$elemMatch": item } }
}

/// [`line_item_filter`]가 매칭한 라인 아이템만 변경하는 `$set`
pub(crate) fn line_item_status_update(
    status: LineItemStatus,
    completed_at: Option<bson::DateTime>,
    now: bson::DateTime,
) -> Document {
    let mut set = doc! { "products.$.status": status.as_str(), "updatedAt": now };
    if let Some(completed_at) = completed_at {
        set.insert("products.$.productCompletedAt", completed_at);
    }

    doc! { "$set": set }
}

/// - **컬렉션명**: `orders`
/// - **인덱스**: products.vendor._id + createdAt
///
/// 주문 생성은 스토어프론트가 담당합니다.
pub struct OrderRepository {
    db: Arc<Database>,
}

impl OrderRepository {
    pub const COLLECTION: &'static str = "orders";

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                db: ServiceLocator::get::<Database>()?,
            })
        })
    }

    fn collection(&self) -> Collection<Order> {
        self.db.collection::<Order>(Self::COLLECTION)
    }

    /// 최신순 조회. `limit`이 주어지면 그 개수까지만 가져옵니다.
    pub async fn find_newest_first(&self, filter: Document, limit: Option<i64>) -> AppResult<Vec<Order>> {
        let collection = self.collection();
        let mut find = collection
            .find(filter)
            .sort(doc! { "createdAt": -1 });

        if let Some(limit) = limit {
            find = find.limit(limit);
        }

        find.await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    pub async fn find_for_vendor(
        &self,
        vendor_id: &ObjectId,
        window: &DateWindow,
        is_paid: Option<bool>,
        payment_method: Option<&str>,
    ) -> AppResult<Vec<Order>> {
        self.find_newest_first(vendor_orders_filter(vendor_id, window, is_paid, payment_method), None)
            .await
    }

    /// 아직 확인하지 않은 주문 (`isNew = true`)
    pub async fn find_new(&self, vendor_id: &ObjectId) -> AppResult<Vec<Order>> {
        let mut filter = has_vendor_item(vendor_id);
        filter.insert("isNew", true);

        self.find_newest_first(filter, None).await
    }

    pub async fn find_recent(&self, vendor_id: &ObjectId, limit: i64) -> AppResult<Vec<Order>> {
        self.find_newest_first(has_vendor_item(vendor_id), Some(limit)).await
    }

    /// 매출 집계용 전체 주문
    pub async fn find_all_for_vendor(&self, vendor_id: &ObjectId) -> AppResult<Vec<Order>> {
        self.find_newest_first(has_vendor_item(vendor_id), None).await
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Order>> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    /// 라인 아이템을 처음으로 완료 처리합니다.
    ///
    /// 이미 완료 시각이 있으면 아무것도 바꾸지 않고 `false`를 반환하므로,
    /// 동시에 들어온 완료 요청 중 하나만 `true`를 받습니다.
    pub async fn complete_line_item(
        &self,
        order_id: &ObjectId,
        item_id: &ObjectId,
        vendor_id: &ObjectId,
        now: bson::DateTime,
    ) -> AppResult<bool> {
        let result = self.collection()
            .update_one(
                line_item_filter(order_id, item_id, vendor_id, true),
                line_item_status_update(LineItemStatus::Completed, Some(now), now),
            )
            .await
            .map_err(db_error)?;

        Ok(result.modified_count == 1)
    }

    /// 라인 아이템 상태만 바꿉니다. 완료 시각은 건드리지 않습니다.
    pub async fn set_line_item_status(
        &self,
        order_id: &ObjectId,
        item_id: &ObjectId,
        vendor_id: &ObjectId,
        status: LineItemStatus,
    ) -> AppResult<bool> {
        let result = self.collection()
            .update_one(
                line_item_filter(order_id, item_id, vendor_id, false),
                line_item_status_update(status, None, bson::DateTime::now()),
            )
            .await
            .map_err(db_error)?;

        Ok(result.matched_count > 0)
    }

    /// `isNew = false`로 표시합니다. 벤더의 아이템이 없는 주문이면 `false`입니다.
    pub async fn mark_seen(&self, id: &ObjectId, vendor_id: &ObjectId) -> AppResult<bool> {
        let mut filter = has_vendor_item(vendor_id);
        filter.insert("_id", *id);

        let result = self.collection()
            .update_one(filter, doc! { "$set": { "isNew": false } })
            .await
            .map_err(db_error)?;

        Ok(result.matched_count > 0)
    }

    pub async fn count(&self, filter: Document) -> AppResult<u64> {
        self.collection()
            .count_documents(filter)
            .await
            .map_err(db_error)
    }

    pub async fn count_new(&self, vendor_id: &ObjectId) -> AppResult<u64> {
        let mut filter = has_vendor_item(vendor_id);
        filter.insert("isNew", true);

        self.count(filter).await
    }

    pub async fn count_with_item_status(&self, vendor_id: &ObjectId, status: LineItemStatus) -> AppResult<u64> {
        self.count(item_status_filter(vendor_id, status)).await
    }

    /// `[from, to)` 구간에 생성된 벤더 주문 수
    pub async fn count_created_between(
        &self,
        vendor_id: &ObjectId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut filter = has_vendor_item(vendor_id);
        filter.insert("createdAt", doc! { "$gte": to_bson(from), "$lt": to_bson(to) });

        self.count(filter).await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let vendor_index = IndexModel::builder()
            .keys(doc! { "products.vendor._id": 1, "createdAt": -1 })
            .options(IndexOptions::builder()
                .name("line_item_vendor_created_at".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([vendor_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

fn init_order_repository() -> BoxFuture<'static, AppResult<()>> {
    Box::pin(async { OrderRepository::instance()?.create_indexes().await })
}

inventory::submit! {
    RepositoryRegistration {
        name: "OrderRepository",
        collection: OrderRepository::COLLECTION,
        init: init_order_repository,
    }
}
