//! # 주문 서비스
//!
//! 벤더는 자신의 라인 아이템만 보고 변경합니다. 라인 아이템이 처음
//! `Completed`가 되는 순간 해당 상품 변형의 재고를 차감하고 판매량을 올립니다.
//!
//! ```text
//! Not Processed ──► Completed   (productCompletedAt 기록 + 재고 차감, 한 번만)
//!       │               │
//!       └──► Cancelled ◄┘       (재고 복구 없음)
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use chrono::Utc;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::dto::orders::OrdersQuery;
use crate::domain::entities::orders::{LineItem, LineItemStatus, Order};
use crate::domain::entities::users::CustomerSummary;
use crate::repositories::catalog::ProductRepository;
use crate::repositories::orders::OrderRepository;
use crate::repositories::users::UserRepository;
use crate::utils::parse_object_id;

pub const INVALID_ORDER_ID_MESSAGE: &str = "Invalid Order ID.";
pub const ORDER_NOT_FOUND_MESSAGE: &str = "Order not found";
pub const ITEM_NOT_FOUND_MESSAGE: &str = "Product not found in order";
pub const ITEM_FORBIDDEN_MESSAGE: &str = "You are not allowed to update this product.";

/// 고객 정보가 채워진 주문
pub type OrderWithCustomer = (Order, Option<CustomerSummary>);

/// 주문마다 벤더 자신의 라인 아이템만 남깁니다.
pub fn scope_to_vendor(mut orders: Vec<Order>, vendor_id: &ObjectId) -> Vec<Order> {
    for order in orders.iter_mut() {
        order.retain_vendor_items(vendor_id);
    }
    orders
}

pub fn pair_with_customers(orders: Vec<Order>, customers: &HashMap<ObjectId, CustomerSummary>) -> Vec<OrderWithCustomer> {
    orders
        .into_iter()
        .map(|order| {
            let customer = customers.get(&order.user).cloned();
            (order, customer)
        })
        .collect()
}

/// 라인 아이템 상태를 변경합니다.
///
/// 처음 완료된 경우 재고 차감 대상인 라인 아이템 복사본을 반환합니다.
///
/// # Errors
///
/// * `AppError::NotFound` - 주문에 해당 라인 아이템이 없음
/// * `AppError::AuthorizationError` - 다른 벤더의 라인 아이템
pub fn apply_status(
    order: &mut Order,
    vendor_id: &ObjectId,
    item_id: &ObjectId,
    status: LineItemStatus,
    now: DateTime,
) -> AppResult<Option<LineItem>> {
    let item = order
        .line_item_mut(item_id)
        .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND_MESSAGE.to_string()))?;

    if !item.belongs_to(vendor_id) {
        return Err(AppError::AuthorizationError(ITEM_FORBIDDEN_MESSAGE.to_string()));
    }

    let first_completion = item.transition_to(status, now);
    Ok(first_completion.then(|| item.clone()))
}

pub struct OrderService {
    order_repo: Arc<OrderRepository>,
    product_repo: Arc<ProductRepository>,
    user_repo: Arc<UserRepository>,
}

impl OrderService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                order_repo: OrderRepository::instance()?,
                product_repo: ProductRepository::instance()?,
                user_repo: UserRepository::instance()?,
            })
        })
    }

    /// 주문의 고객 요약(`name`, `email`, `image`)을 채웁니다.
    pub async fn with_customers(&self, orders: Vec<Order>) -> AppResult<Vec<OrderWithCustomer>> {
        let mut user_ids: Vec<ObjectId> = orders.iter().map(|order| order.user).collect();
        user_ids.sort();
        user_ids.dedup();

        let customers = self.user_repo.find_summaries(&user_ids).await?;
        Ok(pair_with_customers(orders, &customers))
    }

    /// 기간/결제 필터를 적용한 벤더 주문 목록 (최신순)
    pub async fn get_all(&self, vendor_id: &ObjectId, query: &OrdersQuery) -> AppResult<Vec<OrderWithCustomer>> {
        let window = query.order_range().window(Utc::now());

        let orders = self.order_repo
            .find_for_vendor(vendor_id, &window, query.paid_filter(), query.payment_method_filter())
            .await?;

        self.with_customers(scope_to_vendor(orders, vendor_id)).await
    }

    pub async fn get_new_orders(&self, vendor_id: &ObjectId) -> AppResult<Vec<OrderWithCustomer>> {
        let orders = self.order_repo.find_new(vendor_id).await?;
        self.with_customers(scope_to_vendor(orders, vendor_id)).await
    }

    /// # Errors
    ///
    /// * `AppError::ValidationError` - 알 수 없는 상태 또는 잘못된 ID
    /// * `AppError::NotFound` - 주문 또는 라인 아이템 없음
    /// * `AppError::AuthorizationError` - 다른 벤더의 라인 아이템
    pub async fn update_line_item_status(
        &self,
        vendor_id: &ObjectId,
        order_id: &str,
        item_id: &str,
        status: &str,
    ) -> AppResult<Order> {
        let status = LineItemStatus::parse(status)?;
        let order_id = parse_object_id(order_id, INVALID_ORDER_ID_MESSAGE)?;
        let item_id = parse_object_id(item_id, "Invalid Product ID.")?;

        let mut order = self.order_repo
            .find_by_id(&order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ORDER_NOT_FOUND_MESSAGE.to_string()))?;

        let now = DateTime::now();
        let completed = apply_status(&mut order, vendor_id, &item_id, status, now)?;

        // 완료 시각이 비어 있을 때만 성공하는 조건부 갱신이라, 동시 요청 중 하나만 재고를 차감합니다
        let first_completion = status == LineItemStatus::Completed
            && self.order_repo.complete_line_item(&order_id, &item_id, vendor_id, now).await?;

        if !first_completion
            && !self.order_repo.set_line_item_status(&order_id, &item_id, vendor_id, status).await?
        {
            return Err(AppError::NotFound(ITEM_NOT_FOUND_MESSAGE.to_string()));
        }

        log::info!("📦 Order {} item {} → {}", order_id, item_id, status);

        match completed {
            Some(item) if first_completion => self.record_sale(&item).await?,
            Some(item) => log::info!("Item {} was already completed by another request, stock unchanged", item.id),
            None => {}
        }

        order.retain_vendor_items(vendor_id);
        Ok(order)
    }

    /// 완료된 라인 아이템만큼 상품 변형 재고를 차감합니다.
    async fn record_sale(&self, item: &LineItem) -> AppResult<()> {
        let Some(product) = self.product_repo.find_by_id(&item.product).await? else {
            log::warn!("Completed item {} refers to missing product {}", item.id, item.product);
            return Ok(());
        };

        let owner = item.vendor.as_ref().map(|vendor| vendor.id);
        if let Some(owner) = &owner {
            if !product.is_owned_by(owner) {
                log::warn!("Product {} is no longer owned by vendor {}, stock unchanged", item.product, owner);
                return Ok(());
            }
        }

        let Some(target) = product.sale_target(&item.color.color, &item.size) else {
            log::warn!("No variant with size {} on product {}, stock unchanged", item.size, item.product);
            return Ok(());
        };

        if self.product_repo.record_sale(&item.product, owner.as_ref(), &target, item.qty).await? {
            log::info!(
                "📉 Stock updated: product {} style {} size {} sold {}",
                item.product, target.style, target.size, item.qty
            );
        } else {
            log::warn!("Product {} changed owner before the sale was recorded, stock unchanged", item.product);
        }

        Ok(())
    }

    /// `isNew = false`
    pub async fn mark_order_seen(&self, vendor_id: &ObjectId, id: &str) -> AppResult<()> {
        let order_id = parse_object_id(id, INVALID_ORDER_ID_MESSAGE)?;

        if !self.order_repo.mark_seen(&order_id, vendor_id).await? {
            return Err(AppError::NotFound(ORDER_NOT_FOUND_MESSAGE.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::product::tests::{record_sale, sample_product};
    use crate::domain::entities::orders::order::tests::{line_item, order_with};
    use crate::repositories::orders::order_repo::line_item_filter;

    #[test]
    fn test_apply_status_completes_once() {
        let vendor = ObjectId::new();
        let item = line_item(vendor, 100.0, 2, LineItemStatus::NotProcessed);
        let item_id = item.id;
        let mut order = order_with(vec![item], DateTime::now());

        let first = apply_status(&mut order, &vendor, &item_id, LineItemStatus::Completed, DateTime::now()).unwrap();
        assert_eq!(first.unwrap().qty, 2);

        let cancelled = apply_status(&mut order, &vendor, &item_id, LineItemStatus::Cancelled, DateTime::now()).unwrap();
        assert!(cancelled.is_none());
        assert!(order.products[0].product_completed_at.is_some());

        let again = apply_status(&mut order, &vendor, &item_id, LineItemStatus::Completed, DateTime::now()).unwrap();
        assert!(again.is_none());
        assert_eq!(order.products[0].status, LineItemStatus::Completed);
    }

    #[test]
    fn test_apply_status_rejects_other_vendor_item() {
        let owner = ObjectId::new();
        let item = line_item(owner, 100.0, 1, LineItemStatus::NotProcessed);
        let item_id = item.id;
        let mut order = order_with(vec![item], DateTime::now());

        let error = apply_status(&mut order, &ObjectId::new(), &item_id, LineItemStatus::Completed, DateTime::now())
            .unwrap_err();

        assert!(matches!(error, AppError::AuthorizationError(_)));
        assert_eq!(order.products[0].status, LineItemStatus::NotProcessed);
    }

    #[test]
    fn test_apply_status_unknown_item() {
        let vendor = ObjectId::new();
        let mut order = order_with(vec![line_item(vendor, 1.0, 1, LineItemStatus::NotProcessed)], DateTime::now());

        let error = apply_status(&mut order, &vendor, &ObjectId::new(), LineItemStatus::Completed, DateTime::now())
            .unwrap_err();
        assert!(matches!(error, AppError::NotFound(msg) if msg == ITEM_NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_completed_item_decrements_matching_variant_once() {
        let vendor = ObjectId::new();
        let mut product = sample_product(vendor);
        let mut item = line_item(vendor, 1000.0, 3, LineItemStatus::NotProcessed);
        item.size = "S".to_string();
        let item_id = item.id;
        let mut order = order_with(vec![item], DateTime::now());

        for _ in 0..2 {
            if let Some(completed) =
                apply_status(&mut order, &vendor, &item_id, LineItemStatus::Completed, DateTime::now()).unwrap()
            {
                record_sale(&mut product, &completed.color.color, &completed.size, completed.qty);
            }
        }

        assert_eq!(product.sub_products[0].sizes[0].qty, 7);
        assert_eq!(product.sub_products[0].sizes[0].sold, 3);
        assert_eq!(product.sub_products[0].sold, 3);
    }

    #[test]
    fn test_concurrent_completions_share_one_conditional_filter() {
        // 두 요청이 같은 주문 스냅샷을 읽어도 둘 다 같은 조건부 필터로 쓰므로
        // 서버에서는 먼저 도착한 하나만 productCompletedAt: null을 만족합니다
        let vendor = ObjectId::new();
        let item = line_item(vendor, 100.0, 2, LineItemStatus::NotProcessed);
        let item_id = item.id;
        let snapshot = order_with(vec![item], DateTime::now());

        let mut first = snapshot.clone();
        let mut second = snapshot.clone();
        assert!(apply_status(&mut first, &vendor, &item_id, LineItemStatus::Completed, DateTime::now()).unwrap().is_some());
        assert!(apply_status(&mut second, &vendor, &item_id, LineItemStatus::Completed, DateTime::now()).unwrap().is_some());

        let filter = line_item_filter(&snapshot.id, &item_id, &vendor, true);
        let matcher = filter
            .get_document("products").unwrap()
            .get_document("$elemMatch").unwrap();
        assert_eq!(matcher.get("productCompletedAt"), Some(&mongodb::bson::Bson::Null));
        assert_eq!(matcher.get_object_id("_id").unwrap(), item_id);
    }

    #[test]
    fn test_scope_and_customers() {
        let vendor = ObjectId::new();
        let order = order_with(
            vec![
                line_item(vendor, 10.0, 1, LineItemStatus::NotProcessed),
                line_item(ObjectId::new(), 20.0, 1, LineItemStatus::NotProcessed),
            ],
            DateTime::now(),
        );
        let user = order.user;
        let customers = HashMap::from([(
            user,
            CustomerSummary { id: user, name: Some("Asha".to_string()), email: "asha@example.com".to_string(), image: String::new() },
        )]);

        let scoped = scope_to_vendor(vec![order], &vendor);
        let paired = pair_with_customers(scoped, &customers);

        assert_eq!(paired[0].0.products.len(), 1);
        assert_eq!(paired[0].1.as_ref().unwrap().email, "asha@example.com");
    }
}
