//! # 대시보드 서비스

use std::sync::Arc;
use chrono::Utc;
use futures_util::try_join;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::AppResult;
use crate::core::registry::ServiceLocator;
use crate::domain::entities::catalog::{Product, LOW_STOCK_THRESHOLD};
use crate::domain::entities::orders::LineItemStatus;
use crate::domain::models::analytics::{stock_reports, OrderSummary, SalesSummary, StockReport};
use crate::repositories::catalog::ProductRepository;
use crate::repositories::orders::OrderRepository;
use crate::services::orders::{scope_to_vendor, OrderService, OrderWithCustomer};

/// 대시보드에 보여줄 최근 주문 수
pub const RECENT_ORDERS_LIMIT: i64 = 5;

pub struct DashboardService {
    order_repo: Arc<OrderRepository>,
    product_repo: Arc<ProductRepository>,
    order_service: Arc<OrderService>,
}

impl DashboardService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                order_repo: OrderRepository::instance()?,
                product_repo: ProductRepository::instance()?,
                order_service: OrderService::instance()?,
            })
        })
    }

    /// 최근 주문 5건(고객 채움)과 벤더의 전체 상품
    pub async fn get_dashboard_data(&self, vendor_id: &ObjectId) -> AppResult<(Vec<OrderWithCustomer>, Vec<Product>)> {
        let (orders, products) = try_join!(
            self.order_repo.find_recent(vendor_id, RECENT_ORDERS_LIMIT),
            self.product_repo.find_by_vendor(vendor_id),
        )?;

        let orders = self.order_service
            .with_customers(scope_to_vendor(orders, vendor_id))
            .await?;

        Ok((orders, products))
    }

    /// 어떤 사이즈든 재고가 5개 이하인 상품
    pub async fn get_low_stock_products(&self, vendor_id: &ObjectId) -> AppResult<Vec<StockReport>> {
        let products = self.product_repo
            .find_with_stock_at_most(vendor_id, LOW_STOCK_THRESHOLD)
            .await?;

        Ok(stock_reports(&products, |product| product.low_stock(LOW_STOCK_THRESHOLD)))
    }

    /// 재고가 0인 사이즈가 있는 상품
    pub async fn get_out_of_stock_products(&self, vendor_id: &ObjectId) -> AppResult<Vec<StockReport>> {
        let products = self.product_repo.find_with_stock_at_most(vendor_id, 0).await?;

        Ok(stock_reports(&products, Product::out_of_stock))
    }

    /// 오늘/이번 주/이번 달/전체 매출과 성장률
    pub async fn calculate_total_orders(&self, vendor_id: &ObjectId) -> AppResult<SalesSummary> {
        let orders = self.order_repo.find_all_for_vendor(vendor_id).await?;
        Ok(SalesSummary::compute(&orders, vendor_id, Utc::now()))
    }

    /// 벤더 라인 아이템 상태 기준 주문 수
    pub async fn order_summary(&self, vendor_id: &ObjectId) -> AppResult<OrderSummary> {
        let (new_orders, pending_orders, completed_orders, cancelled_orders) = try_join!(
            self.order_repo.count_new(vendor_id),
            self.order_repo.count_with_item_status(vendor_id, LineItemStatus::NotProcessed),
            self.order_repo.count_with_item_status(vendor_id, LineItemStatus::Completed),
            self.order_repo.count_with_item_status(vendor_id, LineItemStatus::Cancelled),
        )?;

        Ok(OrderSummary {
            new_orders,
            pending_orders,
            completed_orders,
            cancelled_orders,
        })
    }
}
