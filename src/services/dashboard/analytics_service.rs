//! # 분석 서비스
//!
//! 월별 집계는 현재 달로 끝나는 12개의 달력 월 버킷을 동시에 셉니다.

use std::sync::Arc;
use chrono::Utc;
use futures_util::future::try_join_all;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::entities::catalog::Product;
use crate::domain::models::analytics::{size_totals, top_selling, MonthCount, NamedValue};
use crate::repositories::catalog::ProductRepository;
use crate::repositories::orders::OrderRepository;
use crate::utils::time_utils::{last_twelve_months, MonthBucket};

pub const TOP_SELLING_LIMIT: usize = 5;
pub const NO_PRODUCTS_MESSAGE: &str = "No products found.";

/// 버킷 라벨과 건수를 묶습니다.
pub fn label_counts(buckets: &[MonthBucket], counts: Vec<u64>) -> Vec<MonthCount> {
    buckets
        .iter()
        .zip(counts)
        .map(|(bucket, count)| MonthCount { month: bucket.label.clone(), count })
        .collect()
}

/// 상품 기반 분석은 벤더 상품이 하나도 없으면 404입니다.
pub fn require_products(products: Vec<Product>) -> AppResult<Vec<Product>> {
    if products.is_empty() {
        return Err(AppError::NotFound(NO_PRODUCTS_MESSAGE.to_string()));
    }
    Ok(products)
}

pub struct AnalyticsService {
    order_repo: Arc<OrderRepository>,
    product_repo: Arc<ProductRepository>,
}

impl AnalyticsService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                order_repo: OrderRepository::instance()?,
                product_repo: ProductRepository::instance()?,
            })
        })
    }

    pub async fn orders_count_per_month(&self, vendor_id: &ObjectId) -> AppResult<Vec<MonthCount>> {
        let buckets = last_twelve_months(Utc::now());

        let counts = try_join_all(
            buckets
                .iter()
                .map(|bucket| self.order_repo.count_created_between(vendor_id, bucket.start, bucket.end)),
        )
        .await?;

        Ok(label_counts(&buckets, counts))
    }

    pub async fn products_count_per_month(&self, vendor_id: &ObjectId) -> AppResult<Vec<MonthCount>> {
        let buckets = last_twelve_months(Utc::now());

        let counts = try_join_all(
            buckets
                .iter()
                .map(|bucket| self.product_repo.count_created_between(vendor_id, bucket.start, bucket.end)),
        )
        .await?;

        Ok(label_counts(&buckets, counts))
    }

    /// 사이즈 라벨별 판매량
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 벤더 상품이 없음
    pub async fn get_product_sizes(&self, vendor_id: &ObjectId) -> AppResult<Vec<NamedValue>> {
        let products = require_products(self.product_repo.find_by_vendor(vendor_id).await?)?;
        Ok(size_totals(&products))
    }

    /// 판매량 상위 상품
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 벤더 상품이 없음
    pub async fn get_top_selling_products(&self, vendor_id: &ObjectId) -> AppResult<Vec<NamedValue>> {
        let products = require_products(self.product_repo.find_by_vendor(vendor_id).await?)?;
        Ok(top_selling(&products, TOP_SELLING_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::domain::entities::catalog::product::tests::sample_product;

    #[test]
    fn test_product_analytics_need_products() {
        let error = require_products(vec![]).unwrap_err();
        assert!(matches!(error, AppError::NotFound(msg) if msg == NO_PRODUCTS_MESSAGE));

        let products = require_products(vec![sample_product(ObjectId::new())]).unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_label_counts_follow_bucket_order() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let buckets = last_twelve_months(now);

        let counts: Vec<u64> = (0..12).collect();
        let labelled = label_counts(&buckets, counts);

        assert_eq!(labelled.len(), 12);
        assert_eq!(labelled[0], MonthCount { month: "Apr 2024".to_string(), count: 0 });
        assert_eq!(labelled[11], MonthCount { month: "Mar 2025".to_string(), count: 11 });
    }
}
