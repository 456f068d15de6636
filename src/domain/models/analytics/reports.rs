//! 대시보드/분석 화면용 집계
//!
//! 조회한 문서 목록을 받아 메모리에서 계산하는 순수 함수들입니다.
//! 현재 시각은 항상 인자로 받습니다.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use crate::domain::entities::catalog::{Product, StockAlert};
use crate::domain::entities::orders::Order;
use crate::utils::time_utils::{end_of_day, from_bson, start_of_day, start_of_month, start_of_week};

/// 월별 건수 (`{ month: "Mar 2025", count }`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub count: u64,
}

/// 차트용 이름/값 쌍
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: i64,
}

/// 벤더 매출 요약
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub today_sales: f64,
    pub total_sales: f64,
    /// 이번 주(일요일 시작) 매출
    pub last_week_sales: f64,
    /// 이번 달 매출
    pub last_month_sales: f64,
    /// 오늘 매출 / 오늘 이전 누적 매출 × 100 (소수 둘째 자리)
    pub growth_percentage: f64,
}

/// 상태별 주문 수
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub new_orders: u64,
    pub pending_orders: u64,
    pub completed_orders: u64,
    pub cancelled_orders: u64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl SalesSummary {
    /// 주문 목록에서 벤더 몫의 매출을 기간별로 합산합니다.
    pub fn compute(orders: &[Order], vendor_id: &ObjectId, now: DateTime<Utc>) -> Self {
        let day_start = start_of_day(now);
        let day_end = end_of_day(now);
        let week_start = start_of_week(now);
        let month_start = start_of_month(now);

        let mut summary = SalesSummary::default();

        for order in orders {
            let amount = order.vendor_subtotal(vendor_id);
            let created_at = from_bson(order.created_at);

            summary.total_sales += amount;
            if created_at >= day_start && created_at <= day_end {
                summary.today_sales += amount;
            }
            if created_at >= week_start {
                summary.last_week_sales += amount;
            }
            if created_at >= month_start {
                summary.last_month_sales += amount;
            }
        }

        let previous = summary.total_sales - summary.today_sales;
        summary.growth_percentage = if previous > 0.0 {
            round2(summary.today_sales / previous * 100.0)
        } else {
            0.0
        };

        summary
    }
}

/// 사이즈 라벨별 판매 수량 합계. 처음 등장한 순서를 유지합니다.
pub fn size_totals(products: &[Product]) -> Vec<NamedValue> {
    let mut totals: Vec<NamedValue> = Vec::new();

    let sizes = products
        .iter()
        .flat_map(|product| product.sub_products.iter())
        .flat_map(|sub_product| sub_product.sizes.iter());

    for size in sizes {
        match totals.iter_mut().find(|entry| entry.name == size.size) {
            Some(entry) => entry.value += size.sold,
            None => totals.push(NamedValue { name: size.size.clone(), value: size.sold }),
        }
    }

    totals
}

/// 총 판매 수량 기준 상위 `limit`개 상품
pub fn top_selling(products: &[Product], limit: usize) -> Vec<NamedValue> {
    let mut ranked: Vec<NamedValue> = products
        .iter()
        .map(|product| NamedValue { name: product.name.clone(), value: product.total_sold() })
        .collect();

    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked.truncate(limit);
    ranked
}

/// 재고 경고가 있는 상품과 해당 사이즈들
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    #[serde(rename = "_id")]
    pub product_id: Option<ObjectId>,
    pub name: String,
    pub slug: String,
    pub sizes: Vec<StockAlert>,
}

/// 경고 사이즈가 하나 이상인 상품만 보고합니다.
pub fn stock_reports<F>(products: &[Product], alerts: F) -> Vec<StockReport>
where
    F: Fn(&Product) -> Vec<StockAlert>,
{
    products
        .iter()
        .filter_map(|product| {
            let sizes = alerts(product);
            (!sizes.is_empty()).then(|| StockReport {
                product_id: product.id,
                name: product.name.clone(),
                slug: product.slug.clone(),
                sizes,
            })
        })
        .collect()
}
