//! Dashboard / Analytics HTTP Handlers
//!
//! 대시보드 카드와 차트 데이터입니다. 모든 집계는 로그인한 벤더의
//! 상품과 라인 아이템으로 한정됩니다.
use actix_web::{get, HttpResponse};
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedVendor;
use crate::services::dashboard::{AnalyticsService, DashboardService};
use crate::utils::json_utils::{populate_pairs, to_plain_json};

/// 최근 주문 5건과 전체 상품
#[get("/dashboard")]
pub async fn get_dashboard_data(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let (orders, products) = DashboardService::instance()?
        .get_dashboard_data(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "orders": populate_pairs(&orders, "user")?,
        "products": to_plain_json(&products)?
    })))
}

#[get("/dashboard/low-stock")]
pub async fn get_low_stock_products(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let products = DashboardService::instance()?
        .get_low_stock_products(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "products": to_plain_json(&products)?
    })))
}

#[get("/dashboard/out-of-stock")]
pub async fn get_out_of_stock_products(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let products = DashboardService::instance()?
        .get_out_of_stock_products(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "products": to_plain_json(&products)?
    })))
}

#[get("/dashboard/sales")]
pub async fn calculate_total_orders(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let sales = DashboardService::instance()?
        .calculate_total_orders(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "sales": sales
    })))
}

#[get("/dashboard/order-summary")]
pub async fn order_summary(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let summary = DashboardService::instance()?
        .order_summary(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "summary": summary
    })))
}

#[get("/analytics/orders-per-month")]
pub async fn orders_count_per_month(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let months = AnalyticsService::instance()?
        .orders_count_per_month(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "orders": months
    })))
}

#[get("/analytics/products-per-month")]
pub async fn products_count_per_month(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let months = AnalyticsService::instance()?
        .products_count_per_month(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "products": months
    })))
}

/// 사이즈별 누적 판매량. 상품이 없으면 404.
#[get("/analytics/product-sizes")]
pub async fn get_product_sizes(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let sizes = AnalyticsService::instance()?
        .get_product_sizes(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "sizes": sizes
    })))
}

#[get("/analytics/top-selling")]
pub async fn get_top_selling_products(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let products = AnalyticsService::instance()?
        .get_top_selling_products(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "products": products
    })))
}
