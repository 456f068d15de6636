//! Order HTTP Handlers
//!
//! 주문은 벤더 자신의 라인 아이템만 남긴 형태로 응답하며,
//! `user` 필드에는 고객 요약(`name`, `email`, `image`)이 채워집니다.
//!
//! # Endpoints
//!
//! - `GET /orders?range=&isPaid=&paymentMethod=`
//! - `GET /orders/new`
//! - `PUT /orders/{order_id}/items/{item_id}/status`
//! - `PUT /orders/{order_id}/seen`
use actix_web::{get, put, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::orders::{OrdersQuery, UpdateLineItemStatusRequest};
use crate::domain::models::auth::AuthenticatedVendor;
use crate::services::orders::OrderService;
use crate::utils::json_utils::{populate_pairs, to_plain_json};

#[get("/orders")]
pub async fn get_orders(
    vendor: AuthenticatedVendor,
    query: web::Query<OrdersQuery>,
) -> Result<HttpResponse, AppError> {
    let orders = OrderService::instance()?
        .get_all(&vendor.vendor_id, &query)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "orders": populate_pairs(&orders, "user")?
    })))
}

#[get("/orders/new")]
pub async fn get_new_orders(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let orders = OrderService::instance()?
        .get_new_orders(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "orders": populate_pairs(&orders, "user")?
    })))
}

/// 라인 아이템 상태 변경
///
/// `Completed`로 처음 바뀔 때 재고와 판매량이 반영됩니다.
#[put("/orders/{order_id}/items/{item_id}/status")]
pub async fn update_line_item_status(
    vendor: AuthenticatedVendor,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateLineItemStatusRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let (order_id, item_id) = path.into_inner();

    let order = OrderService::instance()?
        .update_line_item_status(&vendor.vendor_id, &order_id, &item_id, &payload.status)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Order status updated successfully",
        "order": to_plain_json(&order)?
    })))
}

#[put("/orders/{order_id}/seen")]
pub async fn mark_order_seen(
    vendor: AuthenticatedVendor,
    order_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    OrderService::instance()?
        .mark_order_seen(&vendor.vendor_id, &order_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Order marked as old"
    })))
}
