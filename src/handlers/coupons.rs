//! Coupon HTTP Handlers
//!
//! 모든 응답은 변경 후 벤더의 쿠폰 목록을 포함합니다.
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::coupons::CouponRequest;
use crate::domain::models::auth::AuthenticatedVendor;
use crate::services::coupons::CouponService;
use crate::utils::json_utils::to_plain_json;

#[get("/coupons")]
pub async fn get_coupons(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let coupons = CouponService::instance()?
        .get_all(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "coupons": to_plain_json(&coupons)?
    })))
}

#[post("/coupons")]
pub async fn create_coupon(
    vendor: AuthenticatedVendor,
    payload: web::Json<CouponRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let coupons = CouponService::instance()?
        .create(&vendor.vendor_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Coupon created successfully!",
        "coupons": to_plain_json(&coupons)?
    })))
}

#[put("/coupons/{coupon_id}")]
pub async fn update_coupon(
    vendor: AuthenticatedVendor,
    coupon_id: web::Path<String>,
    payload: web::Json<CouponRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let coupons = CouponService::instance()?
        .update(&vendor.vendor_id, &coupon_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Coupon updated successfully!",
        "coupons": to_plain_json(&coupons)?
    })))
}

#[delete("/coupons/{coupon_id}")]
pub async fn delete_coupon(
    vendor: AuthenticatedVendor,
    coupon_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let coupons = CouponService::instance()?
        .delete(&vendor.vendor_id, &coupon_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Coupon deleted successfully!",
        "coupons": to_plain_json(&coupons)?
    })))
}
