//! Vendor Profile HTTP Handlers
//!
//! - `GET /api/v1/vendor/me` - 로그인한 벤더 정보
//! - `GET /api/v1/vendor/lookup/{id}` - 벤더 조회
//! - `GET /api/v1/vendor/lookup/{id}/exists` - 존재 여부
//! - `GET /api/v1/vendor/lookup/{id}/verified` - 승인 여부
use actix_web::{get, web, HttpResponse};
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::models::auth::{AuthenticatedVendor, OptionalVendor};
use crate::services::vendors::VendorService;
use crate::utils::json_utils::to_plain_json;

/// 현재 로그인한 벤더 정보 조회
#[get("/me")]
pub async fn get_current_vendor(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let current = VendorService::instance()?
        .current_vendor(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Vendor found.",
        "vendor": to_plain_json(&current)?
    })))
}

#[get("/{vendor_id}")]
pub async fn get_single_vendor(
    vendor_id: web::Path<String>,
    requester: OptionalVendor,
) -> Result<HttpResponse, AppError> {
    if let Some(requester) = &requester.0 {
        log::debug!("Vendor lookup {} by {}", vendor_id, requester.vendor_id);
    }

    let vendor = VendorService::instance()?
        .get_single_vendor(&vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Vendor found.",
        "vendor": to_plain_json(&vendor)?
    })))
}

#[get("/{vendor_id}/exists")]
pub async fn check_vendor(vendor_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    VendorService::instance()?
        .check_vendor(&vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Vendor exists."
    })))
}

/// 미승인 벤더는 403으로 응답합니다.
#[get("/{vendor_id}/verified")]
pub async fn check_vendor_verified(vendor_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    VendorService::instance()?
        .check_vendor_verified(&vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Vendor is verified."
    })))
}
