//! Product HTTP Handlers
//!
//! 상품 쓰기와 조회는 모두 로그인한 벤더의 상품으로 한정됩니다.
//! 단, 변형(variant) 조회는 상품 id만으로 가능합니다.
//!
//! # Endpoints
//!
//! - `GET /products` - 내 상품 목록 (카테고리 포함)
//! - `POST /products` - 상품 생성 또는 `parent`에 색상 변형 추가
//! - `GET /products/form-options` - 부모 상품 후보와 카테고리
//! - `GET /products/{id}` - 상품 전체
//! - `GET /products/{id}/variant?style=&size=` - 변형 가격/재고
//! - `PUT /products/{id}` - 수정
//! - `DELETE /products/{id}` - 삭제 (이미지 포함)
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::{json, Value};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::catalog::{CreateProductRequest, UpdateProductRequest, VariantQuery};
use crate::domain::models::auth::AuthenticatedVendor;
use crate::services::catalog::{ProductCreated, ProductService};
use crate::utils::json_utils::{populate_pairs, to_plain_json};

#[get("/products")]
pub async fn get_vendor_products(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let products = ProductService::instance()?
        .get_vendor_products(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "products": populate_pairs(&products, "category")?
    })))
}

#[post("/products")]
pub async fn create_product(
    vendor: AuthenticatedVendor,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let created = ProductService::instance()?
        .create(&vendor.vendor_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(created_body(&created)))
}

/// 상품 폼에 필요한 부모 상품 후보와 카테고리
///
/// `/products/{id}`보다 먼저 등록되어야 합니다.
#[get("/products/form-options")]
pub async fn get_parents_and_categories(vendor: AuthenticatedVendor) -> Result<HttpResponse, AppError> {
    let (parents, categories) = ProductService::instance()?
        .get_parents_and_categories(&vendor.vendor_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "parents": to_plain_json(&parents)?,
        "categories": to_plain_json(&categories)?
    })))
}

#[get("/products/{product_id}")]
pub async fn get_entire_product(
    vendor: AuthenticatedVendor,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product = ProductService::instance()?
        .get_entire_by_id(&vendor.vendor_id, &product_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "product": to_plain_json(&product)?
    })))
}

/// 범위를 벗어난 `style`/`size`는 404입니다.
#[get("/products/{product_id}/variant")]
pub async fn get_product_variant(
    product_id: web::Path<String>,
    query: web::Query<VariantQuery>,
) -> Result<HttpResponse, AppError> {
    let variant = ProductService::instance()?
        .get_single_by_id(&product_id, query.style, query.size)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "product": to_plain_json(&variant)?
    })))
}

#[put("/products/{product_id}")]
pub async fn update_product(
    vendor: AuthenticatedVendor,
    product_id: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = ProductService::instance()?
        .update(&vendor.vendor_id, &product_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Product updated successfully.",
        "product": to_plain_json(&product)?
    })))
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    vendor: AuthenticatedVendor,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ProductService::instance()?
        .delete(&vendor.vendor_id, &product_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Product deleted successfully."
    })))
}

fn created_body(created: &ProductCreated) -> Value {
    match created {
        ProductCreated::Product(id) => json!({
            "success": true,
            "message": created.message(),
            "productId": id.to_hex()
        }),
        ProductCreated::SubProduct { parent, sub_product } => json!({
            "success": true,
            "message": created.message(),
            "productId": parent.to_hex(),
            "subProductId": sub_product.map(|id| id.to_hex())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_created_body_messages() {
        let id = ObjectId::new();

        let body = created_body(&ProductCreated::Product(id));
        assert_eq!(body["message"], "Product created successfully.");
        assert_eq!(body["productId"], id.to_hex());

        let body = created_body(&ProductCreated::SubProduct { parent: id, sub_product: None });
        assert_eq!(body["message"], "Sub-product added successfully.");
        assert!(body["subProductId"].is_null());
    }
}
