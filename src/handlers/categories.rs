//! Category / Sub-category HTTP Handlers
//!
//! 카테고리는 모든 벤더가 공유합니다. 쓰기 요청은 로그인이 필요하며,
//! 응답에는 변경 후의 전체 목록(`updatedAt` 내림차순)이 실립니다.
//!
//! # Endpoints
//!
//! | Method | Path | 설명 |
//! |--------|------|------|
//! | GET | `/categories` | 전체 카테고리 |
//! | POST | `/categories` | 생성 (이미지 업로드) |
//! | PUT | `/categories/{id}` | 이름 변경 |
//! | DELETE | `/categories/{id}` | 삭제 (이미지 삭제) |
//! | GET | `/sub-categories` | 카테고리 + 부모가 채워진 서브카테고리 |
//! | GET | `/sub-categories/by-parent?category=` | 카테고리별 서브카테고리 |
//! | POST | `/sub-categories` | 생성 |
//! | PUT | `/sub-categories/{id}` | 이름/부모 변경 |
//! | DELETE | `/sub-categories/{id}` | 삭제 |
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::catalog::{
    CreateCategoryRequest, CreateSubCategoryRequest, SubCategoriesQuery, UpdateCategoryRequest,
    UpdateSubCategoryRequest,
};
use crate::domain::models::auth::AuthenticatedVendor;
use crate::services::catalog::{CategoryService, SubCategoryService};
use crate::utils::json_utils::{populate_pairs, to_plain_json};

#[get("/categories")]
pub async fn get_categories() -> Result<HttpResponse, AppError> {
    let categories = CategoryService::instance()?.get_all().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "categories": to_plain_json(&categories)?
    })))
}

#[post("/categories")]
pub async fn create_category(
    vendor: AuthenticatedVendor,
    payload: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let name = payload.name.trim().to_string();
    let categories = CategoryService::instance()?
        .create(&vendor.vendor_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": format!("Category {} has been created successfully.", name),
        "categories": to_plain_json(&categories)?
    })))
}

#[put("/categories/{category_id}")]
pub async fn update_category(
    category_id: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let categories = CategoryService::instance()?
        .update(&category_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Category has been updated successfully.",
        "categories": to_plain_json(&categories)?
    })))
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(category_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let categories = CategoryService::instance()?
        .delete(&category_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Category has been deleted successfully.",
        "categories": to_plain_json(&categories)?
    })))
}

#[get("/sub-categories")]
pub async fn get_sub_categories() -> Result<HttpResponse, AppError> {
    let (categories, sub_categories) = SubCategoryService::instance()?
        .get_all_with_categories()
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "categories": to_plain_json(&categories)?,
        "subCategories": populate_pairs(&sub_categories, "parent")?
    })))
}

/// 카테고리 id가 없으면 400 "No Category provided."
#[get("/sub-categories/by-parent")]
pub async fn get_sub_categories_by_parent(
    query: web::Query<SubCategoriesQuery>,
) -> Result<HttpResponse, AppError> {
    let sub_categories = SubCategoryService::instance()?
        .get_by_parent(query.category_id())
        .await?;

    let names: Vec<&str> = sub_categories.iter().map(|sub| sub.name.as_str()).collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "subCategories": names
    })))
}

#[post("/sub-categories")]
pub async fn create_sub_category(
    vendor: AuthenticatedVendor,
    payload: web::Json<CreateSubCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let name = payload.name.trim().to_string();
    let sub_categories = SubCategoryService::instance()?
        .create(&vendor.vendor_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": format!("Sub Category {} has been created successfully.", name),
        "subCategories": populate_pairs(&sub_categories, "parent")?
    })))
}

#[put("/sub-categories/{sub_category_id}")]
pub async fn update_sub_category(
    sub_category_id: web::Path<String>,
    payload: web::Json<UpdateSubCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let sub_categories = SubCategoryService::instance()?
        .update(&sub_category_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Sub Category has been updated successfully.",
        "subCategories": populate_pairs(&sub_categories, "parent")?
    })))
}

#[delete("/sub-categories/{sub_category_id}")]
pub async fn delete_sub_category(sub_category_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let sub_categories = SubCategoryService::instance()?
        .delete(&sub_category_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Sub Category has been deleted successfully.",
        "subCategories": populate_pairs(&sub_categories, "parent")?
    })))
}
