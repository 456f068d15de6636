//! # 상품 서비스
//!
//! 상품은 벤더 소유입니다. 모든 변경은 토큰의 벤더 ID로 범위가 제한되며,
//! 다른 벤더의 상품은 존재하지 않는 것처럼 404로 응답합니다.
//!
//! ```text
//! create ─┬─ parent 있음 → 부모 상품에 SubProduct 추가
//!         └─ parent 없음 → 새 상품 (SubProduct 1개, 고유 슬러그)
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::dto::catalog::{CreateProductRequest, ProductParent, ProductVariantView, UpdateProductRequest};
use crate::domain::entities::catalog::{Category, Product, ProductEdit, SubProduct};
use crate::domain::entities::common::ImageAsset;
use crate::media::MediaStore;
use crate::repositories::catalog::{CategoryRepository, ProductRepository};
use crate::services::catalog::{discard_images, media_store, release_images, upload_images, CATEGORY_NOT_FOUND_MESSAGE, INVALID_CATEGORY_ID_MESSAGE};
use crate::services::vendors::VendorService;
use crate::utils::parse_object_id;
use crate::utils::string_utils::{slugify, validate_required_string};

pub const INVALID_PRODUCT_ID_MESSAGE: &str = "Invalid Product ID.";
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found.";
pub const PRODUCT_EDIT_DENIED_MESSAGE: &str = "Product not found or you don't have permission to edit this product.";
pub const PRODUCT_DELETE_DENIED_MESSAGE: &str = "Product not found or you don't have permission to delete this product.";
pub const MISSING_PRIMARY_MESSAGE: &str = "Product is missing primary sub-product.";
pub const PRODUCT_CREATED_MESSAGE: &str = "Product created successfully.";
pub const SUB_PRODUCT_ADDED_MESSAGE: &str = "Sub-product added successfully.";

/// 상품 생성 결과
#[derive(Debug, Clone, PartialEq)]
pub enum ProductCreated {
    Product(ObjectId),
    SubProduct { parent: ObjectId, sub_product: Option<ObjectId> },
}

impl ProductCreated {
    pub fn message(&self) -> &'static str {
        match self {
            ProductCreated::Product(_) => PRODUCT_CREATED_MESSAGE,
            ProductCreated::SubProduct { .. } => SUB_PRODUCT_ADDED_MESSAGE,
        }
    }
}

/// 수정은 첫 번째 변형을 대상으로 하므로 변형이 하나도 없으면 거부합니다.
///
/// # Errors
///
/// * `AppError::ConflictError` - 첫 번째 변형이 없는 상품
pub fn ensure_editable(product: &Product) -> AppResult<()> {
    if !product.has_primary_variant() {
        return Err(AppError::ConflictError(MISSING_PRIMARY_MESSAGE.to_string()));
    }
    Ok(())
}

/// 요청에서 첫 번째 색상 변형을 만듭니다.
pub fn sub_product_from(request: &CreateProductRequest, images: Vec<ImageAsset>) -> SubProduct {
    SubProduct::new(
        request.sku.trim().to_string(),
        request.color.clone().into_swatch(),
        images,
        request.size_variants(),
        request.discount,
    )
}

/// 상품마다 카테고리를 찾아 붙입니다.
pub fn pair_with_categories(products: Vec<Product>, categories: &[Category]) -> Vec<(Product, Option<Category>)> {
    let by_id: HashMap<ObjectId, &Category> = categories
        .iter()
        .filter_map(|category| category.id.map(|id| (id, category)))
        .collect();

    products
        .into_iter()
        .map(|product| {
            let category = by_id.get(&product.category).map(|category| (*category).clone());
            (product, category)
        })
        .collect()
}

pub struct ProductService {
    product_repo: Arc<ProductRepository>,
    category_repo: Arc<CategoryRepository>,
    vendor_service: Arc<VendorService>,
    media: Arc<dyn MediaStore>,
}

impl ProductService {
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                product_repo: ProductRepository::instance()?,
                category_repo: CategoryRepository::instance()?,
                vendor_service: VendorService::instance()?,
                media: media_store()?,
            })
        })
    }

    /// 상품 생성 또는 기존 상품에 색상 변형 추가
    pub async fn create(&self, vendor_id: &ObjectId, request: CreateProductRequest) -> AppResult<ProductCreated> {
        let parent_id = request
            .parent
            .as_deref()
            .map(|parent| parse_object_id(parent, INVALID_PRODUCT_ID_MESSAGE))
            .transpose()?;

        match parent_id {
            Some(parent_id) => self.add_sub_product(vendor_id, &parent_id, request).await,
            None => self.create_product(vendor_id, request).await,
        }
    }

    async fn add_sub_product(
        &self,
        vendor_id: &ObjectId,
        parent_id: &ObjectId,
        request: CreateProductRequest,
    ) -> AppResult<ProductCreated> {
        if self.product_repo.find_owned(parent_id, vendor_id).await?.is_none() {
            return Err(AppError::NotFound("Parent product not found.".to_string()));
        }

        let images = upload_images(self.media.as_ref(), &request.images).await?;
        let sub_product = sub_product_from(&request, images.clone());

        match self.product_repo.push_sub_product(parent_id, &sub_product).await {
            Ok(true) => {
                log::info!("🎨 Sub-product added to {} by vendor {}", parent_id, vendor_id);
                Ok(ProductCreated::SubProduct { parent: *parent_id, sub_product: sub_product.id })
            }
            Ok(false) => {
                discard_images(self.media.as_ref(), &images).await;
                Err(AppError::NotFound("Parent product not found.".to_string()))
            }
            Err(e) => {
                discard_images(self.media.as_ref(), &images).await;
                Err(e)
            }
        }
    }

    async fn create_product(&self, vendor_id: &ObjectId, request: CreateProductRequest) -> AppResult<ProductCreated> {
        let name = validate_required_string(&request.name, "Product name")?;

        let category = request
            .category
            .as_deref()
            .ok_or_else(|| AppError::ValidationError("Please select a category.".to_string()))?;
        let category_id = parse_object_id(category, INVALID_CATEGORY_ID_MESSAGE)?;
        if self.category_repo.find_by_id(&category_id).await?.is_none() {
            return Err(AppError::NotFound(CATEGORY_NOT_FOUND_MESSAGE.to_string()));
        }

        let sub_categories = request
            .sub_categories
            .iter()
            .filter(|id| !id.trim().is_empty())
            .map(|id| parse_object_id(id, "Invalid Sub Category ID."))
            .collect::<AppResult<Vec<_>>>()?;

        let vendor = self.vendor_service.snapshot(vendor_id).await?;
        let slug = self.product_repo.unique_slug(&slugify(&name)).await?;
        let images = upload_images(self.media.as_ref(), &request.images).await?;

        let mut product = Product::new(
            name,
            request.description.clone(),
            request.long_description.clone(),
            request.brand.clone(),
            slug,
            category_id,
            sub_categories,
            vendor,
            sub_product_from(&request, images.clone()),
        );
        product.details = request.details;
        product.questions = request.questions;
        product.benefits = request.benefits;
        product.ingredients = request.ingredients;

        let created = match self.product_repo.create(product).await {
            Ok(created) => created,
            Err(e) => {
                discard_images(self.media.as_ref(), &images).await;
                return Err(e);
            }
        };

        let product_id = created
            .id
            .ok_or_else(|| AppError::InternalError("Product has no id after insert".to_string()))?;
        log::info!("🛍️ Product {} ({}) created by vendor {}", product_id, created.slug, vendor_id);

        Ok(ProductCreated::Product(product_id))
    }

    /// 상품을 삭제하고 모든 변형의 이미지를 정리합니다.
    pub async fn delete(&self, vendor_id: &ObjectId, id: &str) -> AppResult<()> {
        let product_id = parse_object_id(id, INVALID_PRODUCT_ID_MESSAGE)?;

        let deleted = self.product_repo
            .delete_owned(&product_id, vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PRODUCT_DELETE_DENIED_MESSAGE.to_string()))?;

        release_images(self.media.as_ref(), "Product", &deleted.image_public_ids()).await;
        Ok(())
    }

    pub async fn update(&self, vendor_id: &ObjectId, id: &str, request: UpdateProductRequest) -> AppResult<Product> {
        let product_id = parse_object_id(id, INVALID_PRODUCT_ID_MESSAGE)?;

        let product = self.product_repo
            .find_owned(&product_id, vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PRODUCT_EDIT_DENIED_MESSAGE.to_string()))?;
        ensure_editable(&product)?;

        let updated = self.product_repo
            .update_owned(&product_id, vendor_id, &ProductEdit::from(request))
            .await?
            .ok_or_else(|| AppError::NotFound(PRODUCT_EDIT_DENIED_MESSAGE.to_string()))?;

        log::info!("✏️ Product {} updated by vendor {}", product_id, vendor_id);
        Ok(updated)
    }

    /// 스타일/사이즈 기준 가격 정보
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 상품이 없거나 스타일/사이즈 인덱스가 범위를 벗어남
    pub async fn get_single_by_id(&self, id: &str, style: usize, size: usize) -> AppResult<ProductVariantView> {
        let product_id = parse_object_id(id, INVALID_PRODUCT_ID_MESSAGE)?;

        let product = self.product_repo
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND_MESSAGE.to_string()))?;

        let (sub_product, pricing) = product
            .pricing(style, size)
            .ok_or_else(|| AppError::NotFound("Product variant not found.".to_string()))?;

        Ok(ProductVariantView::new(&product, style, sub_product, pricing))
    }

    /// 벤더 상품 (카테고리 채움, 최근 수정 순)
    pub async fn get_vendor_products(&self, vendor_id: &ObjectId) -> AppResult<Vec<(Product, Option<Category>)>> {
        let products = self.product_repo.find_by_vendor(vendor_id).await?;

        let mut category_ids: Vec<ObjectId> = products.iter().map(|product| product.category).collect();
        category_ids.sort();
        category_ids.dedup();

        let categories = self.category_repo.find_by_ids(&category_ids).await?;
        Ok(pair_with_categories(products, &categories))
    }

    /// 편집 화면용 상품 전체 문서
    pub async fn get_entire_by_id(&self, vendor_id: &ObjectId, id: &str) -> AppResult<Product> {
        let product_id = parse_object_id(id, INVALID_PRODUCT_ID_MESSAGE)?;

        self.product_repo
            .find_owned(&product_id, vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND_MESSAGE.to_string()))
    }

    /// 상품 등록 폼의 부모 상품 목록과 카테고리
    pub async fn get_parents_and_categories(&self, vendor_id: &ObjectId) -> AppResult<(Vec<ProductParent>, Vec<Category>)> {
        let products = self.product_repo.find_by_vendor(vendor_id).await?;
        let categories = self.category_repo.find_all().await?;

        Ok((products.into_iter().map(ProductParent::from).collect(), categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::product::tests::sample_product;

    #[test]
    fn test_ensure_editable_requires_primary_variant() {
        let mut product = sample_product(ObjectId::new());
        assert!(ensure_editable(&product).is_ok());

        product.sub_products.clear();
        let error = ensure_editable(&product).unwrap_err();
        assert!(matches!(error, AppError::ConflictError(msg) if msg == MISSING_PRIMARY_MESSAGE));
    }

    #[test]
    fn test_pair_with_categories() {
        let mut category = Category::new("Kurtas".to_string(), vec![], None);
        let product = sample_product(ObjectId::new());
        category.id = Some(product.category);

        let paired = pair_with_categories(vec![product, sample_product(ObjectId::new())], &[category]);

        assert_eq!(paired[0].1.as_ref().unwrap().name, "Kurtas");
        assert!(paired[1].1.is_none());
    }

    #[test]
    fn test_created_messages() {
        let id = ObjectId::new();
        assert_eq!(ProductCreated::Product(id).message(), PRODUCT_CREATED_MESSAGE);
        assert_eq!(
            ProductCreated::SubProduct { parent: id, sub_product: None }.message(),
            SUB_PRODUCT_ADDED_MESSAGE
        );
    }
}
