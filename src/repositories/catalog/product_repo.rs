//! # 상품 리포지토리
//!
//! 모든 조회는 벤더 스냅샷(`vendor._id`) 기준으로 범위가 제한됩니다.
//! 상품 ID로만 찾는 [`ProductRepository::find_by_id`]는 주문 처리(재고 차감)에서
//! 쓰입니다.
//!
//! 쓰기는 바뀌는 필드만 서버 측에서 갱신합니다. 문서 전체를 덮어쓰지 않으므로
//! 스토어프론트가 관리하는 필드와 동시에 반영된 판매량이 보존됩니다.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use futures_util::{future::BoxFuture, TryStreamExt};
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::Serialize;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{RepositoryRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::catalog::{slug_candidate, Product, ProductEdit, SaleTarget, SubProduct};
use crate::repositories::{db_error, inserted_object_id, vendor_scope, write_error};
use crate::utils::time_utils::to_bson;

/// 고유 슬러그를 찾을 때 시도하는 최대 횟수
const SLUG_ATTEMPTS: u32 = 20;

/// 재고 조건 필터 (`subProducts.sizes.qty <= max_qty`)
pub(crate) fn stock_at_most_filter(vendor_id: &ObjectId, max_qty: i64) -> Document {
    let mut filter = vendor_scope(vendor_id);
    filter.insert("subProducts.sizes.qty", doc! { "$lte": max_qty });
    filter
}

/// 사용자 입력을 파이프라인 식으로 해석하지 않도록 `$literal`로 감쌉니다.
fn literal<T: Serialize + ?Sized>(value: &T) -> AppResult<Bson> {
    let value = bson::to_bson(value)
        .map_err(|e| AppError::InternalError(format!("Product edit serialization failed: {}", e)))?;

    Ok(Bson::Document(doc! { "$literal": value }))
}

/// 첫 번째 변형의 사이즈 목록을 새 목록으로 바꾸는 식
///
/// 라벨이 같은(대소문자, 앞뒤 공백 무시) 기존 사이즈가 있으면 그 문서를 바탕으로
/// `size`/`qty`/`price`만 덮어쓰므로, 갱신 시점의 `sold`가 그대로 남습니다.
fn merged_sizes_expr(sizes: Bson) -> Document {
    let existing_sizes = doc! { "$ifNull": [ { "$arrayElemAt": ["$subProducts.sizes", 0] }, [] ] };
    let same_label = doc! {
        "$eq": [
            { "$toLower": { "$trim": { "input": "$$old.size" } } },
            { "$toLower": { "$trim": { "input": "$$incoming.size" } } },
        ]
    };
    let previous = doc! {
        "$arrayElemAt": [
            { "$filter": { "input": existing_sizes, "as": "old", "cond": same_label } },
            0,
        ]
    };

    doc! {
        "$map": {
            "input": sizes,
            "as": "incoming",
            "in": {
                "$mergeObjects": [
                    { "sold": 0 },
                    previous,
                    { "size": "$$incoming.size", "qty": "$$incoming.qty", "price": "$$incoming.price" },
                ]
            }
        }
    }
}

/// 상품 수정 파이프라인
///
/// 상위 필드와 `subProducts.0`의 편집 필드만 `$set`합니다. 첫 번째 변형의
/// 나머지 필드(이미지, `sold`, `_id`)와 다른 변형들은 서버 값을 유지합니다.
pub(crate) fn product_edit_pipeline(edit: &ProductEdit, now: bson::DateTime) -> AppResult<Vec<Document>> {
    let primary = doc! {
        "$mergeObjects": [
            { "$arrayElemAt": ["$subProducts", 0] },
            {
                "sku": literal(&edit.sku)?,
                "discount": edit.discount,
                "color": literal(&edit.color)?,
                "sizes": merged_sizes_expr(literal(&edit.sizes)?),
            },
        ]
    };
    let rest = doc! {
        "$slice": ["$subProducts", 1, { "$max": [{ "$size": "$subProducts" }, 1] }]
    };

    Ok(vec![doc! {
        "$set": {
            "name": literal(&edit.name)?,
            "description": literal(&edit.description)?,
            "longDescription": literal(&edit.long_description)?,
            "brand": literal(&edit.brand)?,
            "details": literal(&edit.details)?,
            "questions": literal(&edit.questions)?,
            "benefits": literal(&edit.benefits)?,
            "ingredients": literal(&edit.ingredients)?,
            "subProducts": { "$concatArrays": [[primary], rest] },
            "updatedAt": now,
        }
    }])
}

/// 재고 차감 대상 상품. 벤더 스냅샷이 있으면 소유 벤더로도 제한합니다.
pub(crate) fn sale_filter(product_id: &ObjectId, vendor_id: Option<&ObjectId>) -> Document {
    let mut filter = vendor_id.map(vendor_scope).unwrap_or_default();
    filter.insert("_id", *product_id);
    filter
}

/// 판매 수량을 원자적으로 반영하는 `$inc`. 사이즈는 배열 필터 `s`로 고릅니다.
pub(crate) fn sale_increment(style: usize, ordered_qty: i64, now: bson::DateTime) -> Document {
    let size_path = format!("subProducts.{}.sizes.$[s]", style);

    doc! {
        "$inc": {
            format!("{}.qty", size_path): -ordered_qty,
            format!("{}.sold", size_path): ordered_qty,
            format!("subProducts.{}.sold", style): ordered_qty,
        },
        "$set": { "updatedAt": now },
    }
}

/// 차감 후 음수가 된 재고를 0으로 올립니다.
pub(crate) fn stock_floor(style: usize) -> Document {
    doc! { "$max": { format!("subProducts.{}.sizes.$[s].qty", style): 0_i64 } }
}

pub(crate) fn size_array_filter(size: &str) -> Document {
    doc! { "s.size": size }
}

/// - **컬렉션명**: `products`
/// - **인덱스**: slug(unique), vendor._id + updatedAt
pub struct ProductRepository {
    db: Arc<Database>,
}

impl ProductRepository {
    pub const COLLECTION: &'static str = "products";

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get_or_try_init(|| {
            Ok(Self {
                db: ServiceLocator::get::<Database>()?,
            })
        })
    }

    fn collection(&self) -> Collection<Product> {
        self.db.collection::<Product>(Self::COLLECTION)
    }

    async fn find_many(&self, filter: Document) -> AppResult<Vec<Product>> {
        self.collection()
            .find(filter)
            .sort(doc! { "updatedAt": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Product>> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    /// 벤더 소유 상품 조회
    pub async fn find_owned(&self, id: &ObjectId, vendor_id: &ObjectId) -> AppResult<Option<Product>> {
        let mut filter = vendor_scope(vendor_id);
        filter.insert("_id", *id);

        self.collection()
            .find_one(filter)
            .await
            .map_err(db_error)
    }

    /// 벤더의 전체 상품 (최근 수정 순)
    pub async fn find_by_vendor(&self, vendor_id: &ObjectId) -> AppResult<Vec<Product>> {
        self.find_many(vendor_scope(vendor_id)).await
    }

    /// 어떤 사이즈든 재고가 `max_qty` 이하인 상품
    pub async fn find_with_stock_at_most(&self, vendor_id: &ObjectId, max_qty: i64) -> AppResult<Vec<Product>> {
        self.find_many(stock_at_most_filter(vendor_id, max_qty)).await
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let count = self.collection()
            .count_documents(doc! { "slug": slug })
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }

    /// 사용 중이지 않은 슬러그를 찾습니다 (`base`, `base-2`, ...).
    pub async fn unique_slug(&self, base: &str) -> AppResult<String> {
        for attempt in 1..=SLUG_ATTEMPTS {
            let candidate = slug_candidate(base, attempt);
            if !self.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(AppError::ConflictError(
            "Product already exists, try a different name.".to_string(),
        ))
    }

    pub async fn create(&self, mut product: Product) -> AppResult<Product> {
        let result = self.collection()
            .insert_one(&product)
            .await
            .map_err(|e| write_error(e, "Product already exists, try a different name."))?;

        product.id = Some(inserted_object_id(&result.inserted_id)?);
        Ok(product)
    }

    /// 기존 상품에 색상 변형을 추가합니다.
    pub async fn push_sub_product(&self, id: &ObjectId, sub_product: &SubProduct) -> AppResult<bool> {
        let sub_product = bson::to_bson(sub_product)
            .map_err(|e| AppError::InternalError(format!("SubProduct serialization failed: {}", e)))?;

        let result = self.collection()
            .update_one(
                doc! { "_id": *id },
                doc! {
                    "$push": { "subProducts": sub_product },
                    "$set": { "updatedAt": bson::DateTime::now() },
                },
            )
            .await
            .map_err(db_error)?;

        Ok(result.matched_count > 0)
    }

    /// 벤더 소유 상품에 수정 내용을 반영하고 갱신된 문서를 반환합니다.
    ///
    /// 상품이 없거나, 다른 벤더 소유이거나, 첫 번째 변형이 없으면 `None`입니다.
    pub async fn update_owned(
        &self,
        id: &ObjectId,
        vendor_id: &ObjectId,
        edit: &ProductEdit,
    ) -> AppResult<Option<Product>> {
        let mut filter = vendor_scope(vendor_id);
        filter.insert("_id", *id);
        filter.insert("subProducts.0", doc! { "$exists": true });

        self.collection()
            .find_one_and_update(filter, product_edit_pipeline(edit, bson::DateTime::now())?)
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error)
    }

    /// 판매 완료 수량만큼 재고를 줄이고 판매량을 올립니다.
    ///
    /// `$inc`로 서버에서 더하므로 동시에 완료된 다른 주문의 차감과 겹쳐도
    /// 잃어버리지 않습니다. 상품이 없거나 소유 벤더가 다르면 `false`입니다.
    pub async fn record_sale(
        &self,
        id: &ObjectId,
        vendor_id: Option<&ObjectId>,
        target: &SaleTarget,
        ordered_qty: i64,
    ) -> AppResult<bool> {
        let filter = sale_filter(id, vendor_id);
        let array_filters = vec![size_array_filter(&target.size)];

        let result = self.collection()
            .update_one(filter.clone(), sale_increment(target.style, ordered_qty.max(0), bson::DateTime::now()))
            .array_filters(array_filters.clone())
            .await
            .map_err(db_error)?;

        if result.matched_count == 0 {
            return Ok(false);
        }

        self.collection()
            .update_one(filter, stock_floor(target.style))
            .array_filters(array_filters)
            .await
            .map_err(db_error)?;

        Ok(true)
    }

    /// 벤더 소유 상품을 삭제하고 삭제된 문서를 반환합니다.
    pub async fn delete_owned(&self, id: &ObjectId, vendor_id: &ObjectId) -> AppResult<Option<Product>> {
        let mut filter = vendor_scope(vendor_id);
        filter.insert("_id", *id);

        self.collection()
            .find_one_and_delete(filter)
            .await
            .map_err(db_error)
    }

    /// `[from, to)` 구간에 생성된 벤더 상품 수
    pub async fn count_created_between(
        &self,
        vendor_id: &ObjectId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut filter = vendor_scope(vendor_id);
        filter.insert("createdAt", doc! { "$gte": to_bson(from), "$lt": to_bson(to) });

        self.collection()
            .count_documents(filter)
            .await
            .map_err(db_error)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("slug_unique".to_string())
                .build())
            .build();

        let vendor_index = IndexModel::builder()
            .keys(doc! { "vendor._id": 1, "updatedAt": -1 })
            .options(IndexOptions::builder()
                .name("vendor_updated_at".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([slug_index, vendor_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

fn init_product_repository() -> BoxFuture<'static, AppResult<()>> {
    Box::pin(async { ProductRepository::instance()?.create_indexes().await })
}

inventory::submit! {
    RepositoryRegistration {
        name: "ProductRepository",
        collection: ProductRepository::COLLECTION,
        init: init_product_repository,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::SizeVariant;
    use crate::domain::entities::common::ColorSwatch;

    #[test]
    fn test_stock_at_most_filter() {
        let vendor_id = ObjectId::new();
        let filter = stock_at_most_filter(&vendor_id, 5);

        assert_eq!(filter.get_object_id("vendor._id").unwrap(), vendor_id);
        assert_eq!(
            filter.get_document("subProducts.sizes.qty").unwrap().get_i64("$lte").unwrap(),
            5
        );
    }

    fn edit() -> ProductEdit {
        ProductEdit {
            name: "$name".to_string(),
            description: "Updated".to_string(),
            long_description: String::new(),
            brand: "Loom".to_string(),
            details: vec![],
            questions: vec![],
            benefits: vec![],
            ingredients: vec![],
            sku: "SKU-NEW".to_string(),
            discount: 15.0,
            color: ColorSwatch { color: "Ivory".to_string(), image: String::new() },
            sizes: vec![SizeVariant::new("S".to_string(), 4, 1100.0)],
        }
    }

    #[test]
    fn test_product_edit_pipeline_sets_edited_fields_only() {
        let now = bson::DateTime::now();
        let pipeline = product_edit_pipeline(&edit(), now).unwrap();

        assert_eq!(pipeline.len(), 1);
        let set = pipeline[0].get_document("$set").unwrap();

        // 입력 값은 필드 경로로 해석되지 않도록 $literal로 들어갑니다
        assert_eq!(set.get_document("name").unwrap().get_str("$literal").unwrap(), "$name");
        assert_eq!(set.get_datetime("updatedAt").unwrap(), &now);
        for untouched in ["slug", "category", "subCategories", "reviews", "rating", "vendor", "shipping", "createdAt"] {
            assert!(!set.contains_key(untouched), "{} must not be overwritten", untouched);
        }

        let parts = set
            .get_document("subProducts").unwrap()
            .get_array("$concatArrays").unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1].as_document().unwrap().get_array("$slice").unwrap()[0],
            Bson::String("$subProducts".to_string())
        );
    }

    #[test]
    fn test_product_edit_pipeline_keeps_existing_sold_counts() {
        let pipeline = product_edit_pipeline(&edit(), bson::DateTime::now()).unwrap();
        let set = pipeline[0].get_document("$set").unwrap();
        let primary = set
            .get_document("subProducts").unwrap()
            .get_array("$concatArrays").unwrap()[0]
            .as_array().unwrap()[0]
            .as_document().unwrap()
            .get_array("$mergeObjects").unwrap()[1]
            .as_document().unwrap()
            .clone();

        assert_eq!(primary.get_document("sku").unwrap().get_str("$literal").unwrap(), "SKU-NEW");
        assert_eq!(primary.get_f64("discount").unwrap(), 15.0);

        let merge = primary
            .get_document("sizes").unwrap()
            .get_document("$map").unwrap()
            .get_document("in").unwrap()
            .get_array("$mergeObjects").unwrap();
        // 기본값, 기존 사이즈 문서, 새 값 순서라 기존 sold가 기본값을 덮습니다
        assert_eq!(merge.len(), 3);
        assert_eq!(merge[0].as_document().unwrap().get_i32("sold").unwrap(), 0);
        assert!(merge[1].as_document().unwrap().contains_key("$arrayElemAt"));
        let incoming = merge[2].as_document().unwrap();
        assert!(!incoming.contains_key("sold"));
        assert_eq!(incoming.get_str("qty").unwrap(), "$$incoming.qty");
    }

    #[test]
    fn test_sale_increment_uses_array_filter_paths() {
        let now = bson::DateTime::now();
        let update = sale_increment(1, 3, now);

        let inc = update.get_document("$inc").unwrap();
        assert_eq!(inc.get_i64("subProducts.1.sizes.$[s].qty").unwrap(), -3);
        assert_eq!(inc.get_i64("subProducts.1.sizes.$[s].sold").unwrap(), 3);
        assert_eq!(inc.get_i64("subProducts.1.sold").unwrap(), 3);
        assert_eq!(update.get_document("$set").unwrap().get_datetime("updatedAt").unwrap(), &now);

        assert_eq!(size_array_filter("M").get_str("s.size").unwrap(), "M");
        assert_eq!(
            stock_floor(1).get_document("$max").unwrap().get_i64("subProducts.1.sizes.$[s].qty").unwrap(),
            0
        );
    }

    #[test]
    fn test_sale_filter_scopes_to_owner() {
        let (product_id, vendor_id) = (ObjectId::new(), ObjectId::new());

        let owned = sale_filter(&product_id, Some(&vendor_id));
        assert_eq!(owned.get_object_id("_id").unwrap(), product_id);
        assert_eq!(owned.get_object_id("vendor._id").unwrap(), vendor_id);

        let any = sale_filter(&product_id, None);
        assert!(!any.contains_key("vendor._id"));
    }
}
