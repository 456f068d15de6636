//! Order Entity
//!
//! 주문은 스토어프론트 체크아웃에서 생성되며, 벤더 백오피스는 자신의
//! 라인 아이템 상태만 변경합니다.

use std::fmt;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::common::{ColorSwatch, VendorSnapshot};
use crate::utils::string_utils::{deserialize_flexible_f64, deserialize_flexible_i64};

/// 라인 아이템 처리 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineItemStatus {
    #[default]
    #[serde(rename = "Not Processed")]
    NotProcessed,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl LineItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemStatus::NotProcessed => "Not Processed",
            LineItemStatus::Completed => "Completed",
            LineItemStatus::Cancelled => "Cancelled",
        }
    }

    /// 요청 본문의 상태 문자열을 해석합니다. 대소문자와 앞뒤 공백은 무시합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 알 수 없는 상태 값
    pub fn parse(raw: &str) -> AppResult<Self> {
        let normalized = raw.trim().to_lowercase();

        match normalized.as_str() {
            "not processed" => Ok(LineItemStatus::NotProcessed),
            "completed" => Ok(LineItemStatus::Completed),
            "cancelled" => Ok(LineItemStatus::Cancelled),
            _ => Err(AppError::ValidationError(format!(
                "Invalid status '{}'. Use one of: Not Processed, Completed, Cancelled",
                raw.trim()
            ))),
        }
    }
}

impl fmt::Display for LineItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 주문에 포함된 상품 한 줄
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub product: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorSnapshot>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub size: String,
    #[serde(default, deserialize_with = "deserialize_flexible_i64")]
    pub qty: i64,
    #[serde(default)]
    pub color: ColorSwatch,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    pub price: f64,
    #[serde(default)]
    pub status: LineItemStatus,
    #[serde(default)]
    pub product_completed_at: Option<DateTime>,
}

impl LineItem {
    pub fn belongs_to(&self, vendor_id: &ObjectId) -> bool {
        self.vendor.as_ref().is_some_and(|vendor| &vendor.id == vendor_id)
    }

    pub fn subtotal(&self) -> f64 {
        self.price * self.qty as f64
    }

    /// 상태를 변경합니다.
    ///
    /// 처음으로 `Completed`가 되는 경우에만 `productCompletedAt`을 기록하고
    /// `true`를 반환합니다. 이 값은 이후 다른 상태로 바뀌어도 지우지 않으므로
    /// 재고 차감은 라인 아이템당 한 번만 일어납니다.
    pub fn transition_to(&mut self, status: LineItemStatus, now: DateTime) -> bool {
        self.status = status;

        if status == LineItemStatus::Completed && self.product_completed_at.is_none() {
            self.product_completed_at = Some(now);
            return true;
        }

        false
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn default_is_new() -> bool {
    true
}

/// 고객 주문
///
/// 여러 벤더의 라인 아이템이 한 주문에 섞여 있을 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// 주문한 고객 (`users` 컬렉션)
    pub user: ObjectId,
    #[serde(default)]
    pub products: Vec<LineItem>,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_result: PaymentResult,
    /// `cash` | `RazorPay`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_before_discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_applied: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    pub shipping_price: f64,
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    pub tax_price: f64,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_saved: Option<f64>,
    #[serde(rename = "razorpay_order_id", default, skip_serializing_if = "Option::is_none")]
    pub razorpay_order_id: Option<String>,
    #[serde(rename = "razorpay_payment_id", default, skip_serializing_if = "Option::is_none")]
    pub razorpay_payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime>,
    #[serde(default = "default_is_new")]
    pub is_new: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Order {
    pub fn vendor_items<'a>(&'a self, vendor_id: &'a ObjectId) -> impl Iterator<Item = &'a LineItem> + 'a {
        self.products.iter().filter(move |item| item.belongs_to(vendor_id))
    }

    /// 다른 벤더의 라인 아이템을 제거합니다.
    pub fn retain_vendor_items(&mut self, vendor_id: &ObjectId) {
        self.products.retain(|item| item.belongs_to(vendor_id));
    }

    /// 벤더 몫의 매출 (취소된 라인 아이템 제외)
    pub fn vendor_subtotal(&self, vendor_id: &ObjectId) -> f64 {
        self.vendor_items(vendor_id)
            .filter(|item| item.status != LineItemStatus::Cancelled)
            .map(LineItem::subtotal)
            .sum()
    }

    pub fn line_item_mut(&mut self, item_id: &ObjectId) -> Option<&mut LineItem> {
        self.products.iter_mut().find(|item| &item.id == item_id)
    }
}
