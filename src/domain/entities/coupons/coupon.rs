//! Coupon Entity

use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::common::VendorSnapshot;
use crate::utils::string_utils::deserialize_flexible_f64;
use crate::utils::time_utils::deserialize_loose_date;

pub const COUPON_CODE_MIN: usize = 4;
pub const COUPON_CODE_MAX: usize = 10;

/// 벤더 할인 쿠폰
///
/// 날짜는 스토어프론트와 같이 `YYYY-MM-DD` 문자열로 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 쿠폰 코드 (unique, 대문자, 4-10자)
    pub coupon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorSnapshot>,
    #[serde(deserialize_with = "deserialize_loose_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_loose_date")]
    pub end_date: NaiveDate,
    /// 할인율 (%)
    #[serde(deserialize_with = "deserialize_flexible_f64")]
    pub discount: f64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 검증을 통과한 쿠폰 입력값
#[derive(Debug, Clone, PartialEq)]
pub struct CouponTerms {
    pub code: String,
    pub discount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CouponTerms {
    /// 코드를 정규화(trim + 대문자)하고 조건을 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 코드 길이, 할인율 범위, 기간 순서가 잘못된 경우
    pub fn new(code: &str, discount: f64, start_date: NaiveDate, end_date: NaiveDate) -> AppResult<Self> {
        let code = normalize_code(code);
        let length = code.chars().count();

        if !(COUPON_CODE_MIN..=COUPON_CODE_MAX).contains(&length) {
            return Err(AppError::ValidationError(format!(
                "Coupon code must be between {} and {} characters.",
                COUPON_CODE_MIN, COUPON_CODE_MAX
            )));
        }
        if !discount.is_finite() || !(0.0..=100.0).contains(&discount) {
            return Err(AppError::ValidationError(
                "Discount must be between 0 and 100.".to_string(),
            ));
        }
        if start_date > end_date {
            return Err(AppError::ValidationError(
                "Start date must be before the end date.".to_string(),
            ));
        }

        Ok(Self { code, discount, start_date, end_date })
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl Coupon {
    pub fn new(terms: CouponTerms, vendor: VendorSnapshot) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            coupon: terms.code,
            vendor: Some(vendor),
            start_date: terms.start_date,
            end_date: terms.end_date,
            discount: terms.discount,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, terms: CouponTerms) {
        self.coupon = terms.code;
        self.discount = terms.discount;
        self.start_date = terms.start_date;
        self.end_date = terms.end_date;
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::to_document;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_terms_normalize_code() {
        let terms = CouponTerms::new("  diwali25 ", 25.0, date(2025, 10, 1), date(2025, 10, 31)).unwrap();
        assert_eq!(terms.code, "DIWALI25");
    }

    #[test]
    fn test_terms_validation() {
        let start = date(2025, 1, 1);
        let end = date(2025, 1, 31);

        assert!(CouponTerms::new("ABC", 10.0, start, end).is_err());
        assert!(CouponTerms::new("ABCDEFGHIJK", 10.0, start, end).is_err());
        assert!(CouponTerms::new("SALE", 101.0, start, end).is_err());
        assert!(CouponTerms::new("SALE", -1.0, start, end).is_err());
        assert!(CouponTerms::new("SALE", 10.0, end, start).is_err());
        assert!(CouponTerms::new("SALE", 0.0, start, start).is_ok());
    }

    #[test]
    fn test_dates_stored_as_plain_strings() {
        let vendor = crate::domain::entities::catalog::product::tests::snapshot(ObjectId::new());
        let terms = CouponTerms::new("SALE10", 10.0, date(2025, 3, 1), date(2025, 3, 15)).unwrap();
        let coupon = Coupon::new(terms, vendor);

        let document = to_document(&coupon).unwrap();
        assert_eq!(document.get_str("startDate").unwrap(), "2025-03-01");
        assert_eq!(document.get_str("endDate").unwrap(), "2025-03-15");
    }
}
