//! 쿠폰 요청 DTO
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;
use crate::core::errors::AppResult;
use crate::domain::entities::coupons::CouponTerms;
use crate::utils::string_utils::deserialize_flexible_f64;
use crate::utils::time_utils::deserialize_loose_date;

/// 쿠폰 생성/수정 요청
///
/// 날짜는 `YYYY-MM-DD` 또는 ISO-8601 날짜-시간 문자열을 받습니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CouponRequest {
    #[validate(length(min = 1, message = "Coupon code is required"))]
    pub coupon: String,
    #[serde(deserialize_with = "deserialize_flexible_f64")]
    pub discount: f64,
    #[serde(deserialize_with = "deserialize_loose_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_loose_date")]
    pub end_date: NaiveDate,
}

impl CouponRequest {
    /// 코드 정규화와 길이/할인율/기간 검증을 거친 쿠폰 조건
    pub fn terms(&self) -> AppResult<CouponTerms> {
        CouponTerms::new(&self.coupon, self.discount, self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coupon_request_to_terms() {
        let request: CouponRequest = serde_json::from_value(json!({
            "coupon": " festive ",
            "discount": "20",
            "startDate": "2025-10-01T00:00:00.000Z",
            "endDate": "2025-10-15",
        }))
        .unwrap();

        let terms = request.terms().unwrap();
        assert_eq!(terms.code, "FESTIVE");
        assert_eq!(terms.discount, 20.0);
        assert_eq!(terms.start_date, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result: Result<CouponRequest, _> = serde_json::from_value(json!({
            "coupon": "FESTIVE",
            "discount": 20,
            "startDate": "tomorrow",
            "endDate": "2025-10-15",
        }));

        assert!(result.is_err());
    }
}
