//! 주문 조회/상태 변경 요청 DTO
use serde::Deserialize;
use validator::Validate;
use crate::utils::time_utils::OrderRange;

/// `GET /orders?range=7d&isPaid=paid&paymentMethod=cash`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub is_paid: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl OrdersQuery {
    /// 알 수 없는 기간 키는 전체 기간입니다.
    pub fn order_range(&self) -> OrderRange {
        OrderRange::from_key(self.range.as_deref().unwrap_or_default())
    }

    /// `paid` → true, `unPaid` → false, 그 외에는 필터 없음
    pub fn paid_filter(&self) -> Option<bool> {
        match self.is_paid.as_deref() {
            Some("paid") => Some(true),
            Some("unPaid") => Some(false),
            _ => None,
        }
    }

    /// `cash` | `RazorPay`, 그 외에는 필터 없음
    pub fn payment_method_filter(&self) -> Option<&'static str> {
        match self.payment_method.as_deref() {
            Some("cash") => Some("cash"),
            Some("RazorPay") => Some("RazorPay"),
            _ => None,
        }
    }
}

/// 라인 아이템 상태 변경 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLineItemStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(range: Option<&str>, paid: Option<&str>, method: Option<&str>) -> OrdersQuery {
        OrdersQuery {
            range: range.map(str::to_string),
            is_paid: paid.map(str::to_string),
            payment_method: method.map(str::to_string),
        }
    }

    #[test]
    fn test_paid_filter() {
        assert_eq!(query(None, Some("paid"), None).paid_filter(), Some(true));
        assert_eq!(query(None, Some("unPaid"), None).paid_filter(), Some(false));
        assert_eq!(query(None, Some("all"), None).paid_filter(), None);
        assert_eq!(query(None, None, None).paid_filter(), None);
    }

    #[test]
    fn test_payment_method_filter() {
        assert_eq!(query(None, None, Some("cash")).payment_method_filter(), Some("cash"));
        assert_eq!(query(None, None, Some("RazorPay")).payment_method_filter(), Some("RazorPay"));
        assert_eq!(query(None, None, Some("razorpay")).payment_method_filter(), None);
    }

    #[test]
    fn test_order_range_defaults_to_all() {
        assert_eq!(query(None, None, None).order_range(), OrderRange::All);
        assert_eq!(query(Some("7d"), None, None).order_range(), OrderRange::Days(7));
        assert_eq!(query(Some("bogus"), None, None).order_range(), OrderRange::All);
    }

    #[test]
    fn test_query_string_names() {
        let parsed: OrdersQuery =
            serde_json::from_value(serde_json::json!({ "range": "today", "isPaid": "paid", "paymentMethod": "cash" }))
                .unwrap();

        assert_eq!(parsed.order_range(), OrderRange::Today);
        assert_eq!(parsed.paid_filter(), Some(true));
    }
}
