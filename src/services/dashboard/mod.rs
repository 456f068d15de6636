//! 대시보드 / 분석 서비스 모듈
//!
//! - [`DashboardService`] - 최근 주문, 재고 경고, 매출 요약, 상태별 주문 수
//! - [`AnalyticsService`] - 월별 주문/상품 수, 사이즈별 판매량, 인기 상품

pub mod dashboard_service;
pub mod analytics_service;

pub use dashboard_service::*;
pub use analytics_service::*;
