//! Customer Entity
//!
//! 스토어프론트 고객 계정입니다. 계정 관리는 외부 인증 서비스(Clerk)가 담당하며,
//! 벤더 백오피스는 주문 목록에 고객 정보를 붙일 때만 읽습니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 주문 목록에 노출되는 고객 요약 (`name`, `email`, `image`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: String,
}

impl CustomerSummary {
    /// 조회 시 사용할 projection 필드
    pub const PROJECTION: [&'static str; 3] = ["name", "email", "image"];
}
