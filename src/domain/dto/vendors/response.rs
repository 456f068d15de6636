use mongodb::bson::{oid::ObjectId, DateTime};
use serde::Serialize;
use crate::domain::entities::vendors::Vendor;

/// 벤더 응답 DTO
///
/// 비밀번호 해시를 제외한 벤더 정보입니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorResponse {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub phone_number: String,
    pub role: String,
    pub zip_code: String,
    pub available_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    pub verified: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<Vendor> for VendorResponse {
    fn from(vendor: Vendor) -> Self {
        let Vendor {
            id,
            name,
            email,
            description,
            address,
            phone_number,
            role,
            zip_code,
            available_balance,
            commission,
            verified,
            created_at,
            updated_at,
            ..
        } = vendor;

        Self {
            id,
            name,
            email,
            description,
            address,
            phone_number,
            role,
            zip_code,
            available_balance,
            commission,
            verified,
            created_at,
            updated_at,
        }
    }
}

/// 로그인/가입 성공 응답
#[derive(Debug, Clone, Serialize)]
pub struct VendorSessionResponse {
    pub vendor: VendorResponse,
    pub token: String,
}
