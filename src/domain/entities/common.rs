//! 여러 컬렉션이 공유하는 임베디드 값 객체

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::media::UploadedMedia;
use crate::utils::string_utils::deserialize_string_or_number;

/// CDN에 올라간 이미지
///
/// 필드 이름은 스토어프론트와 공유하는 문서 형식을 따릅니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub public_id: String,
}

impl From<UploadedMedia> for ImageAsset {
    fn from(media: UploadedMedia) -> Self {
        Self {
            url: media.url,
            public_id: media.public_id,
        }
    }
}

/// 이미지 목록에서 삭제 대상 public id만 추립니다.
pub fn public_ids(images: &[ImageAsset]) -> Vec<String> {
    images
        .iter()
        .filter(|image| !image.public_id.is_empty())
        .map(|image| image.public_id.clone())
        .collect()
}

/// 문서에 임베드되는 벤더 정보
///
/// 작성 시점의 벤더 복사본이며 비밀번호는 포함하지 않습니다.
/// 벤더 범위 조회는 모두 `vendor._id`를 기준으로 합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSnapshot {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_optional_text")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_optional_text")]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "deserialize_string_or_number")] String);

    Option::<Wrapper>::deserialize(deserializer).map(|value| value.map(|Wrapper(text)| text))
}

/// 색상 스와치 (`{ color, image }`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSwatch {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub image: String,
}

/// 이름만 가진 항목 (효능, 성분)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedItem {
    #[serde(default)]
    pub name: String,
}

/// 상품 상세 스펙 (`{ name, value }`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// 자주 묻는 질문
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document};

    #[test]
    fn test_public_ids_skip_empty() {
        let images = vec![
            ImageAsset { url: "https://cdn/a.png".to_string(), public_id: "a".to_string() },
            ImageAsset { url: "https://cdn/b.png".to_string(), public_id: String::new() },
        ];

        assert_eq!(public_ids(&images), vec!["a".to_string()]);
    }

    #[test]
    fn test_vendor_snapshot_accepts_numeric_contact_fields() {
        let id = ObjectId::new();
        let snapshot: VendorSnapshot = from_document(doc! {
            "_id": id,
            "name": "Loom House",
            "email": "loom@example.com",
            "phoneNumber": 9876543210_i64,
            "zipCode": 560001,
            "password": "should-be-ignored",
        })
        .unwrap();

        assert_eq!(snapshot.id, id);
        assert_eq!(snapshot.phone_number.as_deref(), Some("9876543210"));
        assert_eq!(snapshot.zip_code.as_deref(), Some("560001"));
        assert!(!snapshot.verified);
    }
}
