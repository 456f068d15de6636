//! Cloudinary REST 클라이언트
//!
//! 업로드와 삭제는 서명된 `application/x-www-form-urlencoded` 요청으로 보냅니다.
//!
//! ```text
//! POST {base}/{cloud}/{resource_type}/upload   file, timestamp, upload_preset, api_key, signature
//! POST {base}/{cloud}/image/destroy            public_id, timestamp, api_key, signature
//! ```
//!
//! 서명은 `file`, `api_key`, `resource_type`을 제외한 파라미터를 키 순으로
//! `k=v&k=v` 형태로 이어붙이고 API 시크릿을 덧붙인 문자열의 SHA-256 hex입니다.

use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use crate::config::CloudinaryConfig;
use crate::core::errors::{AppError, AppResult};
use crate::media::payload::MediaPayload;
use crate::media::{MediaStore, UploadedMedia};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http: reqwest::Client,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// 환경 변수로 클라이언트를 생성합니다.
    pub fn from_env() -> AppResult<Self> {
        let config = CloudinaryConfig::from_env()?;
        log::info!("🖼️ Cloudinary 설정 로드: cloud={}", config.cloud_name);
        Ok(Self::new(config))
    }

    fn sign(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
        let to_sign = params
            .iter()
            .filter(|(key, value)| !matches!(**key, "file" | "api_key" | "resource_type") && !value.is_empty())
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(api_secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn signed_form(&self, mut params: BTreeMap<&'static str, String>) -> BTreeMap<&'static str, String> {
        params.insert("timestamp", Utc::now().timestamp().to_string());
        let signature = Self::sign(&params, &self.config.api_secret);
        params.insert("api_key", self.config.api_key.clone());
        params.insert("signature", signature);
        params
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        url: &str,
        form: &BTreeMap<&'static str, String>,
    ) -> AppResult<T> {
        let response = self.http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Cloudinary request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Cloudinary responded {}: {}",
                status, message
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Cloudinary response parse failed: {}", e)))
    }
}

#[async_trait]
impl MediaStore for CloudinaryClient {
    async fn upload(&self, payload: &MediaPayload) -> AppResult<UploadedMedia> {
        let mut params = BTreeMap::new();
        params.insert("file", payload.to_data_uri());
        params.insert("upload_preset", self.config.upload_preset.clone());

        let form = self.signed_form(params);
        let url = self.config.endpoint(payload.resource_type.as_str(), "upload");
        let uploaded: UploadResponse = self.post_form(&url, &form).await?;

        log::debug!("Uploaded media {}", uploaded.public_id);

        Ok(UploadedMedia {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> AppResult<()> {
        let mut params = BTreeMap::new();
        params.insert("public_id", public_id.to_string());

        let form = self.signed_form(params);
        let url = self.config.endpoint("image", "destroy");
        let destroyed: DestroyResponse = self.post_form(&url, &form).await?;

        match destroyed.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(AppError::ExternalServiceError(format!(
                "Cloudinary destroy of {} returned '{}'",
                public_id, other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_ignores_file_and_api_key() {
        let mut params = BTreeMap::new();
        params.insert("timestamp", "1315060510".to_string());
        params.insert("public_id", "sample_image".to_string());
        params.insert("file", "data:image/png;base64,AAAA".to_string());
        params.insert("api_key", "1234".to_string());

        let with_extras = CloudinaryClient::sign(&params, "abcd");

        params.remove("file");
        params.remove("api_key");
        let without_extras = CloudinaryClient::sign(&params, "abcd");

        assert_eq!(with_extras, without_extras);
        assert_eq!(with_extras.len(), 64);
    }

    #[test]
    fn test_signature_is_sha256_of_sorted_params() {
        let mut params = BTreeMap::new();
        params.insert("timestamp", "1315060510".to_string());
        params.insert("public_id", "sample_image".to_string());

        let mut hasher = Sha256::new();
        hasher.update(b"public_id=sample_image&timestamp=1315060510abcd");
        let expected = format!("{:x}", hasher.finalize());

        assert_eq!(CloudinaryClient::sign(&params, "abcd"), expected);
    }

    #[test]
    fn test_signed_form_contains_credentials() {
        let client = CloudinaryClient::new(CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            upload_preset: "website".to_string(),
            api_base: "https://api.cloudinary.com/v1_1".to_string(),
        });

        let form = client.signed_form(BTreeMap::from([("public_id", "abc".to_string())]));

        assert_eq!(form.get("api_key").map(String::as_str), Some("key"));
        assert!(form.contains_key("timestamp"));
        assert_eq!(form.get("signature").map(String::len), Some(64));
    }
}
