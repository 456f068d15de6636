//! 이미지 CDN(Cloudinary) 설정

use std::env;
use crate::core::errors::AppError;

/// Cloudinary 계정 설정
///
/// ```bash
/// export CLOUDINARY_CLOUD_NAME="my-cloud"
/// export CLOUDINARY_API_KEY="123456789012345"
/// export CLOUDINARY_API_SECRET="abcdefg"
/// export CLOUDINARY_UPLOAD_PRESET="website"
/// ```
///
/// 계정의 서명 알고리즘은 SHA-256으로 설정되어 있어야 합니다.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub upload_preset: String,
    pub api_base: String,
}

impl CloudinaryConfig {
    /// 환경 변수에서 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 계정 이름, API 키, 시크릿 중 하나라도 없는 경우
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            cloud_name: Self::required("CLOUDINARY_CLOUD_NAME")?,
            api_key: Self::required("CLOUDINARY_API_KEY")?,
            api_secret: Self::required("CLOUDINARY_API_SECRET")?,
            upload_preset: env::var("CLOUDINARY_UPLOAD_PRESET")
                .unwrap_or_else(|_| "website".to_string()),
            api_base: env::var("CLOUDINARY_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string()),
        })
    }

    fn required(key: &str) -> Result<String, AppError> {
        env::var(key)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::InternalError(format!("{} must be set", key)))
    }

    /// `{base}/{cloud}/{resource_type}/{action}`
    pub fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!("{}/{}/{}/{}", self.api_base, self.cloud_name, resource_type, action)
    }
}
