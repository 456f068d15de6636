//! 업로드 입력 파싱
//!
//! 프론트엔드는 이미지를 `data:<mime>;base64,<data>` 형식 또는
//! 접두사 없는 base64 문자열로 보냅니다.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crate::core::errors::{AppError, AppResult};

/// Cloudinary 리소스 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Image,
    Video,
    Raw,
}

impl ResourceType {
    fn from_mime(mime: &str) -> Self {
        match mime.split('/').next().unwrap_or_default() {
            "image" => ResourceType::Image,
            "video" | "audio" => ResourceType::Video,
            _ => ResourceType::Raw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Video => "video",
            ResourceType::Raw => "raw",
        }
    }
}

/// 검증된 업로드 입력
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub resource_type: ResourceType,
    pub mime: String,
    /// MIME 하위 타입에서 얻은 확장자 (`jpeg`, `png`, `svg` ...)
    pub format: String,
    data: String,
}

impl MediaPayload {
    /// 입력 문자열을 파싱하고 base64 본문을 검증합니다.
    ///
    /// 접두사가 없으면 `image/jpeg`로 간주합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 비어있거나, data URI 형식이 아니거나,
    ///   base64 디코딩에 실패한 경우
    pub fn parse(input: &str) -> AppResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AppError::ValidationError("Image data is empty".to_string()));
        }

        let (mime, data) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest
                    .split_once(',')
                    .ok_or_else(|| AppError::ValidationError("Malformed data URI".to_string()))?;
                let mime = header
                    .strip_suffix(";base64")
                    .ok_or_else(|| AppError::ValidationError("Only base64 data URIs are supported".to_string()))?;
                let mime = if mime.is_empty() { "application/octet-stream" } else { mime };
                (mime.to_lowercase(), data.trim())
            }
            None => ("image/jpeg".to_string(), input),
        };

        if data.is_empty() || STANDARD.decode(data).is_err() {
            return Err(AppError::ValidationError("Image data is not valid base64".to_string()));
        }

        let format = mime
            .split('/')
            .nth(1)
            .and_then(|subtype| subtype.split(['+', ';']).next())
            .unwrap_or("bin")
            .to_string();

        Ok(Self {
            resource_type: ResourceType::from_mime(&mime),
            mime,
            format,
            data: data.to_string(),
        })
    }

    /// 정규화된 data URI (`data:<mime>;base64,<data>`)
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data)
    }
}
