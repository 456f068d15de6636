//! # Media Module
//!
//! 카테고리/서브카테고리/상품 이미지를 외부 이미지 CDN에 올리고 지웁니다.
//!
//! - [`payload`] - data URI / base64 입력 파싱
//! - [`cloudinary`] - Cloudinary REST 구현체
//!
//! 서비스는 [`MediaStore`] 트레이트에만 의존하며, 여러 장의 이미지는
//! [`upload_all`] / [`destroy_all`]로 동시에 처리합니다.

pub mod payload;
pub mod cloudinary;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};

pub use cloudinary::CloudinaryClient;
pub use payload::{MediaPayload, ResourceType};

/// 업로드 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub url: String,
    pub public_id: String,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, payload: &MediaPayload) -> AppResult<UploadedMedia>;

    /// 이미 없는 리소스를 지우는 것은 성공으로 취급합니다.
    async fn destroy(&self, public_id: &str) -> AppResult<()>;
}

/// 입력 전체를 검증한 뒤 동시에 업로드합니다.
///
/// 하나라도 실패하면 이미 올라간 이미지는 지우고 첫 번째 에러를 반환합니다.
/// 결과 순서는 입력 순서와 같습니다.
pub async fn upload_all(store: &dyn MediaStore, inputs: &[String]) -> AppResult<Vec<UploadedMedia>> {
    let payloads = inputs
        .iter()
        .map(|input| MediaPayload::parse(input))
        .collect::<AppResult<Vec<_>>>()?;

    let results = join_all(payloads.iter().map(|payload| store.upload(payload))).await;

    let mut uploaded = Vec::with_capacity(results.len());
    let mut first_error: Option<AppError> = None;

    for result in results {
        match result {
            Ok(media) => uploaded.push(media),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        None => Ok(uploaded),
        Some(error) => {
            let orphans: Vec<String> = uploaded.into_iter().map(|m| m.public_id).collect();
            if !orphans.is_empty() {
                log::warn!("Upload batch failed, removing {} uploaded image(s)", orphans.len());
                destroy_all(store, &orphans).await;
            }
            Err(error)
        }
    }
}

/// 이미지를 동시에 삭제합니다.
///
/// 소유 문서는 이미 지워진 상태이므로 실패는 로그만 남기고,
/// 실패 개수를 반환합니다.
pub async fn destroy_all(store: &dyn MediaStore, public_ids: &[String]) -> usize {
    let results = join_all(public_ids.iter().map(|id| async move {
        (id, store.destroy(id).await)
    }))
    .await;

    results
        .into_iter()
        .filter(|(id, result)| match result {
            Ok(()) => false,
            Err(e) => {
                log::error!("Failed to delete image {}: {}", id, e);
                true
            }
        })
        .count()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    pub(crate) const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    /// 업로드/삭제 호출을 기록하는 테스트용 저장소
    #[derive(Default)]
    pub(crate) struct RecordingStore {
        pub uploads: Mutex<Vec<String>>,
        pub destroyed: Mutex<Vec<String>>,
        /// 이 MIME 타입의 업로드는 실패
        pub fail_mime: Option<String>,
        /// 이 id의 삭제는 실패
        pub fail_destroy: Option<String>,
    }

    #[async_trait]
    impl MediaStore for RecordingStore {
        async fn upload(&self, payload: &MediaPayload) -> AppResult<UploadedMedia> {
            if self.fail_mime.as_deref() == Some(payload.mime.as_str()) {
                return Err(AppError::ExternalServiceError("upload rejected".to_string()));
            }

            let mut uploads = self.uploads.lock().unwrap();
            let public_id = format!("img_{}", uploads.len());
            uploads.push(public_id.clone());

            Ok(UploadedMedia {
                url: format!("https://cdn.test/{}.{}", public_id, payload.format),
                public_id,
            })
        }

        async fn destroy(&self, public_id: &str) -> AppResult<()> {
            if self.fail_destroy.as_deref() == Some(public_id) {
                return Err(AppError::ExternalServiceError("destroy rejected".to_string()));
            }
            self.destroyed.lock().unwrap().push(public_id.to_string());
            Ok(())
        }
    }

    fn data_uri(mime: &str) -> String {
        format!("data:{};base64,{}", mime, PIXEL)
    }

    #[actix_web::test]
    async fn test_upload_all_preserves_order() {
        let store = RecordingStore::default();
        let inputs = vec![data_uri("image/png"), data_uri("image/webp")];

        let uploaded = upload_all(&store, &inputs).await.unwrap();

        assert_eq!(uploaded.len(), 2);
        assert!(uploaded[0].url.ends_with(".png"));
        assert!(uploaded[1].url.ends_with(".webp"));
    }

    #[actix_web::test]
    async fn test_upload_all_rejects_invalid_input_before_uploading() {
        let store = RecordingStore::default();
        let inputs = vec![data_uri("image/png"), "%%%".to_string()];

        let result = upload_all(&store, &inputs).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(store.uploads.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_upload_all_cleans_up_on_partial_failure() {
        let store = RecordingStore {
            fail_mime: Some("image/gif".to_string()),
            ..Default::default()
        };
        let inputs = vec![data_uri("image/png"), data_uri("image/gif")];

        let result = upload_all(&store, &inputs).await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
        assert_eq!(*store.destroyed.lock().unwrap(), vec!["img_0".to_string()]);
    }

    #[actix_web::test]
    async fn test_destroy_all_counts_failures() {
        let store = RecordingStore {
            fail_destroy: Some("b".to_string()),
            ..Default::default()
        };
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let failures = destroy_all(&store, &ids).await;

        assert_eq!(failures, 1);
        let mut destroyed = store.destroyed.lock().unwrap().clone();
        destroyed.sort();
        assert_eq!(destroyed, vec!["a".to_string(), "c".to_string()]);
    }

    #[actix_web::test]
    async fn test_empty_batches() {
        let store = RecordingStore::default();

        assert!(upload_all(&store, &[]).await.unwrap().is_empty());
        assert_eq!(destroy_all(&store, &[]).await, 0);
    }
}
