//! 카탈로그 서비스 모듈
//!
//! - [`CategoryService`] - 카테고리 (모든 벤더 공유)
//! - [`SubCategoryService`] - 서브카테고리와 부모 카테고리 연결
//! - [`ProductService`] - 상품과 색상/사이즈 변형
//!
//! 이미지 업로드/삭제는 [`MediaStore`](crate::media::MediaStore)를 통해 동시에 처리합니다.

pub mod category_service;
pub mod sub_category_service;
pub mod product_service;

pub use category_service::*;
pub use sub_category_service::*;
pub use product_service::*;

use std::sync::Arc;
use crate::core::errors::AppResult;
use crate::core::registry::ServiceLocator;
use crate::domain::entities::common::ImageAsset;
use crate::media::{destroy_all, upload_all, CloudinaryClient, MediaStore};

/// 등록된 이미지 CDN 클라이언트
pub(crate) fn media_store() -> AppResult<Arc<dyn MediaStore>> {
    let client: Arc<dyn MediaStore> = ServiceLocator::get::<CloudinaryClient>()?;
    Ok(client)
}

/// 이미지를 올리고 문서에 저장할 형태로 바꿉니다.
pub(crate) async fn upload_images(media: &dyn MediaStore, inputs: &[String]) -> AppResult<Vec<ImageAsset>> {
    let uploaded = upload_all(media, inputs).await?;
    Ok(uploaded.into_iter().map(ImageAsset::from).collect())
}

/// 문서 저장이 실패했을 때 방금 올린 이미지를 지웁니다.
pub(crate) async fn discard_images(media: &dyn MediaStore, images: &[ImageAsset]) {
    let ids = crate::domain::entities::common::public_ids(images);
    if !ids.is_empty() {
        log::warn!("Discarding {} uploaded image(s) after failed save", ids.len());
        destroy_all(media, &ids).await;
    }
}

/// 삭제된 문서의 이미지를 지웁니다. 실패는 로그만 남깁니다.
pub(crate) async fn release_images(media: &dyn MediaStore, owner: &str, public_ids: &[String]) {
    if public_ids.is_empty() {
        return;
    }

    let failures = destroy_all(media, public_ids).await;
    if failures > 0 {
        log::warn!("{}: {} of {} image(s) could not be deleted", owner, failures, public_ids.len());
    } else {
        log::info!("🗑️ {}: deleted {} image(s)", owner, public_ids.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::tests::{RecordingStore, PIXEL};

    #[actix_web::test]
    async fn test_upload_images_maps_to_assets() {
        let store = RecordingStore::default();
        let inputs = vec![format!("data:image/png;base64,{}", PIXEL)];

        let images = upload_images(&store, &inputs).await.unwrap();

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].public_id, "img_0");
        assert!(images[0].url.ends_with(".png"));
    }

    #[actix_web::test]
    async fn test_discard_and_release_destroy_every_image() {
        let store = RecordingStore::default();
        let images = vec![
            ImageAsset { url: "u".to_string(), public_id: "a".to_string() },
            ImageAsset { url: "u".to_string(), public_id: String::new() },
        ];

        discard_images(&store, &images).await;
        release_images(&store, "Category", &["b".to_string(), "c".to_string()]).await;

        let mut destroyed = store.destroyed.lock().unwrap().clone();
        destroyed.sort();
        assert_eq!(destroyed, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    }
}
