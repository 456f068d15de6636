//! 벤더 백오피스 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB 연결과 Cloudinary 클라이언트를 준비한 뒤 벤더용 REST API를 제공합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use env_logger::Env;
use log::{error, info, warn};
use vendor_backoffice_backend::config::{Environment, RateLimitConfig, ServerConfig};
use vendor_backoffice_backend::core::errors::AppError;
use vendor_backoffice_backend::core::registry::ServiceLocator;
use vendor_backoffice_backend::db::Database;
use vendor_backoffice_backend::media::CloudinaryClient;
use vendor_backoffice_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 로깅을 먼저 켜야 .env 로드 결과가 보입니다
    init_logging();
    load_env_file();

    info!("🚀 벤더 백오피스 서비스 시작중... ({:?})", Environment::current());

    initialize_infrastructure().await.map_err(into_io_error)?;

    ServiceLocator::initialize_all()
        .await
        .map_err(into_io_error)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate limiting, CORS, 요청 로깅, 경로 정규화 미들웨어를 적용합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Vendor API: http://{}/api/v1/vendor", bind_address);

    let per_second = RateLimitConfig::per_second();
    let burst_size = RateLimitConfig::burst_size();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(per_second)
        .burst_size(burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| into_io_error(AppError::InternalError("Invalid rate limit configuration".to_string())))?;

    info!("🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개", per_second, burst_size);

    let allowed_origins = ServerConfig::cors_allowed_origins();
    info!("🔓 CORS 허용 오리진: {:?}", allowed_origins);

    HttpServer::new(move || {
        let cors = configure_cors(&allowed_origins);

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
///
/// 이어서 기본 `.env`를 읽어 빠진 값을 채웁니다.
///
/// ```bash
/// PROFILE=prod cargo run
/// ```
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    let profile_file = match profile.as_str() {
        "prod" => ".env.prod",
        _ => ".env.dev",
    };

    match dotenv::from_filename(profile_file) {
        Ok(_) => info!("{} 파일 로드 됨", profile_file),
        Err(e) => warn!("{} 파일 로드 실패: {}", profile_file, e),
    }

    if dotenv::dotenv().is_ok() {
        info!("기본 .env 파일 로드");
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=vendor_backoffice_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Cloudinary 클라이언트를 만들어 ServiceLocator에 등록합니다
///
/// # Errors
///
/// * `AppError::DatabaseError` - MongoDB 연결 실패
/// * `AppError::InternalError` - Cloudinary 설정 누락
async fn initialize_infrastructure() -> Result<(), AppError> {
    info!("📡 데이터베이스 연결 중...");
    let database = Database::new().await?;
    ServiceLocator::set(Arc::new(database))?;
    info!("✅ MongoDB 연결 성공");

    let cloudinary = CloudinaryClient::from_env()?;
    ServiceLocator::set(Arc::new(cloudinary))?;
    info!("✅ Cloudinary 클라이언트 준비 완료");

    Ok(())
}

/// 쿠키 인증을 위해 오리진을 명시하고 자격 증명을 허용합니다
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

fn into_io_error(err: AppError) -> std::io::Error {
    error!("❌ 서버 시작 실패: {}", err);
    std::io::Error::other(err.to_string())
}
