//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//! 각 설정은 `XxxConfig::value()` 형태의 정적 접근자로 제공됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 데이터베이스, 속도 제한, 패스워드 해싱
//! - [`auth_config`] - JWT 토큰과 인증 쿠키
//! - [`media_config`] - Cloudinary 계정
//!
//! ## 프로파일
//!
//! `PROFILE` 값에 따라 `.env.dev`(기본) 또는 `.env.prod`를 먼저 읽고,
//! 이어서 `.env`를 읽습니다. 이미 설정된 환경 변수는 덮어쓰지 않습니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export CORS_ALLOWED_ORIGINS="http://localhost:3000"
//!
//! # 데이터베이스
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="textiles_ecommerce"
//!
//! # 인증
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_DAYS="90"
//!
//! # 이미지
//! export CLOUDINARY_CLOUD_NAME="my-cloud"
//! export CLOUDINARY_API_KEY="..."
//! export CLOUDINARY_API_SECRET="..."
//!
//! # 선택
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! export RATE_LIMIT_PER_SECOND="10"
//! export RATE_LIMIT_BURST_SIZE="50"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod media_config;

pub use data_config::*;
pub use auth_config::*;
pub use media_config::*;

