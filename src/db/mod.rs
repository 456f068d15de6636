//! Database Connection Management Module
//!
//! MongoDB 연결을 관리합니다. 드라이버가 연결 풀을 관리하므로
//! `Database`는 클라이언트와 데이터베이스 이름만 보관합니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::Database;
//! use crate::core::registry::ServiceLocator;
//!
//! let database = Database::new().await?;
//! ServiceLocator::set(Arc::new(database))?;
//! ServiceLocator::initialize_all().await?;
//! ```

use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use log::info;
use crate::config::DatabaseConfig;
use crate::core::errors::AppError;

/// MongoDB 데이터베이스 연결 래퍼
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// [`DatabaseConfig`]의 설정으로 연결합니다.
    ///
    /// ## 환경 변수
    /// - `MONGODB_URI`: 기본값 "mongodb://localhost:27017"
    /// - `DATABASE_NAME`: 기본값 "textiles_ecommerce"
    pub async fn new() -> Result<Self, AppError> {
        Self::connect(&DatabaseConfig::uri(), &DatabaseConfig::database_name()).await
    }

    /// 주어진 URI와 데이터베이스에 연결하고 `ping`으로 연결을 확인합니다.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Invalid MongoDB URI: {}", e)))?;
        client_options.app_name = Some(DatabaseConfig::app_name());

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        client
            .database(database_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB ping failed: {}", e)))?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name: database_name.to_string(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 타입이 지정된 컬렉션 핸들을 반환합니다.
    ///
    /// ```rust,ignore
    /// let vendors = database.collection::<Vendor>("vendors");
    /// ```
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.get_database().collection::<T>(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
