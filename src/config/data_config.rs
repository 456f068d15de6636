//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버 바인딩, CORS, 요청 속도 제한, 패스워드 해싱 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우
    /// `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 로컬 개발/테스트 환경 여부
    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위의 값이면 그대로 사용하고,
    /// 그 외에는 환경별 기본값을 사용합니다.
    ///
    /// # Environment Defaults
    ///
    /// - Development/Test: 4
    /// - Staging: 10
    /// - Production: 12
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| Self::parse_cost(&raw))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }

    fn parse_cost(raw: &str) -> Option<u32> {
        raw.trim()
            .parse::<u32>()
            .ok()
            .filter(|cost| (4..=15).contains(cost))
    }
}

/// 서버 바인딩 및 CORS 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다. 기본값: 8080
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 쿠키 인증을 허용할 프론트엔드 오리진 목록
    ///
    /// `CORS_ALLOWED_ORIGINS`에 쉼표로 구분해 지정합니다.
    /// 기본값: `http://localhost:3000`
    ///
    /// ```bash
    /// export CORS_ALLOWED_ORIGINS="https://vendor.example.com,https://admin.example.com"
    /// ```
    pub fn cors_allowed_origins() -> Vec<String> {
        Self::parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        )
    }

    /// JSON 요청 본문 최대 크기 (바이트)
    ///
    /// 카테고리/상품 이미지가 base64로 본문에 실려 오므로 actix 기본값(2MB)보다
    /// 크게 잡습니다. `JSON_PAYLOAD_LIMIT_MB`로 지정하며 기본값은 10MB입니다.
    pub fn json_payload_limit() -> usize {
        Self::parse_limit_mb(&env::var("JSON_PAYLOAD_LIMIT_MB").unwrap_or_default())
            .unwrap_or(Self::DEFAULT_JSON_LIMIT_MB)
            * 1024
            * 1024
    }

    const DEFAULT_JSON_LIMIT_MB: usize = 10;

    fn parse_limit_mb(raw: &str) -> Option<usize> {
        raw.trim().parse::<usize>().ok().filter(|mb| (1..=100).contains(mb))
    }

    fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// MongoDB 연결 URI. 기본값: `mongodb://localhost:27017`
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    /// 사용할 데이터베이스 이름. 기본값: `textiles_ecommerce`
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "textiles_ecommerce".to_string())
    }

    /// 드라이버에 전달할 애플리케이션 이름
    pub fn app_name() -> String {
        "vendor_backoffice".to_string()
    }
}

/// 요청 속도 제한 설정 (actix-governor)
pub struct RateLimitConfig;

impl RateLimitConfig {
    /// 초당 허용 요청 수. 기본값: 100
    pub fn per_second() -> u64 {
        env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(100)
    }

    /// 버스트 허용량. 기본값: 200
    pub fn burst_size() -> u32 {
        env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_environment_is_local() {
        assert!(Environment::Development.is_local());
        assert!(Environment::Test.is_local());
        assert!(!Environment::Staging.is_local());
        assert!(!Environment::Production.is_local());
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_bcrypt_cost_rejects_out_of_range() {
        assert_eq!(PasswordConfig::parse_cost("10"), Some(10));
        assert_eq!(PasswordConfig::parse_cost("3"), None);
        assert_eq!(PasswordConfig::parse_cost("16"), None);
        assert_eq!(PasswordConfig::parse_cost("abc"), None);
    }

    #[test]
    fn test_parse_origins() {
        let origins = ServerConfig::parse_origins(" https://a.example.com/ , ,http://localhost:3000");
        assert_eq!(origins, vec!["https://a.example.com", "http://localhost:3000"]);
    }

    #[test]
    fn test_parse_json_limit() {
        assert_eq!(ServerConfig::parse_limit_mb(" 25 "), Some(25));
        assert_eq!(ServerConfig::parse_limit_mb("0"), None);
        assert_eq!(ServerConfig::parse_limit_mb("500"), None);
        assert_eq!(ServerConfig::parse_limit_mb("lots"), None);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }

        if env::var("JSON_PAYLOAD_LIMIT_MB").is_err() {
            assert_eq!(ServerConfig::json_payload_limit(), 10 * 1024 * 1024);
        }

        if env::var("DATABASE_NAME").is_err() {
            assert_eq!(DatabaseConfig::database_name(), "textiles_ecommerce");
        }
    }
}
