use std::env;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: i64,
    pub bcrypt_cost: u32,

    /// 접속 로그 조회에서 제외할 IP (운영자 사무실 등)
    pub access_log_excluded_ip: Option<String>,

    // 최초 기동 시 생성할 관리자 계정
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_SECRET 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
            );
            "secret".to_string()
        });

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidExpiration)?;

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidBcryptCost)?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let access_log_excluded_ip = non_empty_var("ACCESS_LOG_EXCLUDED_IP");
        let admin_username = non_empty_var("ADMIN_USERNAME");
        let admin_password = non_empty_var("ADMIN_PASSWORD");

        Ok(Self {
            server_port,
            database_url,
            jwt_secret,
            jwt_expiration,
            bcrypt_cost,
            access_log_excluded_ip,
            admin_username,
            admin_password,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid expiration time")]
    InvalidExpiration,
    #[error("Invalid bcrypt cost")]
    InvalidBcryptCost,
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,
}
