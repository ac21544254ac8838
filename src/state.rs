use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// 핸들러와 미들웨어가 공유하는 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self { db, config }
    }
}
