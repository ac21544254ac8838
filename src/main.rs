use std::net::SocketAddr;

use hotel_server::config::{establish_connection, AppConfig};
use hotel_server::domain::auth::service::AuthService;
use hotel_server::domain::health::init_start_time;
use hotel_server::global::shutdown::shutdown_signal;
use hotel_server::utils::logging::init_logging;
use hotel_server::{create_app, AppState};

#[tokio::main]
async fn main() {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 종료 시까지 유지)
    let _log_guard = init_logging();
    init_start_time();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server terminated with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // 3. 설정 및 DB 연결
    let config = AppConfig::from_env()?;
    let db = establish_connection(&config.database_url).await?;

    AuthService::ensure_admin_account(&db, &config).await?;

    // 4. 라우터 설정
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = create_app(AppState::new(db, config));

    // 5. 서버 실행
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
