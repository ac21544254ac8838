use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use super::client_ip::resolve_client_ip;
use crate::domain::access_log::dto::NewAccessLog;
use crate::domain::access_log::service::AccessLogService;
use crate::domain::blocked_ip::service::BlockedIpService;
use crate::state::AppState;
use crate::utils::auth::extract_token;
use crate::utils::error::AppError;
use crate::utils::jwt::decode_access_token;

const REQUEST_ID_HEADER: &str = "x-request-id";

fn client_ip_of(request: &Request) -> String {
    resolve_client_ip(
        request.headers(),
        request.extensions().get::<ConnectInfo<SocketAddr>>(),
    )
}

/// 요청마다 request id를 부여하고 요청 단위 span을 생성
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %path,
    );

    let start = std::time::Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            duration_ms,
            status = response.status().as_u16(),
            "request completed"
        );

        response.headers_mut().insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_str(&request_id)
                .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
        );
        response
    }
    .instrument(span)
    .await
}

/// 차단된 IP의 요청을 403으로 거부
///
/// 차단 목록 조회에 실패하면 요청을 통과시킵니다.
pub async fn ip_block_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let client_ip = client_ip_of(&request);

    match BlockedIpService::is_blocked(&state.db, &client_ip).await {
        Ok(true) => {
            warn!(%client_ip, path = %request.uri().path(), "Blocked IP rejected");
            return AppError::IpBlocked("접근이 차단된 IP입니다.".to_string()).into_response();
        }
        Ok(false) => {}
        Err(e) => warn!(%client_ip, error = %e, "Blocked IP lookup failed"),
    }

    next.run(request).await
}

/// 모든 요청을 access_log 테이블에 기록
///
/// 저장 실패는 로그만 남기고 응답에는 영향을 주지 않습니다.
pub async fn access_log_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let url = request.uri().path().to_string();
    let request_params = request.uri().query().map(String::from);
    let client_ip = client_ip_of(&request);
    let username = extract_token(request.headers())
        .ok()
        .flatten()
        .and_then(|token| decode_access_token(&token, &state.config.jwt_secret).ok())
        .map(|claims| claims.username);

    let response = next.run(request).await;

    let entry = NewAccessLog {
        method,
        url,
        status: response.status().as_u16(),
        client_ip,
        username,
        request_params,
    };
    if let Err(e) = AccessLogService::record(&state.db, entry).await {
        warn!(error = %e, "Failed to record access log");
    }

    response
}
