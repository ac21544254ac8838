use std::net::SocketAddr;

use axum::{extract::ConnectInfo, http::HeaderMap};

/// 프록시가 원래 클라이언트 IP를 전달하는 헤더 (우선순위 순)
const FORWARDED_HEADERS: [&str; 5] = [
    "x-forwarded-for",
    "proxy-client-ip",
    "wl-proxy-client-ip",
    "http_client_ip",
    "http_x_forwarded_for",
];

const UNKNOWN: &str = "unknown";

/// 요청의 클라이언트 IP
///
/// 헤더 값이 여러 개(`a, b, c`)면 첫 번째 값을 사용하고,
/// 헤더가 없으면 소켓 주소, 그것도 없으면 `unknown`을 반환합니다.
pub fn resolve_client_ip(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> String {
    FORWARDED_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|ip| !ip.is_empty() && !ip.eq_ignore_ascii_case(UNKNOWN))
        .map(String::from)
        .or_else(|| connect_info.map(|ConnectInfo(addr)| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN.to_string())
}
