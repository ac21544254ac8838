use std::net::IpAddr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::entity::blocked_ip;

/// IPv4 또는 IPv6 형식인지 검증
pub fn validate_ip(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("ip_invalid"))
}

/// 저장/비교에 쓰는 IP 표기 (예: `2001:DB8:0::1` → `2001:db8::1`)
///
/// IP로 파싱되지 않는 값은 앞뒤 공백만 제거합니다.
pub fn normalize_ip(value: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .parse::<IpAddr>()
        .map(|ip| ip.to_string())
        .unwrap_or_else(|_| trimmed.to_string())
}

/// IP 차단 등록/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockedIpRequest {
    #[validate(custom(function = "validate_ip", message = "올바른 IP 주소 형식이 아닙니다"))]
    pub ip_address: String,

    #[validate(length(max = 255, message = "차단 사유는 255자 이내여야 합니다"))]
    pub reason: Option<String>,
}

impl BlockedIpRequest {
    pub fn normalized_ip(&self) -> String {
        normalize_ip(&self.ip_address)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockedIpResponse {
    pub id: i64,
    pub ip_address: String,
    pub reason: Option<String>,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
    #[schema(value_type = String)]
    pub updated_at: NaiveDateTime,
}

impl From<blocked_ip::Model> for BlockedIpResponse {
    fn from(model: blocked_ip::Model) -> Self {
        Self {
            id: model.id,
            ip_address: model.ip_address,
            reason: model.reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 차단 IP 페이지 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockedIpPage {
    pub content: Vec<BlockedIpResponse>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_and_ipv6_should_be_accepted() {
        assert!(validate_ip("203.0.113.7").is_ok());
        assert!(validate_ip("2001:db8::1").is_ok());
    }

    #[test]
    fn malformed_ip_should_be_rejected() {
        assert!(validate_ip("300.1.1.1").is_err());
        assert!(validate_ip("localhost").is_err());
        assert!(validate_ip("").is_err());
    }

    #[test]
    fn ipv6_should_be_normalized() {
        let req = BlockedIpRequest {
            ip_address: "2001:0db8:0000::0001".to_string(),
            reason: None,
        };

        assert_eq!(req.normalized_ip(), "2001:db8::1");
    }

    #[test]
    fn uppercase_ipv6_should_match_stored_form() {
        assert_eq!(normalize_ip(" 2001:DB8:0:0:0:0:0:1 "), "2001:db8::1");
        assert_eq!(normalize_ip("unknown"), "unknown");
    }
}
