use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::entity::access_log;
use crate::utils::pagination::PageParams;

/// 접속 로그 조회 조건
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AccessLogQuery {
    /// IP 부분 검색
    pub search_ip: Option<String>,
    /// 페이지 번호 (0부터 시작)
    pub page: Option<u64>,
    /// 페이지 크기 (기본 20)
    pub size: Option<u64>,
}

impl AccessLogQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            size: self.size,
        }
    }

    pub fn search_ip(&self) -> Option<&str> {
        self.search_ip
            .as_deref()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    }
}

/// 기록할 요청 정보
#[derive(Debug, Clone)]
pub struct NewAccessLog {
    pub method: String,
    pub url: String,
    pub status: u16,
    pub client_ip: String,
    pub username: Option<String>,
    pub request_params: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogResponse {
    pub id: i64,
    pub method: String,
    pub url: String,
    pub status: i32,
    pub client_ip: String,
    pub username: Option<String>,
    pub request_params: Option<String>,
    #[schema(value_type = String)]
    pub timestamp: NaiveDateTime,
}

impl From<access_log::Model> for AccessLogResponse {
    fn from(model: access_log::Model) -> Self {
        Self {
            id: model.id,
            method: model.method,
            url: model.url,
            status: model.status,
            client_ip: model.client_ip,
            username: model.username,
            request_params: model.request_params,
            timestamp: model.timestamp,
        }
    }
}

/// 접속 로그 페이지 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogPage {
    pub content: Vec<AccessLogResponse>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}
