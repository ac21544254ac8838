use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::dto::{AccessLogQuery, AccessLogResponse, NewAccessLog};
use super::entity::access_log;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::PageResponse;

const DEFAULT_PAGE_SIZE: u64 = 20;

pub struct AccessLogService;

impl AccessLogService {
    pub async fn record<C: ConnectionTrait>(conn: &C, entry: NewAccessLog) -> Result<(), AppError> {
        access_log::ActiveModel {
            method: Set(entry.method),
            url: Set(entry.url),
            status: Set(i32::from(entry.status)),
            client_ip: Set(entry.client_ip),
            username: Set(entry.username),
            request_params: Set(entry.request_params),
            timestamp: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(())
    }

    /// 접속 로그 조회 (최신순)
    ///
    /// `ACCESS_LOG_EXCLUDED_IP`로 지정된 IP의 로그는 제외됩니다.
    pub async fn list(
        state: &AppState,
        query: AccessLogQuery,
    ) -> Result<PageResponse<AccessLogResponse>, AppError> {
        let params = query.page_params();
        let (page, size) = (params.page(), params.size_or(DEFAULT_PAGE_SIZE));

        let mut select = access_log::Entity::find();
        if let Some(excluded) = state.config.access_log_excluded_ip.as_deref() {
            select = select.filter(access_log::Column::ClientIp.ne(excluded));
        }
        if let Some(search_ip) = query.search_ip() {
            select = select.filter(access_log::Column::ClientIp.contains(search_ip));
        }

        let paginator = select
            .order_by_desc(access_log::Column::Timestamp)
            .order_by_desc(access_log::Column::Id)
            .paginate(&state.db, size);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page).await?;

        Ok(PageResponse::new(
            rows.into_iter().map(AccessLogResponse::from).collect(),
            page,
            size,
            total,
        ))
    }
}
