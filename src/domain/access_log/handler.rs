use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;

use super::dto::{AccessLogPage, AccessLogQuery, AccessLogResponse};
use super::service::AccessLogService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::pagination::PageResponse;
use crate::utils::BaseResponse;

/// 접속 로그 조회 API (관리자)
#[utoipa::path(
    get,
    path = "/api/v1/admin/access-logs",
    params(AccessLogQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "접속 로그 조회 성공", body = AccessLogPage),
        (status = 403, description = "관리자 권한 필요", body = ErrorResponse)
    ),
    tag = "Security"
)]
pub async fn list_access_logs(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<AccessLogQuery>, AppError>,
) -> Result<Json<BaseResponse<PageResponse<AccessLogResponse>>>, AppError> {
    user.require_admin()?;

    let result = AccessLogService::list(&state, query).await?;

    Ok(Json(BaseResponse::success(result)))
}
