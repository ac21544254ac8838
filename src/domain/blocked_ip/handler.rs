use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::dto::{BlockedIpPage, BlockedIpRequest, BlockedIpResponse};
use super::service::BlockedIpService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageParams, PageResponse};
use crate::utils::BaseResponse;

/// 차단 IP 목록 조회 API (관리자)
#[utoipa::path(
    get,
    path = "/api/v1/admin/blocked-ips",
    params(PageParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "차단 IP 목록 조회 성공", body = BlockedIpPage),
        (status = 403, description = "관리자 권한 필요", body = ErrorResponse)
    ),
    tag = "Security"
)]
pub async fn list_blocked_ips(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Query(params), _): WithRejection<Query<PageParams>, AppError>,
) -> Result<Json<BaseResponse<PageResponse<BlockedIpResponse>>>, AppError> {
    user.require_admin()?;

    let result = BlockedIpService::list(&state, params).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// IP 차단 등록 API (관리자)
#[utoipa::path(
    post,
    path = "/api/v1/admin/blocked-ips",
    request_body = BlockedIpRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "IP 차단 성공", body = BlockedIpResponse),
        (status = 400, description = "잘못된 IP 형식", body = ErrorResponse),
        (status = 409, description = "이미 차단된 IP", body = ErrorResponse)
    ),
    tag = "Security"
)]
pub async fn add_blocked_ip(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<BlockedIpRequest>, AppError>,
) -> Result<Json<BaseResponse<BlockedIpResponse>>, AppError> {
    user.require_admin()?;
    req.validate()?;

    let result = BlockedIpService::add(&state, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "IP가 차단되었습니다.",
    )))
}

/// 차단 IP 수정 API (관리자)
#[utoipa::path(
    put,
    path = "/api/v1/admin/blocked-ips/{id}",
    params(
        ("id" = i64, Path, description = "차단 IP ID")
    ),
    request_body = BlockedIpRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "차단 IP 수정 성공", body = BlockedIpResponse),
        (status = 404, description = "존재하지 않는 차단 IP", body = ErrorResponse),
        (status = 409, description = "다른 항목에 등록된 IP", body = ErrorResponse)
    ),
    tag = "Security"
)]
pub async fn update_blocked_ip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<BlockedIpRequest>, AppError>,
) -> Result<Json<BaseResponse<BlockedIpResponse>>, AppError> {
    user.require_admin()?;
    req.validate()?;

    let result = BlockedIpService::update(&state, id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// IP 차단 해제 API (관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/blocked-ips/{id}",
    params(
        ("id" = i64, Path, description = "차단 IP ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "차단 해제 성공"),
        (status = 404, description = "존재하지 않는 차단 IP", body = ErrorResponse)
    ),
    tag = "Security"
)]
pub async fn delete_blocked_ip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    user.require_admin()?;

    BlockedIpService::delete(&state, id).await?;

    Ok(Json(BaseResponse::ok("IP 차단이 해제되었습니다.")))
}
