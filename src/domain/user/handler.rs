use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::dto::{UpdateUserRequest, UserResponse};
use super::service::UserService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 사용자 목록 조회 API (관리자)
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "사용자 목록 조회 성공", body = [UserResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 403, description = "관리자 권한 없음", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Vec<UserResponse>>>, AppError> {
    user.require_admin()?;

    let users = UserService::list_users(&state).await?;

    Ok(Json(BaseResponse::success(users)))
}

/// 사용자 상세 조회 API (관리자)
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{user_id}",
    params(
        ("user_id" = i64, Path, description = "사용자 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "사용자 조회 성공", body = UserResponse),
        (status = 403, description = "관리자 권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    user.require_admin()?;

    let result = UserService::get_user(&state, user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 사용자 정보 수정 API (관리자)
///
/// 권한 변경이나 계정 비활성화(useYn = N)에 사용합니다.
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{user_id}",
    params(
        ("user_id" = i64, Path, description = "사용자 ID")
    ),
    request_body = UpdateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "사용자 수정 성공", body = UserResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "관리자 권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateUserRequest>, AppError>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    user.require_admin()?;
    req.validate()?;

    let result = UserService::update_user(&state, user_id, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "사용자 정보가 수정되었습니다.",
    )))
}
