use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::dto::{
    BoardDetailResponse, BoardListQuery, BoardListResponse, BoardRequest, BoardSummary,
    CommentRequest, CommentResponse, CommentUpdateRequest, LikeResponse,
};
use super::service::BoardService;
use crate::state::AppState;
use crate::utils::auth::{AuthUser, OptionalAuthUser};
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 게시글 목록 조회 API
///
/// 공지글은 `notices`에 모두 포함되고, 일반글은 `boards`에 페이지 단위로 반환됩니다.
#[utoipa::path(
    get,
    path = "/api/v1/boards",
    params(BoardListQuery),
    responses(
        (status = 200, description = "게시글 목록 조회 성공", body = BoardListResponse),
        (status = 400, description = "잘못된 조회 조건", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn list_boards(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<BoardListQuery>, AppError>,
) -> Result<Json<BaseResponse<BoardListResponse>>, AppError> {
    let result = BoardService::list(&state, query).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 게시글 상세 조회 API
///
/// 조회할 때마다 조회수가 1 증가합니다.
#[utoipa::path(
    get,
    path = "/api/v1/boards/{board_id}",
    params(
        ("board_id" = i64, Path, description = "게시글 ID")
    ),
    responses(
        (status = 200, description = "게시글 조회 성공", body = BoardDetailResponse),
        (status = 404, description = "존재하지 않는 게시글", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn get_board(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(board_id): Path<i64>,
) -> Result<Json<BaseResponse<BoardDetailResponse>>, AppError> {
    let result = BoardService::detail(&state, viewer.as_ref(), board_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 게시글 작성 API
#[utoipa::path(
    post,
    path = "/api/v1/boards",
    request_body = BoardRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "게시글 작성 성공", body = BoardSummary),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 403, description = "공지 작성 권한 없음", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn create_board(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<BoardRequest>, AppError>,
) -> Result<Json<BaseResponse<BoardSummary>>, AppError> {
    req.validate()?;

    let result = BoardService::create(&state, &user, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "게시글이 등록되었습니다.",
    )))
}

/// 게시글 수정 API
#[utoipa::path(
    put,
    path = "/api/v1/boards/{board_id}",
    params(
        ("board_id" = i64, Path, description = "게시글 ID")
    ),
    request_body = BoardRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "게시글 수정 성공", body = BoardSummary),
        (status = 403, description = "작성자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 게시글", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn update_board(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<BoardRequest>, AppError>,
) -> Result<Json<BaseResponse<BoardSummary>>, AppError> {
    req.validate()?;

    let result = BoardService::update(&state, &user, board_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 게시글 삭제 API
#[utoipa::path(
    delete,
    path = "/api/v1/boards/{board_id}",
    params(
        ("board_id" = i64, Path, description = "게시글 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "게시글 삭제 성공"),
        (status = 403, description = "작성자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 게시글", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn delete_board(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    BoardService::delete(&state, &user, board_id).await?;

    Ok(Json(BaseResponse::ok("게시글이 삭제되었습니다.")))
}

/// 게시글 좋아요 토글 API
#[utoipa::path(
    post,
    path = "/api/v1/boards/{board_id}/like",
    params(
        ("board_id" = i64, Path, description = "게시글 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "좋아요 처리 성공", body = LikeResponse),
        (status = 404, description = "존재하지 않는 게시글", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<i64>,
) -> Result<Json<BaseResponse<LikeResponse>>, AppError> {
    let result = BoardService::toggle_like(&state, &user, board_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 댓글 작성 API
///
/// `parentId`를 지정하면 대댓글로 등록됩니다. 대댓글에는 답글을 달 수 없습니다.
#[utoipa::path(
    post,
    path = "/api/v1/boards/{board_id}/comments",
    params(
        ("board_id" = i64, Path, description = "게시글 ID")
    ),
    request_body = CommentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "댓글 작성 성공", body = CommentResponse),
        (status = 400, description = "잘못된 상위 댓글", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 게시글 또는 댓글", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<CommentRequest>, AppError>,
) -> Result<Json<BaseResponse<CommentResponse>>, AppError> {
    req.validate()?;

    let result = BoardService::create_comment(&state, &user, board_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 댓글 수정 API
#[utoipa::path(
    put,
    path = "/api/v1/comments/{comment_id}",
    params(
        ("comment_id" = i64, Path, description = "댓글 ID")
    ),
    request_body = CommentUpdateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "댓글 수정 성공", body = CommentResponse),
        (status = 403, description = "작성자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 댓글", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn update_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(comment_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<CommentUpdateRequest>, AppError>,
) -> Result<Json<BaseResponse<CommentResponse>>, AppError> {
    req.validate()?;

    let result = BoardService::update_comment(&state, &user, comment_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 댓글 삭제 API
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{comment_id}",
    params(
        ("comment_id" = i64, Path, description = "댓글 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "댓글 삭제 성공"),
        (status = 403, description = "작성자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 댓글", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(comment_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    BoardService::delete_comment(&state, &user, comment_id).await?;

    Ok(Json(BaseResponse::ok("댓글이 삭제되었습니다.")))
}
