use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::dto::{
    AvailableRoomResponse, CreateReservationRequest, ManagerReservationQuery, ReservationResponse,
    SearchAvailableQuery,
};
use super::service::{ReservationAction, ReservationService};
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 예약 가능 객실 검색 API
///
/// 로그인 없이 사용할 수 있습니다. 수용 인원이 투숙 인원 이상이고
/// 해당 기간에 예약이 없는 객실을 반환합니다.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/search",
    params(SearchAvailableQuery),
    responses(
        (status = 200, description = "검색 성공", body = [AvailableRoomResponse]),
        (status = 400, description = "잘못된 기간", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn search_available(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SearchAvailableQuery>, AppError>,
) -> Result<Json<BaseResponse<Vec<AvailableRoomResponse>>>, AppError> {
    let result = ReservationService::search_available(&state, query).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 객실 예약 API
///
/// 여러 호텔의 객실을 요청하면 호텔마다 예약이 생성되어 목록으로 반환됩니다.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    request_body = CreateReservationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "예약 성공", body = [ReservationResponse]),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 객실", body = ErrorResponse),
        (status = 409, description = "이미 예약된 객실", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<CreateReservationRequest>, AppError>,
) -> Result<Json<BaseResponse<Vec<ReservationResponse>>>, AppError> {
    req.validate()?;

    let result = ReservationService::create_reservation(&state, &user, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "예약이 완료되었습니다.",
    )))
}

/// 내 예약 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/reservations/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = [ReservationResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn my_reservations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Vec<ReservationResponse>>>, AppError> {
    let result = ReservationService::my_reservations(&state, &user).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 예약 취소 API
///
/// 예약자 본인, 호텔 소유자, 관리자가 PENDING/CONFIRMED 예약을 취소할 수 있습니다.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/cancel",
    params(
        ("reservation_id" = i64, Path, description = "예약 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "취소 성공", body = ReservationResponse),
        (status = 400, description = "취소할 수 없는 상태", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 예약", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<BaseResponse<ReservationResponse>>, AppError> {
    let result =
        ReservationService::change_status(&state, &user, reservation_id, ReservationAction::Cancel)
            .await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 예약 확정 API (호텔 관리자)
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/confirm",
    params(
        ("reservation_id" = i64, Path, description = "예약 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "확정 성공", body = ReservationResponse),
        (status = 400, description = "확정할 수 없는 상태", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn confirm_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<BaseResponse<ReservationResponse>>, AppError> {
    let result =
        ReservationService::change_status(&state, &user, reservation_id, ReservationAction::Confirm)
            .await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 체크인 처리 API (호텔 관리자)
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/check-in",
    params(
        ("reservation_id" = i64, Path, description = "예약 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "체크인 성공", body = ReservationResponse),
        (status = 400, description = "체크인할 수 없는 상태", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn check_in(
    State(state): State<AppState>,
    user: AuthUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<BaseResponse<ReservationResponse>>, AppError> {
    let result =
        ReservationService::change_status(&state, &user, reservation_id, ReservationAction::CheckIn)
            .await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 체크아웃 처리 API (호텔 관리자)
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/check-out",
    params(
        ("reservation_id" = i64, Path, description = "예약 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "체크아웃 성공", body = ReservationResponse),
        (status = 400, description = "체크아웃할 수 없는 상태", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn check_out(
    State(state): State<AppState>,
    user: AuthUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<BaseResponse<ReservationResponse>>, AppError> {
    let result = ReservationService::change_status(
        &state,
        &user,
        reservation_id,
        ReservationAction::CheckOut,
    )
    .await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 호텔별 날짜 예약 현황 API (호텔 관리자)
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{hotel_id}/reservations",
    params(
        ("hotel_id" = i64, Path, description = "호텔 ID"),
        ManagerReservationQuery
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = [ReservationResponse]),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 호텔", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn manager_reservations(
    State(state): State<AppState>,
    user: AuthUser,
    Path(hotel_id): Path<i64>,
    WithRejection(Query(query), _): WithRejection<Query<ManagerReservationQuery>, AppError>,
) -> Result<Json<BaseResponse<Vec<ReservationResponse>>>, AppError> {
    let result =
        ReservationService::manager_reservations(&state, &user, hotel_id, query.date).await?;

    Ok(Json(BaseResponse::success(result)))
}
