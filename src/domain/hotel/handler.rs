use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::dto::{
    HotelRequest, HotelResponse, RoomRequest, RoomResponse, RoomTypeRequest, RoomTypeResponse,
};
use super::service::HotelService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 호텔 등록 API
///
/// 호텔 운영자(OWNER) 또는 관리자만 등록할 수 있으며, 요청자가 소유자가 됩니다.
#[utoipa::path(
    post,
    path = "/api/v1/hotels",
    request_body = HotelRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "호텔 등록 성공", body = HotelResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Hotel"
)]
pub async fn create_hotel(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<HotelRequest>, AppError>,
) -> Result<Json<BaseResponse<HotelResponse>>, AppError> {
    user.require_owner_or_admin()?;
    req.validate()?;

    let result = HotelService::create_hotel(&state, &user, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 내 호텔 목록 조회 API
///
/// 관리자는 전체 호텔을, 그 외 사용자는 소유한 호텔만 조회합니다.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/mine",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "호텔 목록 조회 성공", body = [HotelResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Hotel"
)]
pub async fn my_hotels(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Vec<HotelResponse>>>, AppError> {
    let result = HotelService::my_hotels(&state, &user).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 호텔 정보 수정 API
#[utoipa::path(
    put,
    path = "/api/v1/hotels/{hotel_id}",
    params(
        ("hotel_id" = i64, Path, description = "호텔 ID")
    ),
    request_body = HotelRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "호텔 수정 성공", body = HotelResponse),
        (status = 403, description = "호텔 소유자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 호텔", body = ErrorResponse)
    ),
    tag = "Hotel"
)]
pub async fn update_hotel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(hotel_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<HotelRequest>, AppError>,
) -> Result<Json<BaseResponse<HotelResponse>>, AppError> {
    req.validate()?;

    let result = HotelService::update_hotel(&state, &user, hotel_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 객실 타입 등록 API
#[utoipa::path(
    post,
    path = "/api/v1/hotels/{hotel_id}/room-types",
    params(
        ("hotel_id" = i64, Path, description = "호텔 ID")
    ),
    request_body = RoomTypeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "객실 타입 등록 성공", body = RoomTypeResponse),
        (status = 400, description = "가격 누락 등 잘못된 요청", body = ErrorResponse),
        (status = 403, description = "호텔 소유자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 호텔", body = ErrorResponse)
    ),
    tag = "Hotel"
)]
pub async fn add_room_type(
    State(state): State<AppState>,
    user: AuthUser,
    Path(hotel_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<RoomTypeRequest>, AppError>,
) -> Result<Json<BaseResponse<RoomTypeResponse>>, AppError> {
    req.validate()?;

    let result = HotelService::add_room_type(&state, &user, hotel_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 객실 타입 수정 API
#[utoipa::path(
    put,
    path = "/api/v1/room-types/{room_type_id}",
    params(
        ("room_type_id" = i64, Path, description = "객실 타입 ID")
    ),
    request_body = RoomTypeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "객실 타입 수정 성공", body = RoomTypeResponse),
        (status = 403, description = "호텔 소유자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 객실 타입", body = ErrorResponse)
    ),
    tag = "Hotel"
)]
pub async fn update_room_type(
    State(state): State<AppState>,
    user: AuthUser,
    Path(room_type_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<RoomTypeRequest>, AppError>,
) -> Result<Json<BaseResponse<RoomTypeResponse>>, AppError> {
    req.validate()?;

    let result = HotelService::update_room_type(&state, &user, room_type_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 객실 등록 API
#[utoipa::path(
    post,
    path = "/api/v1/room-types/{room_type_id}/rooms",
    params(
        ("room_type_id" = i64, Path, description = "객실 타입 ID")
    ),
    request_body = RoomRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "객실 등록 성공", body = RoomResponse),
        (status = 403, description = "호텔 소유자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 객실 타입", body = ErrorResponse),
        (status = 409, description = "중복된 객실 번호", body = ErrorResponse)
    ),
    tag = "Hotel"
)]
pub async fn add_room(
    State(state): State<AppState>,
    user: AuthUser,
    Path(room_type_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<RoomRequest>, AppError>,
) -> Result<Json<BaseResponse<RoomResponse>>, AppError> {
    req.validate()?;

    let result = HotelService::add_room(&state, &user, room_type_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 객실 번호 수정 API
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{room_id}",
    params(
        ("room_id" = i64, Path, description = "객실 ID")
    ),
    request_body = RoomRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "객실 수정 성공", body = RoomResponse),
        (status = 404, description = "존재하지 않는 객실", body = ErrorResponse),
        (status = 409, description = "중복된 객실 번호", body = ErrorResponse)
    ),
    tag = "Hotel"
)]
pub async fn update_room(
    State(state): State<AppState>,
    user: AuthUser,
    Path(room_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<RoomRequest>, AppError>,
) -> Result<Json<BaseResponse<RoomResponse>>, AppError> {
    req.validate()?;

    let result = HotelService::update_room(&state, &user, room_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}
