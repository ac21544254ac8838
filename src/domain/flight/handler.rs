use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::dto::{AirlineRequest, AirlineResponse, FlightTicketRequest, FlightTicketResponse};
use super::service::FlightService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 항공사 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/airlines",
    responses(
        (status = 200, description = "항공사 목록 조회 성공", body = [AirlineResponse])
    ),
    tag = "Flight"
)]
pub async fn list_airlines(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<AirlineResponse>>>, AppError> {
    let result = FlightService::list_airlines(&state).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 항공사 등록 API (관리자)
#[utoipa::path(
    post,
    path = "/api/v1/airlines",
    request_body = AirlineRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "항공사 등록 성공", body = AirlineResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "관리자 권한 필요", body = ErrorResponse)
    ),
    tag = "Flight"
)]
pub async fn create_airline(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<AirlineRequest>, AppError>,
) -> Result<Json<BaseResponse<AirlineResponse>>, AppError> {
    user.require_admin()?;
    req.validate()?;

    let result = FlightService::create_airline(&state, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 항공사 수정 API (관리자)
#[utoipa::path(
    put,
    path = "/api/v1/airlines/{airline_id}",
    params(
        ("airline_id" = i64, Path, description = "항공사 ID")
    ),
    request_body = AirlineRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "항공사 수정 성공", body = AirlineResponse),
        (status = 403, description = "관리자 권한 필요", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 항공사", body = ErrorResponse)
    ),
    tag = "Flight"
)]
pub async fn update_airline(
    State(state): State<AppState>,
    user: AuthUser,
    Path(airline_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<AirlineRequest>, AppError>,
) -> Result<Json<BaseResponse<AirlineResponse>>, AppError> {
    user.require_admin()?;
    req.validate()?;

    let result = FlightService::update_airline(&state, airline_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 항공사 삭제 API (관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/airlines/{airline_id}",
    params(
        ("airline_id" = i64, Path, description = "항공사 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "항공사 삭제 성공"),
        (status = 404, description = "존재하지 않는 항공사", body = ErrorResponse),
        (status = 409, description = "항공권이 등록된 항공사", body = ErrorResponse)
    ),
    tag = "Flight"
)]
pub async fn delete_airline(
    State(state): State<AppState>,
    user: AuthUser,
    Path(airline_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    user.require_admin()?;

    FlightService::delete_airline(&state, airline_id).await?;

    Ok(Json(BaseResponse::ok("항공사가 삭제되었습니다.")))
}

/// 항공사별 항공권 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/airlines/{airline_id}/tickets",
    params(
        ("airline_id" = i64, Path, description = "항공사 ID")
    ),
    responses(
        (status = 200, description = "항공권 목록 조회 성공", body = [FlightTicketResponse]),
        (status = 404, description = "존재하지 않는 항공사", body = ErrorResponse)
    ),
    tag = "Flight"
)]
pub async fn list_tickets_by_airline(
    State(state): State<AppState>,
    Path(airline_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<FlightTicketResponse>>>, AppError> {
    let result = FlightService::list_tickets_by_airline(&state, airline_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 항공권 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/flight-tickets",
    responses(
        (status = 200, description = "항공권 목록 조회 성공", body = [FlightTicketResponse])
    ),
    tag = "Flight"
)]
pub async fn list_tickets(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<FlightTicketResponse>>>, AppError> {
    let result = FlightService::list_tickets(&state).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 항공권 등록 API (관리자)
#[utoipa::path(
    post,
    path = "/api/v1/flight-tickets",
    request_body = FlightTicketRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "항공권 등록 성공", body = FlightTicketResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 항공사", body = ErrorResponse)
    ),
    tag = "Flight"
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<FlightTicketRequest>, AppError>,
) -> Result<Json<BaseResponse<FlightTicketResponse>>, AppError> {
    user.require_admin()?;
    req.validate()?;

    let result = FlightService::create_ticket(&state, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 항공권 수정 API (관리자)
#[utoipa::path(
    put,
    path = "/api/v1/flight-tickets/{ticket_id}",
    params(
        ("ticket_id" = i64, Path, description = "항공권 ID")
    ),
    request_body = FlightTicketRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "항공권 수정 성공", body = FlightTicketResponse),
        (status = 404, description = "존재하지 않는 항공권 또는 항공사", body = ErrorResponse)
    ),
    tag = "Flight"
)]
pub async fn update_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    Path(ticket_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<FlightTicketRequest>, AppError>,
) -> Result<Json<BaseResponse<FlightTicketResponse>>, AppError> {
    user.require_admin()?;
    req.validate()?;

    let result = FlightService::update_ticket(&state, ticket_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 항공권 삭제 API (관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/flight-tickets/{ticket_id}",
    params(
        ("ticket_id" = i64, Path, description = "항공권 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "항공권 삭제 성공"),
        (status = 404, description = "존재하지 않는 항공권", body = ErrorResponse)
    ),
    tag = "Flight"
)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    Path(ticket_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    user.require_admin()?;

    FlightService::delete_ticket(&state, ticket_id).await?;

    Ok(Json(BaseResponse::ok("항공권이 삭제되었습니다.")))
}
