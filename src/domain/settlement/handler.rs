use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;

use super::dto::{SettlementQuery, SettlementResponse};
use super::service::SettlementService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 호텔 정산 조회 API
///
/// 기간 내 체크아웃 완료된 예약 목록과 통화별 합계를 반환합니다.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{hotel_id}/settlement",
    params(
        ("hotel_id" = i64, Path, description = "호텔 ID"),
        SettlementQuery
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "정산 조회 성공", body = SettlementResponse),
        (status = 400, description = "잘못된 기간", body = ErrorResponse),
        (status = 403, description = "호텔 소유자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 호텔", body = ErrorResponse)
    ),
    tag = "Settlement"
)]
pub async fn get_settlement(
    State(state): State<AppState>,
    user: AuthUser,
    Path(hotel_id): Path<i64>,
    WithRejection(Query(query), _): WithRejection<Query<SettlementQuery>, AppError>,
) -> Result<Json<BaseResponse<SettlementResponse>>, AppError> {
    let result = SettlementService::settlement(&state, &user, hotel_id, query).await?;

    Ok(Json(BaseResponse::success(result)))
}
