use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::dto::{CreateDiscountRequest, DiscountPolicyResponse};
use super::service::DiscountService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 호텔 할인 정책 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{hotel_id}/discounts",
    params(
        ("hotel_id" = i64, Path, description = "호텔 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "할인 정책 목록 조회 성공", body = [DiscountPolicyResponse]),
        (status = 403, description = "호텔 소유자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 호텔", body = ErrorResponse)
    ),
    tag = "Discount"
)]
pub async fn list_discounts(
    State(state): State<AppState>,
    user: AuthUser,
    Path(hotel_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<DiscountPolicyResponse>>>, AppError> {
    let result = DiscountService::list(&state, &user, hotel_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 할인 정책 등록 API
///
/// PERCENTAGE는 할인율(0 초과 100 이하), FIXED_AMOUNT는 1박당 할인 금액이 필요합니다.
#[utoipa::path(
    post,
    path = "/api/v1/hotels/{hotel_id}/discounts",
    params(
        ("hotel_id" = i64, Path, description = "호텔 ID")
    ),
    request_body = CreateDiscountRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "할인 정책 등록 성공", body = DiscountPolicyResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "호텔 소유자가 아님", body = ErrorResponse)
    ),
    tag = "Discount"
)]
pub async fn create_discount(
    State(state): State<AppState>,
    user: AuthUser,
    Path(hotel_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<CreateDiscountRequest>, AppError>,
) -> Result<Json<BaseResponse<DiscountPolicyResponse>>, AppError> {
    req.validate()?;

    let result = DiscountService::create(&state, &user, hotel_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 할인 정책 삭제 API
#[utoipa::path(
    delete,
    path = "/api/v1/discounts/{policy_id}",
    params(
        ("policy_id" = i64, Path, description = "할인 정책 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "할인 정책 삭제 성공"),
        (status = 403, description = "호텔 소유자가 아님", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 할인 정책", body = ErrorResponse)
    ),
    tag = "Discount"
)]
pub async fn delete_discount(
    State(state): State<AppState>,
    user: AuthUser,
    Path(policy_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    DiscountService::delete(&state, &user, policy_id).await?;

    Ok(Json(BaseResponse::ok("할인 정책이 삭제되었습니다.")))
}
