use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::reservation::{Currency, ReservationStatus};

/// 예약 가능 객실 검색 조건
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchAvailableQuery {
    /// 체크인 일시 (예: 2026-03-01T15:00:00)
    #[param(value_type = String, example = "2026-03-01T15:00:00")]
    pub check_in: NaiveDateTime,
    /// 체크아웃 일시
    #[param(value_type = String, example = "2026-03-03T11:00:00")]
    pub check_out: NaiveDateTime,
    /// 투숙 인원 (기본값 1)
    pub guest_count: Option<i32>,
}

/// 예약 가능 객실
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableRoomResponse {
    pub room_id: i64,
    pub room_number: String,
    pub room_type_id: i64,
    pub room_type_name: String,
    pub capacity: i32,
    pub hotel_id: i64,
    pub hotel_name: String,
    pub hotel_address: String,
    #[schema(value_type = Option<String>)]
    pub price_krw: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub price_usd: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub price_php: Option<Decimal>,
    #[schema(value_type = String)]
    pub base_price: Decimal,
}

/// 예약 생성 요청
///
/// 여러 호텔의 객실을 함께 요청하면 호텔별로 예약이 나뉘어 생성됩니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[validate(length(min = 1, max = 50, message = "예약할 객실을 1개 이상 선택해야 합니다"))]
    pub room_ids: Vec<i64>,

    #[schema(value_type = String, example = "2026-03-01T15:00:00")]
    pub check_in: NaiveDateTime,

    #[schema(value_type = String, example = "2026-03-03T11:00:00")]
    pub check_out: NaiveDateTime,

    /// 레이트 체크아웃 여부
    #[serde(default)]
    pub is_late_checkout: bool,

    /// 결제 통화 (기본값 USD)
    pub currency: Option<Currency>,
}

/// 호텔별 예약 조회 조건
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ManagerReservationQuery {
    /// 조회 기준일 (기본값 오늘)
    #[param(value_type = Option<String>, example = "2026-03-01")]
    pub date: Option<NaiveDate>,
}

/// 예약에 포함된 객실
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservedRoomItem {
    pub room_id: i64,
    pub room_number: String,
}

/// 예약 정보 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: i64,
    pub user_id: i64,
    /// 예약자 이름
    pub guest_name: Option<String>,
    pub hotel_id: i64,
    pub hotel_name: Option<String>,
    pub rooms: Vec<ReservedRoomItem>,
    #[schema(value_type = String)]
    pub check_in: NaiveDateTime,
    #[schema(value_type = String)]
    pub check_out: NaiveDateTime,
    #[schema(value_type = Option<String>)]
    pub actual_check_in_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>)]
    pub actual_check_out_time: Option<NaiveDateTime>,
    pub is_late_checkout: bool,
    pub status: ReservationStatus,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub currency: Currency,
    /// 적용된 할인 금액
    #[schema(value_type = Option<String>)]
    pub discount_price: Option<Decimal>,
    pub discount_policy_name: Option<String>,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
}
