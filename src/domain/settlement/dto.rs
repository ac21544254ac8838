use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::reservation::dto::ReservationResponse;
use crate::domain::reservation::entity::reservation::Currency;

/// 정산 조회 기간
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SettlementQuery {
    /// 시작일 (해당일 00:00:00부터)
    #[param(value_type = String, example = "2026-03-01")]
    pub start_date: NaiveDate,
    /// 종료일 (해당일 23:59:59까지)
    #[param(value_type = String, example = "2026-03-31")]
    pub end_date: NaiveDate,
}

/// 통화별 정산 합계
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotal {
    pub currency: Currency,
    pub count: u64,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    #[schema(value_type = String)]
    pub discount_total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResponse {
    pub hotel_id: i64,
    pub hotel_name: String,
    #[schema(value_type = String)]
    pub start_date: NaiveDate,
    #[schema(value_type = String)]
    pub end_date: NaiveDate,
    pub totals: Vec<CurrencyTotal>,
    pub reservations: Vec<ReservationResponse>,
}
