use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::{airline, flight_ticket};
use crate::domain::user::dto::validate_use_yn;

/// 항공사 등록/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AirlineRequest {
    #[validate(length(min = 1, max = 100, message = "항공사명은 1~100자 이내로 입력해야 합니다"))]
    pub name: String,

    /// IATA 코드 (예: KE, PR)
    #[validate(length(min = 2, max = 3, message = "항공사 코드는 2~3자여야 합니다"))]
    pub code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AirlineResponse {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
}

impl From<airline::Model> for AirlineResponse {
    fn from(model: airline::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
            created_at: model.created_at,
        }
    }
}

/// 항공권 등록/수정 요청
///
/// 출발/도착 시각은 `HH:MM` 또는 `HH:MM:SS` 형식입니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightTicketRequest {
    pub airline_id: i64,

    #[validate(length(min = 1, max = 100, message = "출발 공항은 1~100자 이내로 입력해야 합니다"))]
    pub departure_airport: String,

    #[validate(length(min = 1, max = 100, message = "도착 공항은 1~100자 이내로 입력해야 합니다"))]
    pub arrival_airport: String,

    #[schema(value_type = String, example = "09:30")]
    #[serde(deserialize_with = "deserialize_time")]
    pub departure_time: NaiveTime,

    #[schema(value_type = String, example = "13:05")]
    #[serde(deserialize_with = "deserialize_time")]
    pub arrival_time: NaiveTime,

    #[validate(custom(function = "validate_use_yn", message = "useYn은 Y 또는 N이어야 합니다"))]
    pub use_yn: Option<String>,
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).ok_or_else(|| serde::de::Error::custom(format!("잘못된 시각 형식: {}", raw)))
}

/// `HH:MM` 또는 `HH:MM:SS`
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightTicketResponse {
    pub id: i64,
    pub airline_id: i64,
    pub airline_name: Option<String>,
    pub departure_airport: String,
    pub arrival_airport: String,
    #[schema(value_type = String, example = "09:30:00")]
    pub departure_time: NaiveTime,
    #[schema(value_type = String, example = "13:05:00")]
    pub arrival_time: NaiveTime,
    pub use_yn: String,
}

impl FlightTicketResponse {
    pub fn new(ticket: flight_ticket::Model, airline_name: Option<String>) -> Self {
        Self {
            id: ticket.id,
            airline_id: ticket.airline_id,
            airline_name,
            departure_airport: ticket.departure_airport,
            arrival_airport: ticket.arrival_airport,
            departure_time: ticket.departure_time,
            arrival_time: ticket.arrival_time,
            use_yn: ticket.use_yn,
        }
    }
}
