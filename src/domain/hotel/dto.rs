use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::{hotel, room, room_type};

/// 1박 요금 상한 (통화 공통)
pub const MAX_ROOM_PRICE: i64 = 100_000_000;

/// 호텔 등록/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelRequest {
    #[validate(length(min = 1, max = 100, message = "호텔명은 1~100자 이내로 입력해야 합니다"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "주소는 1~255자 이내로 입력해야 합니다"))]
    pub address: String,

    pub description: Option<String>,

    /// 정산 계좌 은행명
    #[validate(length(max = 50, message = "은행명은 50자 이내여야 합니다"))]
    pub bank_name: Option<String>,

    /// 예금주
    #[validate(length(max = 50, message = "예금주는 50자 이내여야 합니다"))]
    pub account_holder: Option<String>,

    #[validate(length(max = 50, message = "계좌번호는 50자 이내여야 합니다"))]
    pub account_number: Option<String>,
}

/// 객실 타입 등록/수정 요청
///
/// 통화별 가격 중 하나 이상 또는 `basePrice`가 필요합니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeRequest {
    #[validate(length(min = 1, max = 100, message = "객실 타입명은 1~100자 이내로 입력해야 합니다"))]
    pub name: String,

    pub description: Option<String>,

    /// 최대 수용 인원
    #[validate(range(min = 1, max = 50, message = "수용 인원은 1~50명이어야 합니다"))]
    pub capacity: i32,

    #[schema(value_type = Option<String>, example = "130000")]
    pub price_krw: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "100.00")]
    pub price_usd: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "5600.00")]
    pub price_php: Option<Decimal>,

    /// 구버전 단일 요금 (USD)
    #[schema(value_type = Option<String>)]
    pub base_price: Option<Decimal>,
}

impl RoomTypeRequest {
    /// 저장할 기본 요금: USD 가격, 요청의 basePrice, 첫 번째로 존재하는 통화 가격 순
    pub fn resolve_base_price(&self) -> Option<Decimal> {
        self.price_usd
            .or(self.base_price)
            .or(self.price_krw)
            .or(self.price_php)
    }

    /// 0 미만이거나 상한을 넘는 가격이 있는지 확인
    pub fn has_out_of_range_price(&self) -> bool {
        let max = Decimal::from(MAX_ROOM_PRICE);
        [self.price_krw, self.price_usd, self.price_php, self.base_price]
            .iter()
            .flatten()
            .any(|price| price.is_sign_negative() || *price > max)
    }
}

/// 객실 등록/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    #[validate(length(min = 1, max = 20, message = "객실 번호는 1~20자 이내로 입력해야 합니다"))]
    pub room_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: i64,
    pub room_type_id: i64,
    pub room_number: String,
}

impl From<room::Model> for RoomResponse {
    fn from(model: room::Model) -> Self {
        Self {
            id: model.id,
            room_type_id: model.room_type_id,
            room_number: model.room_number,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeResponse {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    #[schema(value_type = Option<String>)]
    pub price_krw: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub price_usd: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub price_php: Option<Decimal>,
    #[schema(value_type = String)]
    pub base_price: Decimal,
    pub rooms: Vec<RoomResponse>,
}

impl RoomTypeResponse {
    pub fn new(model: room_type::Model, rooms: Vec<RoomResponse>) -> Self {
        Self {
            id: model.id,
            hotel_id: model.hotel_id,
            name: model.name,
            description: model.description,
            capacity: model.capacity,
            price_krw: model.price_krw,
            price_usd: model.price_usd,
            price_php: model.price_php,
            base_price: model.base_price,
            rooms,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub bank_name: Option<String>,
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub room_types: Vec<RoomTypeResponse>,
}

impl HotelResponse {
    pub fn new(model: hotel::Model, room_types: Vec<RoomTypeResponse>) -> Self {
        Self {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            address: model.address,
            description: model.description,
            bank_name: model.bank_name,
            account_holder: model.account_holder,
            account_number: model.account_number,
            room_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RoomTypeRequest {
        RoomTypeRequest {
            name: "Deluxe".to_string(),
            description: None,
            capacity: 2,
            price_krw: None,
            price_usd: None,
            price_php: None,
            base_price: None,
        }
    }

    #[test]
    fn base_price_should_prefer_usd() {
        let mut req = request();
        req.price_krw = Some(Decimal::from(130_000));
        req.price_usd = Some(Decimal::from(100));
        req.base_price = Some(Decimal::from(90));

        assert_eq!(req.resolve_base_price(), Some(Decimal::from(100)));
    }

    #[test]
    fn base_price_should_fall_back_to_first_currency_price() {
        let mut req = request();
        req.price_krw = Some(Decimal::from(130_000));

        assert_eq!(req.resolve_base_price(), Some(Decimal::from(130_000)));
        assert_eq!(request().resolve_base_price(), None);
    }

    #[test]
    fn negative_price_should_be_detected() {
        let mut req = request();
        req.price_php = Some(Decimal::from(-1));

        assert!(req.has_out_of_range_price());
    }

    #[test]
    fn price_above_limit_should_be_detected() {
        let mut req = request();
        req.price_krw = Some(Decimal::from(MAX_ROOM_PRICE));
        assert!(!req.has_out_of_range_price());

        req.price_krw = Some(Decimal::from(MAX_ROOM_PRICE) + Decimal::ONE);
        assert!(req.has_out_of_range_price());
    }
}
