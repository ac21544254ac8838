use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::entity::reservation::Currency;
use crate::domain::discount::calculator::{best_discount, AppliedDiscount};
use crate::domain::discount::entity::discount_policy;
use crate::domain::hotel::entity::room_type;

/// 숙박일 수 (날짜 기준 차이, 최소 1박)
pub fn nights_between(check_in: NaiveDateTime, check_out: NaiveDateTime) -> i64 {
    (check_out.date() - check_in.date()).num_days().max(1)
}

/// 통화별 1박 요금. 해당 통화 가격이 없으면 기본 요금을 사용합니다.
pub fn nightly_price(room_type: &room_type::Model, currency: Currency) -> Decimal {
    let price = match currency {
        Currency::Krw => room_type.price_krw,
        Currency::Usd => room_type.price_usd,
        Currency::Php => room_type.price_php,
    };
    price.unwrap_or(room_type.base_price)
}

/// 한 호텔 단위의 요금 계산 결과
#[derive(Debug, Clone, PartialEq)]
pub struct StayQuote {
    pub nights: i64,
    pub subtotal: Decimal,
    pub discount: Option<AppliedDiscount>,
    pub total: Decimal,
}

/// 객실별 1박 요금 목록으로 숙박 요금을 계산하고 최적 할인을 적용합니다.
pub fn quote_stay(
    nightly_prices: &[Decimal],
    nights: i64,
    policies: &[discount_policy::Model],
) -> StayQuote {
    let per_night: Decimal = nightly_prices.iter().copied().sum();
    let subtotal = per_night * Decimal::from(nights);

    let discount = best_discount(policies, subtotal, nights);
    let total = discount
        .as_ref()
        .map(|d| subtotal - d.amount)
        .unwrap_or(subtotal)
        .max(Decimal::ZERO);

    StayQuote {
        nights,
        subtotal,
        discount,
        total,
    }
}
