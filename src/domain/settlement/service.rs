use std::collections::BTreeMap;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::dto::{CurrencyTotal, SettlementQuery, SettlementResponse};
use crate::domain::hotel::service::ensure_hotel_manager;
use crate::domain::reservation::entity::reservation::{self, Currency, ReservationStatus};
use crate::domain::reservation::service::build_responses;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;

/// 통화별 건수, 결제 합계, 할인 합계 (통화 코드 순)
pub fn summarize_by_currency(reservations: &[reservation::Model]) -> Vec<CurrencyTotal> {
    let mut totals: BTreeMap<&'static str, CurrencyTotal> = BTreeMap::new();

    for r in reservations {
        let entry = totals
            .entry(currency_code(r.currency))
            .or_insert_with(|| CurrencyTotal {
                currency: r.currency,
                count: 0,
                total_price: Decimal::ZERO,
                discount_total: Decimal::ZERO,
            });
        entry.count += 1;
        entry.total_price += r.total_price;
        entry.discount_total += r.discount_price.unwrap_or(Decimal::ZERO);
    }

    totals.into_values().collect()
}

fn currency_code(currency: Currency) -> &'static str {
    match currency {
        Currency::Krw => "KRW",
        Currency::Usd => "USD",
        Currency::Php => "PHP",
    }
}

pub struct SettlementService;

impl SettlementService {
    /// 기간 내 체크아웃 완료된 예약의 정산 내역
    pub async fn settlement(
        state: &AppState,
        user: &AuthUser,
        hotel_id: i64,
        query: SettlementQuery,
    ) -> Result<SettlementResponse, AppError> {
        if query.end_date < query.start_date {
            return Err(AppError::bad_request(
                "종료일은 시작일 이후여야 합니다.",
            ));
        }

        let found = ensure_hotel_manager(&state.db, user, hotel_id).await?;

        let from = query.start_date.and_time(NaiveTime::MIN);
        let to = query
            .end_date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| AppError::bad_request("잘못된 종료일입니다."))?;

        let reservations = reservation::Entity::find()
            .filter(reservation::Column::HotelId.eq(hotel_id))
            .filter(reservation::Column::Status.eq(ReservationStatus::CheckedOut))
            .filter(reservation::Column::ActualCheckOutTime.between(from, to))
            .order_by_asc(reservation::Column::ActualCheckOutTime)
            .all(&state.db)
            .await?;

        let totals = summarize_by_currency(&reservations);
        debug!(hotel_id, count = reservations.len(), "Settlement computed");

        Ok(SettlementResponse {
            hotel_id,
            hotel_name: found.name,
            start_date: query.start_date,
            end_date: query.end_date,
            totals,
            reservations: build_responses(&state.db, reservations).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn checked_out(currency: Currency, total: i64, discount: Option<i64>) -> reservation::Model {
        let now = Utc::now().naive_utc();
        reservation::Model {
            id: 1,
            user_id: 1,
            hotel_id: 1,
            check_in: now,
            check_out: now,
            actual_check_in_time: Some(now),
            actual_check_out_time: Some(now),
            is_late_checkout: false,
            status: ReservationStatus::CheckedOut,
            total_price: Decimal::from(total),
            currency,
            discount_price: discount.map(Decimal::from),
            discount_policy_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn totals_should_be_grouped_by_currency() {
        let reservations = vec![
            checked_out(Currency::Usd, 450, Some(50)),
            checked_out(Currency::Krw, 260_000, None),
            checked_out(Currency::Usd, 100, None),
        ];

        let totals = summarize_by_currency(&reservations);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].currency, Currency::Krw);
        assert_eq!(totals[0].count, 1);
        assert_eq!(totals[1].currency, Currency::Usd);
        assert_eq!(totals[1].count, 2);
        assert_eq!(totals[1].total_price, Decimal::from(550));
        assert_eq!(totals[1].discount_total, Decimal::from(50));
    }

    #[test]
    fn empty_input_should_produce_no_totals() {
        assert!(summarize_by_currency(&[]).is_empty());
    }
}
