use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::availability::find_conflicts;
use super::dto::{
    AvailableRoomResponse, CreateReservationRequest, ReservationResponse, ReservedRoomItem,
    SearchAvailableQuery,
};
use super::entity::reservation::{self, ReservationStatus};
use super::entity::reservation_room;
use super::pricing::{nightly_price, nights_between, quote_stay};
use crate::domain::discount::entity::discount_policy;
use crate::domain::hotel::entity::{hotel, room, room_type};
use crate::domain::hotel::service::ensure_hotel_manager;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;

/// 예약 상태 변경 요청 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationAction {
    Cancel,
    Confirm,
    CheckIn,
    CheckOut,
}

impl ReservationAction {
    fn label(self) -> &'static str {
        match self {
            ReservationAction::Cancel => "취소",
            ReservationAction::Confirm => "확정",
            ReservationAction::CheckIn => "체크인",
            ReservationAction::CheckOut => "체크아웃",
        }
    }
}

/// 현재 상태에서 요청한 동작을 적용한 다음 상태
pub fn next_status(
    current: ReservationStatus,
    action: ReservationAction,
) -> Result<ReservationStatus, AppError> {
    use ReservationStatus::*;

    let next = match (action, current) {
        (ReservationAction::Cancel, Pending | Confirmed) => Cancelled,
        (ReservationAction::Confirm, Pending) => Confirmed,
        (ReservationAction::CheckIn, Pending | Confirmed) => CheckedIn,
        (ReservationAction::CheckOut, CheckedIn) => CheckedOut,
        _ => {
            return Err(AppError::InvalidReservationState(format!(
                "{:?} 상태의 예약은 {}할 수 없습니다.",
                current,
                action.label()
            )))
        }
    };
    Ok(next)
}

/// 요청 기간 검증
/// 한 번에 예약할 수 있는 최대 숙박일
const MAX_NIGHTS: i64 = 365;

fn check_period(check_in: NaiveDateTime, check_out: NaiveDateTime) -> Result<(), AppError> {
    if check_out <= check_in {
        return Err(AppError::bad_request(
            "체크아웃 일시는 체크인 일시 이후여야 합니다.",
        ));
    }
    if nights_between(check_in, check_out) > MAX_NIGHTS {
        return Err(AppError::bad_request(format!(
            "숙박 기간은 최대 {}박입니다.",
            MAX_NIGHTS
        )));
    }
    Ok(())
}

pub struct ReservationService;

impl ReservationService {
    /// 기간과 인원 조건을 만족하는 예약 가능 객실 검색
    pub async fn search_available(
        state: &AppState,
        query: SearchAvailableQuery,
    ) -> Result<Vec<AvailableRoomResponse>, AppError> {
        check_period(query.check_in, query.check_out)?;
        let guests = query.guest_count.unwrap_or(1).max(1);

        let room_types = room_type::Entity::find()
            .filter(room_type::Column::Capacity.gte(guests))
            .all(&state.db)
            .await?;
        if room_types.is_empty() {
            return Ok(Vec::new());
        }

        let rooms = room::Entity::find()
            .filter(room::Column::RoomTypeId.is_in(room_types.iter().map(|rt| rt.id)))
            .order_by_asc(room::Column::Id)
            .all(&state.db)
            .await?;
        let room_ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
        let booked = find_conflicts(&state.db, &room_ids, query.check_in, query.check_out).await?;

        let hotels: HashMap<i64, hotel::Model> = hotel::Entity::find()
            .filter(hotel::Column::Id.is_in(room_types.iter().map(|rt| rt.hotel_id)))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|h| (h.id, h))
            .collect();
        let types: HashMap<i64, room_type::Model> =
            room_types.into_iter().map(|rt| (rt.id, rt)).collect();

        let mut available: Vec<AvailableRoomResponse> = rooms
            .into_iter()
            .filter(|r| !booked.contains(&r.id))
            .filter_map(|r| {
                let rt = types.get(&r.room_type_id)?;
                let h = hotels.get(&rt.hotel_id)?;
                Some(AvailableRoomResponse {
                    room_id: r.id,
                    room_number: r.room_number,
                    room_type_id: rt.id,
                    room_type_name: rt.name.clone(),
                    capacity: rt.capacity,
                    hotel_id: h.id,
                    hotel_name: h.name.clone(),
                    hotel_address: h.address.clone(),
                    price_krw: rt.price_krw,
                    price_usd: rt.price_usd,
                    price_php: rt.price_php,
                    base_price: rt.base_price,
                })
            })
            .collect();
        available.sort_by(|a, b| {
            (a.hotel_id, &a.room_number).cmp(&(b.hotel_id, &b.room_number))
        });

        Ok(available)
    }

    /// 객실 예약
    ///
    /// 객실을 호텔별로 묶어 호텔마다 하나의 예약을 생성합니다.
    /// 가용성 재확인과 저장은 하나의 트랜잭션에서 수행됩니다.
    pub async fn create_reservation(
        state: &AppState,
        user: &AuthUser,
        req: CreateReservationRequest,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        check_period(req.check_in, req.check_out)?;
        let user_id = user.user_id()?;
        let currency = req.currency.unwrap_or_default();
        let room_ids: Vec<i64> = req
            .room_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let txn = state.db.begin().await?;

        // 같은 객실에 대한 동시 예약을 직렬화한다 (SQLite는 잠금 구문을 무시)
        let rooms = room::Entity::find()
            .filter(room::Column::Id.is_in(room_ids.clone()))
            .order_by_asc(room::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await?;
        if rooms.len() != room_ids.len() {
            let found: BTreeSet<i64> = rooms.iter().map(|r| r.id).collect();
            let missing = room_ids
                .iter()
                .find(|id| !found.contains(id))
                .copied()
                .unwrap_or_default();
            return Err(AppError::not_found(format!(
                "존재하지 않는 객실입니다. (ID: {})",
                missing
            )));
        }

        let conflicts = find_conflicts(&txn, &room_ids, req.check_in, req.check_out).await?;
        if let Some(conflict) = rooms.iter().find(|r| conflicts.contains(&r.id)) {
            return Err(AppError::RoomUnavailable(format!(
                "{}호는 해당 기간에 이미 예약되어 있습니다.",
                conflict.room_number
            )));
        }

        let types: HashMap<i64, room_type::Model> = room_type::Entity::find()
            .filter(room_type::Column::Id.is_in(rooms.iter().map(|r| r.room_type_id)))
            .all(&txn)
            .await?
            .into_iter()
            .map(|rt| (rt.id, rt))
            .collect();

        let mut by_hotel: BTreeMap<i64, Vec<(&room::Model, &room_type::Model)>> = BTreeMap::new();
        for r in &rooms {
            let rt = types
                .get(&r.room_type_id)
                .ok_or_else(|| AppError::internal_error(format!("room type of room {} missing", r.id)))?;
            by_hotel.entry(rt.hotel_id).or_default().push((r, rt));
        }

        let nights = nights_between(req.check_in, req.check_out);
        let now = Utc::now().naive_utc();
        let mut created = Vec::with_capacity(by_hotel.len());

        for (hotel_id, hotel_rooms) in by_hotel {
            let policies = discount_policy::Entity::find()
                .filter(discount_policy::Column::HotelId.eq(hotel_id))
                .order_by_asc(discount_policy::Column::Id)
                .all(&txn)
                .await?;

            let prices: Vec<_> = hotel_rooms
                .iter()
                .map(|(_, rt)| nightly_price(rt, currency))
                .collect();
            let quote = quote_stay(&prices, nights, &policies);

            let saved = reservation::ActiveModel {
                user_id: Set(user_id),
                hotel_id: Set(hotel_id),
                check_in: Set(req.check_in),
                check_out: Set(req.check_out),
                actual_check_in_time: Set(None),
                actual_check_out_time: Set(None),
                is_late_checkout: Set(req.is_late_checkout),
                status: Set(ReservationStatus::Pending),
                total_price: Set(quote.total),
                currency: Set(currency),
                discount_price: Set(quote.discount.as_ref().map(|d| d.amount)),
                discount_policy_name: Set(quote.discount.as_ref().map(|d| d.policy_name.clone())),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            let links = hotel_rooms.iter().map(|(r, _)| reservation_room::ActiveModel {
                reservation_id: Set(saved.id),
                room_id: Set(r.id),
                ..Default::default()
            });
            reservation_room::Entity::insert_many(links).exec(&txn).await?;

            info!(
                reservation_id = saved.id,
                hotel_id,
                user_id,
                nights,
                total = %saved.total_price,
                "Reservation created"
            );
            created.push(saved);
        }

        txn.commit().await?;

        build_responses(&state.db, created).await
    }

    /// 내 예약 목록 (체크인 최신순)
    pub async fn my_reservations(
        state: &AppState,
        user: &AuthUser,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        let reservations = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user.user_id()?))
            .order_by_desc(reservation::Column::CheckIn)
            .order_by_desc(reservation::Column::Id)
            .all(&state.db)
            .await?;

        build_responses(&state.db, reservations).await
    }

    /// 예약 상태 변경
    ///
    /// 취소는 예약자 본인도 가능하고, 나머지 동작은 호텔 소유자 또는 관리자만 가능합니다.
    pub async fn change_status(
        state: &AppState,
        user: &AuthUser,
        reservation_id: i64,
        action: ReservationAction,
    ) -> Result<ReservationResponse, AppError> {
        let existing = reservation::Entity::find_by_id(reservation_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 예약입니다."))?;

        let is_guest = existing.user_id == user.user_id()?;
        if !(action == ReservationAction::Cancel && is_guest) {
            ensure_hotel_manager(&state.db, user, existing.hotel_id).await?;
        }

        let updated = Self::apply_transition(&state.db, &existing, action).await?;

        info!(reservation_id, status = ?updated.status, by = %user.username(), "Reservation status changed");

        let mut responses = build_responses(&state.db, vec![updated]).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::internal_error("updated reservation missing"))
    }

    /// 읽어 온 상태가 그대로일 때만 다음 상태로 갱신
    ///
    /// 그사이 다른 요청이 상태를 바꿨다면 `RES4001`을 반환합니다.
    pub async fn apply_transition<C: ConnectionTrait>(
        conn: &C,
        current: &reservation::Model,
        action: ReservationAction,
    ) -> Result<reservation::Model, AppError> {
        let next = next_status(current.status, action)?;
        let now = Utc::now().naive_utc();

        let mut changes = reservation::ActiveModel {
            status: Set(next),
            updated_at: Set(now),
            ..Default::default()
        };
        match action {
            ReservationAction::CheckIn => changes.actual_check_in_time = Set(Some(now)),
            ReservationAction::CheckOut => changes.actual_check_out_time = Set(Some(now)),
            ReservationAction::Cancel | ReservationAction::Confirm => {}
        }

        let result = reservation::Entity::update_many()
            .set(changes)
            .filter(reservation::Column::Id.eq(current.id))
            .filter(reservation::Column::Status.eq(current.status))
            .exec(conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::InvalidReservationState(format!(
                "예약 상태가 이미 변경되어 {}할 수 없습니다.",
                action.label()
            )));
        }

        reservation::Entity::find_by_id(current.id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 예약입니다."))
    }

    /// 호텔 관리자용 날짜별 예약 목록
    ///
    /// 숙박 기간이 해당 날짜와 겹치는 예약을 체크인 순으로 반환합니다.
    pub async fn manager_reservations(
        state: &AppState,
        user: &AuthUser,
        hotel_id: i64,
        date: Option<NaiveDate>,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        ensure_hotel_manager(&state.db, user, hotel_id).await?;

        let day = date.unwrap_or_else(|| Utc::now().date_naive());
        let day_start = day.and_time(chrono::NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);

        let reservations = reservation::Entity::find()
            .filter(reservation::Column::HotelId.eq(hotel_id))
            .filter(reservation::Column::CheckIn.lt(day_end))
            .filter(reservation::Column::CheckOut.gt(day_start))
            .order_by_asc(reservation::Column::CheckIn)
            .order_by_asc(reservation::Column::Id)
            .all(&state.db)
            .await?;

        build_responses(&state.db, reservations).await
    }
}

/// 예약 목록에 객실, 호텔명, 예약자명을 붙여 응답으로 변환
pub async fn build_responses<C: ConnectionTrait>(
    conn: &C,
    reservations: Vec<reservation::Model>,
) -> Result<Vec<ReservationResponse>, AppError> {
    if reservations.is_empty() {
        return Ok(Vec::new());
    }

    let reservation_ids: Vec<i64> = reservations.iter().map(|r| r.id).collect();
    let links = reservation_room::Entity::find()
        .find_also_related(room::Entity)
        .filter(reservation_room::Column::ReservationId.is_in(reservation_ids))
        .order_by_asc(reservation_room::Column::RoomId)
        .all(conn)
        .await?;

    let mut rooms_by_reservation: HashMap<i64, Vec<ReservedRoomItem>> = HashMap::new();
    for (link, linked_room) in links {
        let room_number = linked_room.map(|r| r.room_number).unwrap_or_default();
        rooms_by_reservation
            .entry(link.reservation_id)
            .or_default()
            .push(ReservedRoomItem {
                room_id: link.room_id,
                room_number,
            });
    }

    let hotel_names: HashMap<i64, String> = hotel::Entity::find()
        .filter(hotel::Column::Id.is_in(reservations.iter().map(|r| r.hotel_id)))
        .all(conn)
        .await?
        .into_iter()
        .map(|h| (h.id, h.name))
        .collect();

    let guest_names: HashMap<i64, String> = user::Entity::find()
        .filter(user::Column::Id.is_in(reservations.iter().map(|r| r.user_id)))
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, u.full_name))
        .collect();

    Ok(reservations
        .into_iter()
        .map(|r| ReservationResponse {
            id: r.id,
            user_id: r.user_id,
            guest_name: guest_names.get(&r.user_id).cloned(),
            hotel_id: r.hotel_id,
            hotel_name: hotel_names.get(&r.hotel_id).cloned(),
            rooms: rooms_by_reservation.remove(&r.id).unwrap_or_default(),
            check_in: r.check_in,
            check_out: r.check_out,
            actual_check_in_time: r.actual_check_in_time,
            actual_check_out_time: r.actual_check_out_time,
            is_late_checkout: r.is_late_checkout,
            status: r.status,
            total_price: r.total_price,
            currency: r.currency,
            discount_price: r.discount_price,
            discount_policy_name: r.discount_policy_name,
            created_at: r.created_at,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReservationStatus::*;

    #[test]
    fn pending_reservation_should_follow_happy_path() {
        assert_eq!(next_status(Pending, ReservationAction::Confirm).unwrap(), Confirmed);
        assert_eq!(next_status(Confirmed, ReservationAction::CheckIn).unwrap(), CheckedIn);
        assert_eq!(next_status(CheckedIn, ReservationAction::CheckOut).unwrap(), CheckedOut);
    }

    #[test]
    fn pending_reservation_can_check_in_directly() {
        assert_eq!(next_status(Pending, ReservationAction::CheckIn).unwrap(), CheckedIn);
    }

    #[test]
    fn only_pending_or_confirmed_can_be_cancelled() {
        assert!(next_status(Pending, ReservationAction::Cancel).is_ok());
        assert!(next_status(Confirmed, ReservationAction::Cancel).is_ok());
        assert!(next_status(CheckedIn, ReservationAction::Cancel).is_err());
        assert!(next_status(Cancelled, ReservationAction::Cancel).is_err());
    }

    #[test]
    fn invalid_transition_should_be_reservation_state_error() {
        let err = next_status(Pending, ReservationAction::CheckOut).unwrap_err();

        assert!(matches!(err, AppError::InvalidReservationState(_)));
        assert_eq!(err.error_code(), "RES4001");
    }

    #[test]
    fn check_out_must_follow_check_in() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let check_in = day.and_hms_opt(15, 0, 0).unwrap();

        assert!(check_period(check_in, check_in).is_err());
        assert!(check_period(check_in, check_in + Duration::days(1)).is_ok());
    }

    #[test]
    fn stay_longer_than_a_year_should_be_rejected() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let check_in = day.and_hms_opt(15, 0, 0).unwrap();

        assert!(check_period(check_in, check_in + Duration::days(MAX_NIGHTS)).is_ok());
        assert!(check_period(check_in, check_in + Duration::days(MAX_NIGHTS + 1)).is_err());
    }
}
