//! 객실 예약 가능 여부 판정
//!
//! 숙박 기간은 반열린 구간 `[check_in, check_out)` 으로 취급합니다.
//! 앞 예약의 체크아웃 시각과 다음 예약의 체크인 시각이 같으면 겹치지 않습니다.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use super::entity::reservation::{self, ReservationStatus};
use super::entity::reservation_room;
use crate::utils::error::AppError;

/// 특정 객실에 잡혀 있는 기존 예약 구간
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub room_id: i64,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub status: ReservationStatus,
}

/// 두 반열린 구간이 겹치는지 판정
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// 요청 구간과 겹치는 취소되지 않은 예약이 있는 객실 ID 목록 (오름차순)
pub fn conflicting_room_ids(
    bookings: &[Booking],
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
) -> BTreeSet<i64> {
    bookings
        .iter()
        .filter(|b| b.status != ReservationStatus::Cancelled)
        .filter(|b| overlaps(b.check_in, b.check_out, check_in, check_out))
        .map(|b| b.room_id)
        .collect()
}

/// 주어진 객실들의 기존 예약 구간을 조회합니다.
///
/// 요청 체크인 이전에 끝난 예약과 취소된 예약은 DB에서 먼저 걸러냅니다.
pub async fn load_bookings<C: ConnectionTrait>(
    conn: &C,
    room_ids: &[i64],
    check_in: NaiveDateTime,
) -> Result<Vec<Booking>, AppError> {
    if room_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = reservation_room::Entity::find()
        .find_also_related(reservation::Entity)
        .filter(reservation_room::Column::RoomId.is_in(room_ids.to_vec()))
        .filter(reservation::Column::Status.ne(ReservationStatus::Cancelled))
        .filter(reservation::Column::CheckOut.gt(check_in))
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(link, reservation)| {
            reservation.map(|r| Booking {
                room_id: link.room_id,
                check_in: r.check_in,
                check_out: r.check_out,
                status: r.status,
            })
        })
        .collect())
}

/// 요청 구간에 이미 예약된 객실 ID 목록
pub async fn find_conflicts<C: ConnectionTrait>(
    conn: &C,
    room_ids: &[i64],
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
) -> Result<BTreeSet<i64>, AppError> {
    let bookings = load_bookings(conn, room_ids, check_in).await?;
    Ok(conflicting_room_ids(&bookings, check_in, check_out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn booking(room_id: i64, from: u32, to: u32, status: ReservationStatus) -> Booking {
        Booking {
            room_id,
            check_in: at(from, 15),
            check_out: at(to, 11),
            status,
        }
    }

    #[test]
    fn touching_intervals_should_not_overlap() {
        assert!(!overlaps(at(1, 15), at(3, 11), at(3, 11), at(5, 11)));
        assert!(!overlaps(at(3, 11), at(5, 11), at(1, 15), at(3, 11)));
    }

    #[test]
    fn nested_and_partial_intervals_should_overlap() {
        assert!(overlaps(at(1, 15), at(10, 11), at(3, 15), at(4, 11)));
        assert!(overlaps(at(1, 15), at(3, 11), at(2, 15), at(5, 11)));
        assert!(overlaps(at(2, 15), at(5, 11), at(1, 15), at(3, 11)));
    }

    #[test]
    fn cancelled_booking_should_not_conflict() {
        let bookings = vec![
            booking(1, 1, 4, ReservationStatus::Cancelled),
            booking(2, 1, 4, ReservationStatus::Pending),
        ];

        let conflicts = conflicting_room_ids(&bookings, at(2, 15), at(3, 11));

        assert_eq!(conflicts.into_iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn checked_in_booking_should_still_conflict() {
        let bookings = vec![booking(7, 1, 4, ReservationStatus::CheckedIn)];

        assert!(conflicting_room_ids(&bookings, at(3, 15), at(6, 11)).contains(&7));
        assert!(conflicting_room_ids(&bookings, at(4, 11), at(6, 11)).is_empty());
    }
}
