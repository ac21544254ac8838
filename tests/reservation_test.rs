//! 예약 API 통합 테스트
//!
//! 테스트 대상:
//! - GET /api/v1/reservations/search
//! - POST /api/v1/reservations, GET /api/v1/reservations/me
//! - POST /api/v1/reservations/{reservationId}/cancel|confirm|check-in|check-out
//! - GET /api/v1/hotels/{hotelId}/reservations

mod common;

use axum::http::StatusCode;
use common::{decimal, TestApp};
use hotel_server::domain::reservation::entity::reservation;
use hotel_server::domain::reservation::service::{ReservationAction, ReservationService};
use hotel_server::utils::error::AppError;
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use serde_json::{json, Value};

struct Inventory {
    owner: String,
    hotel_id: i64,
    rooms: Vec<i64>,
}

/// 2인실 객실 두 개(101, 102)를 가진 호텔
async fn setup_hotel(app: &TestApp, owner_name: &str, hotel_name: &str) -> Inventory {
    let owner = app.register(owner_name, "OWNER").await;
    let hotel_id = app.create_hotel(&owner, hotel_name).await;
    let room_type_id = app.add_room_type(&owner, hotel_id, 2, "100.00").await;
    let rooms = vec![
        app.add_room(&owner, room_type_id, "101").await,
        app.add_room(&owner, room_type_id, "102").await,
    ];

    Inventory {
        owner,
        hotel_id,
        rooms,
    }
}

async fn reserve(
    app: &TestApp,
    token: &str,
    room_ids: &[i64],
    check_in: &str,
    check_out: &str,
) -> (StatusCode, Value) {
    app.post(
        "/api/v1/reservations",
        Some(token),
        json!({ "roomIds": room_ids, "checkIn": check_in, "checkOut": check_out }),
    )
    .await
}

fn room_ids_of(search_result: &Value) -> Vec<i64> {
    search_result["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["roomId"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn booked_room_should_disappear_from_overlapping_search() {
    let app = TestApp::new().await;
    let inventory = setup_hotel(&app, "owner01", "Sunrise").await;
    let guest = app.register("guest01", "USER").await;

    let (status, _) = reserve(
        &app,
        &guest,
        &[inventory.rooms[0]],
        "2030-03-01T15:00:00",
        "2030-03-03T11:00:00",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .get(
            "/api/v1/reservations/search?checkIn=2030-03-02T15:00:00&checkOut=2030-03-04T11:00:00",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room_ids_of(&body), vec![inventory.rooms[1]]);

    // 체크아웃 시각과 맞닿는 예약은 겹치지 않음
    let (_, body) = app
        .get(
            "/api/v1/reservations/search?checkIn=2030-03-03T11:00:00&checkOut=2030-03-05T11:00:00",
            None,
        )
        .await;
    assert_eq!(room_ids_of(&body), inventory.rooms);
}

#[tokio::test]
async fn search_should_filter_by_guest_count() {
    let app = TestApp::new().await;
    setup_hotel(&app, "owner01", "Sunrise").await;

    let (status, body) = app
        .get(
            "/api/v1/reservations/search?checkIn=2030-03-01T15:00:00&checkOut=2030-03-02T11:00:00&guestCount=3",
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_search_query_should_be_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app
        .get("/api/v1/reservations/search?checkIn=tomorrow", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["isSuccess"], false);

    let (status, _) = app
        .get(
            "/api/v1/reservations/search?checkIn=2030-03-03T15:00:00&checkOut=2030-03-01T11:00:00",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overlapping_reservation_should_conflict() {
    let app = TestApp::new().await;
    let inventory = setup_hotel(&app, "owner01", "Sunrise").await;
    let first = app.register("guest01", "USER").await;
    let second = app.register("guest02", "USER").await;

    let (status, _) = reserve(
        &app,
        &first,
        &[inventory.rooms[0]],
        "2030-03-01T15:00:00",
        "2030-03-03T11:00:00",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = reserve(
        &app,
        &second,
        &[inventory.rooms[1], inventory.rooms[0]],
        "2030-03-02T15:00:00",
        "2030-03-04T11:00:00",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RES4091");
    assert!(body["message"].as_str().unwrap().contains("101"));

    // 실패한 요청은 어떤 객실도 점유하지 않음
    let (_, mine) = app.get("/api/v1/reservations/me", Some(&second)).await;
    assert!(mine["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn cancelled_reservation_should_release_room() {
    let app = TestApp::new().await;
    let inventory = setup_hotel(&app, "owner01", "Sunrise").await;
    let guest = app.register("guest01", "USER").await;

    let (_, body) = reserve(
        &app,
        &guest,
        &[inventory.rooms[0]],
        "2030-03-01T15:00:00",
        "2030-03-03T11:00:00",
    )
    .await;
    let reservation_id = body["result"][0]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(
            &format!("/api/v1/reservations/{}/cancel", reservation_id),
            Some(&guest),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "CANCELLED");

    let (status, _) = reserve(
        &app,
        &guest,
        &[inventory.rooms[0]],
        "2030-03-01T15:00:00",
        "2030-03-03T11:00:00",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rooms_in_different_hotels_should_create_one_reservation_per_hotel() {
    let app = TestApp::new().await;
    let sunrise = setup_hotel(&app, "owner01", "Sunrise").await;
    let sunset = setup_hotel(&app, "owner02", "Sunset").await;
    let guest = app.register("guest01", "USER").await;

    let (status, body) = reserve(
        &app,
        &guest,
        &[sunrise.rooms[0], sunrise.rooms[1], sunset.rooms[0]],
        "2030-03-01T15:00:00",
        "2030-03-03T11:00:00",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reservations = body["result"].as_array().unwrap();
    assert_eq!(reservations.len(), 2);

    let sunrise_reservation = reservations
        .iter()
        .find(|r| r["hotelId"] == sunrise.hotel_id)
        .unwrap();
    assert_eq!(sunrise_reservation["rooms"].as_array().unwrap().len(), 2);
    // 100 USD x 2실 x 2박
    assert_eq!(
        decimal(&sunrise_reservation["totalPrice"]),
        Decimal::from(400)
    );
    assert_eq!(sunrise_reservation["currency"], "USD");
    assert_eq!(sunrise_reservation["status"], "PENDING");
}

#[tokio::test]
async fn krw_reservation_should_use_krw_price() {
    let app = TestApp::new().await;
    let inventory = setup_hotel(&app, "owner01", "Sunrise").await;
    let guest = app.register("guest01", "USER").await;

    let (status, body) = app
        .post(
            "/api/v1/reservations",
            Some(&guest),
            json!({
                "roomIds": [inventory.rooms[0]],
                "checkIn": "2030-03-01T15:00:00",
                "checkOut": "2030-03-02T11:00:00",
                "currency": "KRW"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"][0]["currency"], "KRW");
    assert_eq!(
        decimal(&body["result"][0]["totalPrice"]),
        Decimal::from(130_000)
    );
}

#[tokio::test]
async fn unknown_room_should_be_not_found() {
    let app = TestApp::new().await;
    setup_hotel(&app, "owner01", "Sunrise").await;
    let guest = app.register("guest01", "USER").await;

    let (status, _) = reserve(
        &app,
        &guest,
        &[9999],
        "2030-03-01T15:00:00",
        "2030-03-02T11:00:00",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stay_longer_than_a_year_should_be_bad_request() {
    let app = TestApp::new().await;
    let inventory = setup_hotel(&app, "owner01", "Sunrise").await;
    let guest = app.register("guest01", "USER").await;

    let (status, _) = reserve(
        &app,
        &guest,
        &inventory.rooms[..1],
        "0001-01-01T15:00:00",
        "9999-12-31T11:00:00",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/api/v1/reservations/me", Some(&guest)).await;
    assert!(body["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn status_flow_should_follow_allowed_transitions() {
    let app = TestApp::new().await;
    let inventory = setup_hotel(&app, "owner01", "Sunrise").await;
    let guest = app.register("guest01", "USER").await;

    let (_, body) = reserve(
        &app,
        &guest,
        &[inventory.rooms[0]],
        "2030-03-01T15:00:00",
        "2030-03-03T11:00:00",
    )
    .await;
    let id = body["result"][0]["id"].as_i64().unwrap();

    // 투숙객은 체크인 처리 불가
    let (status, _) = app
        .post(
            &format!("/api/v1/reservations/{}/check-in", id),
            Some(&guest),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 체크인 전 체크아웃 불가
    let (status, body) = app
        .post(
            &format!("/api/v1/reservations/{}/check-out", id),
            Some(&inventory.owner),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "RES4001");

    for (action, expected) in [
        ("confirm", "CONFIRMED"),
        ("check-in", "CHECKED_IN"),
        ("check-out", "CHECKED_OUT"),
    ] {
        let (status, body) = app
            .post(
                &format!("/api/v1/reservations/{}/{}", id, action),
                Some(&inventory.owner),
                json!({}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{} failed: {}", action, body);
        assert_eq!(body["result"]["status"], expected);
    }

    let (_, body) = app.get("/api/v1/reservations/me", Some(&guest)).await;
    let stored = &body["result"][0];
    assert!(!stored["actualCheckInTime"].is_null());
    assert!(!stored["actualCheckOutTime"].is_null());

    // 체크아웃된 예약은 취소 불가
    let (status, _) = app
        .post(
            &format!("/api/v1/reservations/{}/cancel", id),
            Some(&guest),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transition_from_stale_status_should_not_overwrite() {
    let app = TestApp::new().await;
    let inventory = setup_hotel(&app, "owner01", "Sunrise").await;
    let guest = app.register("guest01", "USER").await;

    let (_, body) = reserve(
        &app,
        &guest,
        &[inventory.rooms[0]],
        "2030-03-01T15:00:00",
        "2030-03-03T11:00:00",
    )
    .await;
    let id = body["result"][0]["id"].as_i64().unwrap();

    // 취소 전에 읽어 둔 PENDING 상태
    let stale = reservation::Entity::find_by_id(id)
        .one(&app.state.db)
        .await
        .unwrap()
        .unwrap();

    let (status, _) = app
        .post(
            &format!("/api/v1/reservations/{}/cancel", id),
            Some(&guest),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let err = ReservationService::apply_transition(&app.state.db, &stale, ReservationAction::CheckIn)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidReservationState(_)));

    let (_, mine) = app.get("/api/v1/reservations/me", Some(&guest)).await;
    assert_eq!(mine["result"][0]["status"], "CANCELLED");
    assert!(mine["result"][0]["actualCheckInTime"].is_null());
}

#[tokio::test]
async fn manager_should_see_reservations_overlapping_date() {
    let app = TestApp::new().await;
    let inventory = setup_hotel(&app, "owner01", "Sunrise").await;
    let guest = app.register("guest01", "USER").await;
    let rival = app.register("owner02", "OWNER").await;

    reserve(
        &app,
        &guest,
        &[inventory.rooms[0]],
        "2030-03-01T15:00:00",
        "2030-03-03T11:00:00",
    )
    .await;
    reserve(
        &app,
        &guest,
        &[inventory.rooms[1]],
        "2030-03-10T15:00:00",
        "2030-03-12T11:00:00",
    )
    .await;

    let uri = format!(
        "/api/v1/hotels/{}/reservations?date=2030-03-02",
        inventory.hotel_id
    );
    let (status, body) = app.get(&uri, Some(&inventory.owner)).await;
    assert_eq!(status, StatusCode::OK);
    let reservations = body["result"].as_array().unwrap();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0]["guestName"], "guest01 name");

    let (status, _) = app.get(&uri, Some(&rival)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
