//! 정산 API 통합 테스트
//!
//! 테스트 대상:
//! - GET /api/v1/hotels/{hotelId}/settlement

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{decimal, TestApp};
use rust_decimal::Decimal;
use serde_json::json;

/// 예약 생성 후 체크아웃까지 진행
async fn checked_out_stay(
    app: &TestApp,
    owner: &str,
    guest: &str,
    room_id: i64,
    currency: &str,
) -> i64 {
    let (status, body) = app
        .post(
            "/api/v1/reservations",
            Some(guest),
            json!({
                "roomIds": [room_id],
                "checkIn": "2030-01-10T15:00:00",
                "checkOut": "2030-01-12T11:00:00",
                "currency": currency
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "booking failed: {}", body);
    let id = body["result"][0]["id"].as_i64().unwrap();

    for action in ["check-in", "check-out"] {
        let (status, body) = app
            .post(
                &format!("/api/v1/reservations/{}/{}", id, action),
                Some(owner),
                json!({}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{} failed: {}", action, body);
    }
    id
}

#[tokio::test]
async fn settlement_should_total_checked_out_stays_by_currency() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let guest = app.register("guest01", "USER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;
    let room_type_id = app.add_room_type(&owner, hotel_id, 2, "100.00").await;
    let room_a = app.add_room(&owner, room_type_id, "101").await;
    let room_b = app.add_room(&owner, room_type_id, "102").await;
    let room_c = app.add_room(&owner, room_type_id, "103").await;

    checked_out_stay(&app, &owner, &guest, room_a, "USD").await;
    checked_out_stay(&app, &owner, &guest, room_b, "KRW").await;

    // 체크아웃 전 예약은 정산 대상 아님
    let (status, _) = app
        .post(
            "/api/v1/reservations",
            Some(&guest),
            json!({
                "roomIds": [room_c],
                "checkIn": "2030-01-10T15:00:00",
                "checkOut": "2030-01-12T11:00:00"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let today = Utc::now().date_naive();
    let uri = format!(
        "/api/v1/hotels/{}/settlement?startDate={}&endDate={}",
        hotel_id,
        today - Duration::days(1),
        today + Duration::days(1)
    );
    let (status, body) = app.get(&uri, Some(&owner)).await;

    assert_eq!(status, StatusCode::OK, "settlement failed: {}", body);
    let result = &body["result"];
    assert_eq!(result["hotelName"], "Sunrise");
    assert_eq!(result["reservations"].as_array().unwrap().len(), 2);

    let totals = result["totals"].as_array().unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0]["currency"], "KRW");
    assert_eq!(decimal(&totals[0]["totalPrice"]), Decimal::from(260_000));
    assert_eq!(totals[1]["currency"], "USD");
    assert_eq!(totals[1]["count"], 1);
    assert_eq!(decimal(&totals[1]["totalPrice"]), Decimal::from(200));
}

#[tokio::test]
async fn period_outside_checkout_should_be_empty() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let guest = app.register("guest01", "USER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;
    let room_type_id = app.add_room_type(&owner, hotel_id, 2, "100.00").await;
    let room = app.add_room(&owner, room_type_id, "101").await;
    checked_out_stay(&app, &owner, &guest, room, "USD").await;

    let (status, body) = app
        .get(
            &format!(
                "/api/v1/hotels/{}/settlement?startDate=2001-01-01&endDate=2001-01-31",
                hotel_id
            ),
            Some(&owner),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"]["totals"].as_array().unwrap().is_empty());
    assert!(body["result"]["reservations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn reversed_period_should_be_bad_request() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;

    let (status, _) = app
        .get(
            &format!(
                "/api/v1/hotels/{}/settlement?startDate=2030-02-01&endDate=2030-01-01",
                hotel_id
            ),
            Some(&owner),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_owner_should_not_see_settlement() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let rival = app.register("owner02", "OWNER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;

    let (status, _) = app
        .get(
            &format!(
                "/api/v1/hotels/{}/settlement?startDate=2030-01-01&endDate=2030-01-31",
                hotel_id
            ),
            Some(&rival),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
