//! 호텔/객실 관리 API 통합 테스트
//!
//! 테스트 대상:
//! - POST /api/v1/hotels, GET /api/v1/hotels/mine, PUT /api/v1/hotels/{hotelId}
//! - POST /api/v1/hotels/{hotelId}/room-types, PUT /api/v1/room-types/{roomTypeId}
//! - POST /api/v1/room-types/{roomTypeId}/rooms, PUT /api/v1/rooms/{roomId}

mod common;

use axum::http::StatusCode;
use common::{decimal, TestApp};
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn guest_should_not_create_hotel() {
    let app = TestApp::new().await;
    let guest = app.register("guest01", "USER").await;

    let (status, body) = app
        .post(
            "/api/v1/hotels",
            Some(&guest),
            json!({ "name": "Nope", "address": "Seoul" }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "COMMON403");
}

#[tokio::test]
async fn my_hotels_should_return_nested_inventory() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;
    let room_type_id = app.add_room_type(&owner, hotel_id, 2, "100.00").await;
    app.add_room(&owner, room_type_id, "101").await;
    app.add_room(&owner, room_type_id, "102").await;

    let (status, body) = app.get("/api/v1/hotels/mine", Some(&owner)).await;

    assert_eq!(status, StatusCode::OK);
    let hotels = body["result"].as_array().unwrap();
    assert_eq!(hotels.len(), 1);
    let room_type = &hotels[0]["roomTypes"][0];
    assert_eq!(room_type["capacity"], 2);
    assert_eq!(decimal(&room_type["basePrice"]), Decimal::from(100));
    assert_eq!(room_type["rooms"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn other_owner_should_not_modify_hotel() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let rival = app.register("owner02", "OWNER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;

    let (status, _) = app
        .put(
            &format!("/api/v1/hotels/{}", hotel_id),
            Some(&rival),
            json!({ "name": "Stolen", "address": "Cebu" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            &format!("/api/v1/hotels/{}/room-types", hotel_id),
            Some(&rival),
            json!({ "name": "Suite", "capacity": 2, "basePrice": "50" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_should_manage_any_hotel() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let admin = app.admin_token().await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/hotels/{}", hotel_id),
            Some(&admin),
            json!({ "name": "Sunrise Renewed", "address": "Makati", "bankName": "BDO" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["name"], "Sunrise Renewed");
    assert_eq!(body["result"]["bankName"], "BDO");
}

#[tokio::test]
async fn room_type_without_any_price_should_be_rejected() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;

    let (status, _) = app
        .post(
            &format!("/api/v1/hotels/{}/room-types", hotel_id),
            Some(&owner),
            json!({ "name": "Free", "capacity": 2 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn room_type_price_above_limit_should_be_rejected() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;

    let (status, _) = app
        .post(
            &format!("/api/v1/hotels/{}/room-types", hotel_id),
            Some(&owner),
            json!({ "name": "Palace", "capacity": 2, "priceKrw": "9999999999999" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_room_type_should_change_prices() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;
    let room_type_id = app.add_room_type(&owner, hotel_id, 2, "100.00").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/room-types/{}", room_type_id),
            Some(&owner),
            json!({ "name": "Deluxe", "capacity": 3, "priceUsd": "120.50", "pricePhp": "6800" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["capacity"], 3);
    assert_eq!(
        decimal(&body["result"]["basePrice"]),
        "120.50".parse::<Decimal>().unwrap()
    );
    assert_eq!(
        decimal(&body["result"]["pricePhp"]),
        Decimal::from(6800)
    );
}

#[tokio::test]
async fn duplicate_room_number_in_same_type_should_conflict() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;
    let hotel_id = app.create_hotel(&owner, "Sunrise").await;
    let room_type_id = app.add_room_type(&owner, hotel_id, 2, "100.00").await;
    let first = app.add_room(&owner, room_type_id, "101").await;
    let second = app.add_room(&owner, room_type_id, "102").await;

    let (status, _) = app
        .post(
            &format!("/api/v1/room-types/{}/rooms", room_type_id),
            Some(&owner),
            json!({ "roomNumber": "101" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .put(
            &format!("/api/v1/rooms/{}", second),
            Some(&owner),
            json!({ "roomNumber": "101" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 자기 자신의 번호로 수정은 허용
    let (status, body) = app
        .put(
            &format!("/api/v1/rooms/{}", first),
            Some(&owner),
            json!({ "roomNumber": "101" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["roomNumber"], "101");
}

#[tokio::test]
async fn unknown_hotel_should_be_not_found() {
    let app = TestApp::new().await;
    let owner = app.register("owner01", "OWNER").await;

    let (status, body) = app
        .put(
            "/api/v1/hotels/9999",
            Some(&owner),
            json!({ "name": "Ghost", "address": "Nowhere" }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "COMMON404");
}
