//! 항공편 정보 API 통합 테스트
//!
//! 테스트 대상:
//! - GET/POST /api/v1/airlines, PUT/DELETE /api/v1/airlines/{airlineId}
//! - GET /api/v1/airlines/{airlineId}/tickets
//! - GET/POST /api/v1/flight-tickets, PUT/DELETE /api/v1/flight-tickets/{ticketId}

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

async fn create_airline(app: &TestApp, admin: &str, name: &str, code: &str) -> i64 {
    let (status, body) = app
        .post(
            "/api/v1/airlines",
            Some(admin),
            json!({ "name": name, "code": code }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "create airline failed: {}", body);

    body["result"]["id"].as_i64().unwrap()
}

async fn create_ticket(app: &TestApp, admin: &str, airline_id: i64, departure: &str) -> i64 {
    let (status, body) = app
        .post(
            "/api/v1/flight-tickets",
            Some(admin),
            json!({
                "airlineId": airline_id,
                "departureAirport": "ICN",
                "arrivalAirport": "MNL",
                "departureTime": departure,
                "arrivalTime": "13:05"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "create ticket failed: {}", body);

    body["result"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn only_admin_should_manage_airlines() {
    let app = TestApp::new().await;
    let user = app.register("guest01", "USER").await;

    let (status, _) = app
        .post(
            "/api/v1/airlines",
            Some(&user),
            json!({ "name": "Korean Air", "code": "KE" }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn tickets_should_be_public_and_ordered_by_departure() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let airline_id = create_airline(&app, &admin, "Korean Air", "KE").await;
    create_ticket(&app, &admin, airline_id, "18:40").await;
    create_ticket(&app, &admin, airline_id, "08:15").await;

    let (status, body) = app.get("/api/v1/flight-tickets", None).await;

    assert_eq!(status, StatusCode::OK);
    let tickets = body["result"].as_array().unwrap();
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0]["departureTime"], "08:15:00");
    assert_eq!(tickets[0]["airlineName"], "Korean Air");
}

#[tokio::test]
async fn disabled_ticket_should_be_hidden() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let airline_id = create_airline(&app, &admin, "Korean Air", "KE").await;
    let ticket_id = create_ticket(&app, &admin, airline_id, "08:15").await;
    create_ticket(&app, &admin, airline_id, "18:40").await;

    let (status, _) = app
        .delete(&format!("/api/v1/flight-tickets/{}", ticket_id), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .get(&format!("/api/v1/airlines/{}/tickets", airline_id), None)
        .await;
    let tickets = body["result"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["departureTime"], "18:40:00");
}

#[tokio::test]
async fn update_ticket_should_move_to_other_airline() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let korean_air = create_airline(&app, &admin, "Korean Air", "KE").await;
    let pal = create_airline(&app, &admin, "Philippine Airlines", "PR").await;
    let ticket_id = create_ticket(&app, &admin, korean_air, "08:15").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/flight-tickets/{}", ticket_id),
            Some(&admin),
            json!({
                "airlineId": pal,
                "departureAirport": "MNL",
                "arrivalAirport": "ICN",
                "departureTime": "23:10",
                "arrivalTime": "04:30"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["airlineName"], "Philippine Airlines");
    assert_eq!(body["result"]["departureAirport"], "MNL");
}

#[tokio::test]
async fn airline_with_tickets_should_not_be_deleted() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let airline_id = create_airline(&app, &admin, "Korean Air", "KE").await;
    let empty_airline = create_airline(&app, &admin, "Cebu Pacific", "5J").await;
    create_ticket(&app, &admin, airline_id, "08:15").await;

    let (status, _) = app
        .delete(&format!("/api/v1/airlines/{}", airline_id), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .delete(&format!("/api/v1/airlines/{}", empty_airline), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/v1/airlines", None).await;
    assert_eq!(body["result"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_time_should_be_bad_request() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let airline_id = create_airline(&app, &admin, "Korean Air", "KE").await;

    let (status, body) = app
        .post(
            "/api/v1/flight-tickets",
            Some(&admin),
            json!({
                "airlineId": airline_id,
                "departureAirport": "ICN",
                "arrivalAirport": "MNL",
                "departureTime": "8 o'clock",
                "arrivalTime": "13:05"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["isSuccess"], false);
}
