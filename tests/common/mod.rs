//! 통합 테스트 공용 헬퍼
//!
//! 인메모리 SQLite에 엔티티로부터 스키마를 만들고 실제 라우터를 구성합니다.
#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use hotel_server::config::{create_tables, AppConfig};
use hotel_server::domain::auth::service::AuthService;
use hotel_server::{create_app, AppState};
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin1234";

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expiration: 3600,
        bcrypt_cost: 4,
        access_log_excluded_ip: Some("10.10.10.10".to_string()),
        admin_username: Some(ADMIN_USERNAME.to_string()),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = test_config();

        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);
        let db = Database::connect(options).await.expect("sqlite connect");

        create_tables(&db).await.expect("create tables");
        AuthService::ensure_admin_account(&db, &config)
            .await
            .expect("bootstrap admin");

        let state = AppState::new(db, config);
        Self {
            router: create_app(state.clone()),
            state,
        }
    }

    /// 요청을 보내고 (상태 코드, JSON 본문)을 반환
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send_with_headers(method, uri, token, body, &[]).await
    }

    pub async fn send_with_headers(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// 회원가입 후 토큰 반환
    pub async fn register(&self, username: &str, role: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/auth/register",
                None,
                json!({
                    "username": username,
                    "password": "pass1234",
                    "fullName": format!("{} name", username),
                    "role": role
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);

        body["result"]["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .post(
                "/api/v1/auth/login",
                None,
                json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {}", body);

        body["result"]["token"].as_str().unwrap().to_string()
    }

    /// 호텔 생성 후 호텔 ID 반환
    pub async fn create_hotel(&self, owner_token: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/v1/hotels",
                Some(owner_token),
                json!({ "name": name, "address": "Makati, Manila" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create hotel failed: {}", body);

        body["result"]["id"].as_i64().unwrap()
    }

    /// 객실 타입 생성 후 ID 반환
    pub async fn add_room_type(
        &self,
        owner_token: &str,
        hotel_id: i64,
        capacity: i32,
        price_usd: &str,
    ) -> i64 {
        let (status, body) = self
            .post(
                &format!("/api/v1/hotels/{}/room-types", hotel_id),
                Some(owner_token),
                json!({
                    "name": "Deluxe",
                    "capacity": capacity,
                    "priceUsd": price_usd,
                    "priceKrw": "130000"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "add room type failed: {}", body);

        body["result"]["id"].as_i64().unwrap()
    }

    /// 객실 생성 후 ID 반환
    pub async fn add_room(&self, owner_token: &str, room_type_id: i64, number: &str) -> i64 {
        let (status, body) = self
            .post(
                &format!("/api/v1/room-types/{}/rooms", room_type_id),
                Some(owner_token),
                json!({ "roomNumber": number }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "add room failed: {}", body);

        body["result"]["id"].as_i64().unwrap()
    }
}

/// JSON 문자열/숫자 금액을 Decimal로 변환
pub fn decimal(value: &Value) -> rust_decimal::Decimal {
    match value {
        Value::String(s) => s.parse().unwrap(),
        Value::Number(n) => n.to_string().parse().unwrap(),
        other => panic!("not a decimal: {}", other),
    }
}
