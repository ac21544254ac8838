pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

pub use state::AppState;

use domain::{
    access_log, auth, blocked_ip, board, discount, flight, health, hotel, reservation, settlement,
    user,
};
use global::middleware::{access_log_middleware, ip_block_middleware, request_id_middleware};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handler::health_check,
        auth::handler::register,
        auth::handler::login,
        auth::handler::change_password,
        user::handler::list_users,
        user::handler::get_user,
        user::handler::update_user,
        hotel::handler::create_hotel,
        hotel::handler::my_hotels,
        hotel::handler::update_hotel,
        hotel::handler::add_room_type,
        hotel::handler::update_room_type,
        hotel::handler::add_room,
        hotel::handler::update_room,
        reservation::handler::search_available,
        reservation::handler::create_reservation,
        reservation::handler::my_reservations,
        reservation::handler::cancel_reservation,
        reservation::handler::confirm_reservation,
        reservation::handler::check_in,
        reservation::handler::check_out,
        reservation::handler::manager_reservations,
        settlement::handler::get_settlement,
        discount::handler::list_discounts,
        discount::handler::create_discount,
        discount::handler::delete_discount,
        board::handler::list_boards,
        board::handler::get_board,
        board::handler::create_board,
        board::handler::update_board,
        board::handler::delete_board,
        board::handler::toggle_like,
        board::handler::create_comment,
        board::handler::update_comment,
        board::handler::delete_comment,
        flight::handler::list_airlines,
        flight::handler::create_airline,
        flight::handler::update_airline,
        flight::handler::delete_airline,
        flight::handler::list_tickets_by_airline,
        flight::handler::list_tickets,
        flight::handler::create_ticket,
        flight::handler::update_ticket,
        flight::handler::delete_ticket,
        blocked_ip::handler::list_blocked_ips,
        blocked_ip::handler::add_blocked_ip,
        blocked_ip::handler::update_blocked_ip,
        blocked_ip::handler::delete_blocked_ip,
        access_log::handler::list_access_logs,
    ),
    components(
        schemas(
            health::dto::HealthStatus,
            health::dto::HealthState,
            health::dto::HealthChecks,
            health::dto::CheckResult,
            user::entity::user::Role,
            auth::dto::RegisterRequest,
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::SuccessLoginResponse,
            auth::dto::ChangePasswordRequest,
            user::dto::UserResponse,
            user::dto::UpdateUserRequest,
            hotel::dto::HotelRequest,
            hotel::dto::HotelResponse,
            hotel::dto::RoomTypeRequest,
            hotel::dto::RoomTypeResponse,
            hotel::dto::RoomRequest,
            hotel::dto::RoomResponse,
            reservation::entity::reservation::ReservationStatus,
            reservation::entity::reservation::Currency,
            reservation::dto::AvailableRoomResponse,
            reservation::dto::CreateReservationRequest,
            reservation::dto::ReservedRoomItem,
            reservation::dto::ReservationResponse,
            settlement::dto::CurrencyTotal,
            settlement::dto::SettlementResponse,
            discount::entity::discount_policy::DiscountType,
            discount::dto::CreateDiscountRequest,
            discount::dto::DiscountPolicyResponse,
            board::entity::board::BoardCategory,
            board::dto::SearchType,
            board::dto::BoardRequest,
            board::dto::BoardSummary,
            board::dto::BoardListResponse,
            board::dto::BoardDetailResponse,
            board::dto::CommentRequest,
            board::dto::CommentUpdateRequest,
            board::dto::CommentResponse,
            board::dto::LikeResponse,
            flight::dto::AirlineRequest,
            flight::dto::AirlineResponse,
            flight::dto::FlightTicketRequest,
            flight::dto::FlightTicketResponse,
            blocked_ip::dto::BlockedIpRequest,
            blocked_ip::dto::BlockedIpResponse,
            blocked_ip::dto::BlockedIpPage,
            access_log::dto::AccessLogResponse,
            access_log::dto::AccessLogPage,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "헬스체크 API"),
        (name = "Auth", description = "인증 API"),
        (name = "User", description = "사용자 관리 API (관리자)"),
        (name = "Hotel", description = "호텔/객실 관리 API"),
        (name = "Reservation", description = "예약 API"),
        (name = "Settlement", description = "정산 API"),
        (name = "Discount", description = "할인 정책 API"),
        (name = "Board", description = "게시판 API"),
        (name = "Flight", description = "항공편 정보 API"),
        (name = "Security", description = "IP 차단 및 접속 로그 API (관리자)")
    )
)]
pub struct ApiDoc;

/// `bearer_auth` 보안 스키마 등록
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // auth
        .route("/api/v1/auth/register", post(auth::handler::register))
        .route("/api/v1/auth/login", post(auth::handler::login))
        .route("/api/v1/auth/password", put(auth::handler::change_password))
        // admin
        .route("/api/v1/admin/users", get(user::handler::list_users))
        .route(
            "/api/v1/admin/users/:user_id",
            get(user::handler::get_user).put(user::handler::update_user),
        )
        .route(
            "/api/v1/admin/blocked-ips",
            get(blocked_ip::handler::list_blocked_ips).post(blocked_ip::handler::add_blocked_ip),
        )
        .route(
            "/api/v1/admin/blocked-ips/:id",
            put(blocked_ip::handler::update_blocked_ip)
                .delete(blocked_ip::handler::delete_blocked_ip),
        )
        .route(
            "/api/v1/admin/access-logs",
            get(access_log::handler::list_access_logs),
        )
        // hotel
        .route("/api/v1/hotels", post(hotel::handler::create_hotel))
        .route("/api/v1/hotels/mine", get(hotel::handler::my_hotels))
        .route("/api/v1/hotels/:hotel_id", put(hotel::handler::update_hotel))
        .route(
            "/api/v1/hotels/:hotel_id/room-types",
            post(hotel::handler::add_room_type),
        )
        .route(
            "/api/v1/hotels/:hotel_id/reservations",
            get(reservation::handler::manager_reservations),
        )
        .route(
            "/api/v1/hotels/:hotel_id/settlement",
            get(settlement::handler::get_settlement),
        )
        .route(
            "/api/v1/hotels/:hotel_id/discounts",
            get(discount::handler::list_discounts).post(discount::handler::create_discount),
        )
        .route(
            "/api/v1/room-types/:room_type_id",
            put(hotel::handler::update_room_type),
        )
        .route(
            "/api/v1/room-types/:room_type_id/rooms",
            post(hotel::handler::add_room),
        )
        .route("/api/v1/rooms/:room_id", put(hotel::handler::update_room))
        .route(
            "/api/v1/discounts/:policy_id",
            delete(discount::handler::delete_discount),
        )
        // reservation
        .route(
            "/api/v1/reservations",
            post(reservation::handler::create_reservation),
        )
        .route(
            "/api/v1/reservations/search",
            get(reservation::handler::search_available),
        )
        .route(
            "/api/v1/reservations/me",
            get(reservation::handler::my_reservations),
        )
        .route(
            "/api/v1/reservations/:reservation_id/cancel",
            post(reservation::handler::cancel_reservation),
        )
        .route(
            "/api/v1/reservations/:reservation_id/confirm",
            post(reservation::handler::confirm_reservation),
        )
        .route(
            "/api/v1/reservations/:reservation_id/check-in",
            post(reservation::handler::check_in),
        )
        .route(
            "/api/v1/reservations/:reservation_id/check-out",
            post(reservation::handler::check_out),
        )
        // board
        .route(
            "/api/v1/boards",
            get(board::handler::list_boards).post(board::handler::create_board),
        )
        .route(
            "/api/v1/boards/:board_id",
            get(board::handler::get_board)
                .put(board::handler::update_board)
                .delete(board::handler::delete_board),
        )
        .route(
            "/api/v1/boards/:board_id/like",
            post(board::handler::toggle_like),
        )
        .route(
            "/api/v1/boards/:board_id/comments",
            post(board::handler::create_comment),
        )
        .route(
            "/api/v1/comments/:comment_id",
            put(board::handler::update_comment).delete(board::handler::delete_comment),
        )
        // flight
        .route(
            "/api/v1/airlines",
            get(flight::handler::list_airlines).post(flight::handler::create_airline),
        )
        .route(
            "/api/v1/airlines/:airline_id",
            put(flight::handler::update_airline).delete(flight::handler::delete_airline),
        )
        .route(
            "/api/v1/airlines/:airline_id/tickets",
            get(flight::handler::list_tickets_by_airline),
        )
        .route(
            "/api/v1/flight-tickets",
            get(flight::handler::list_tickets).post(flight::handler::create_ticket),
        )
        .route(
            "/api/v1/flight-tickets/:ticket_id",
            put(flight::handler::update_ticket).delete(flight::handler::delete_ticket),
        )
}

/// 전체 라우터 구성
///
/// 요청은 request id → 접속 로그 → IP 차단 → 핸들러 순으로 처리되며, 차단된 요청도 기록됩니다.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .merge(api_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ip_block_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
