use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, SuccessLoginResponse,
};
use super::service::AuthService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::cookie::create_access_token_cookie;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 회원가입 API
///
/// 가입 직후 로그인 처리되어 토큰을 반환합니다. ADMIN 권한으로는 가입할 수 없습니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "회원가입 성공", body = SuccessLoginResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "관리자 가입 시도", body = ErrorResponse),
        (status = 409, description = "중복된 아이디", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let result = AuthService::register(&state, req).await?;
    let cookie = create_access_token_cookie(&result.token, state.config.jwt_expiration)?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(BaseResponse::success_with_message(result, "회원가입이 완료되었습니다.")),
    ))
}

/// 로그인 API
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = SuccessLoginResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "아이디 또는 비밀번호 불일치", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let result = AuthService::login(&state, req).await?;
    let cookie = create_access_token_cookie(&result.token, state.config.jwt_expiration)?;

    Ok(([(SET_COOKIE, cookie)], Json(BaseResponse::success(result))))
}

/// 비밀번호 변경 API
#[utoipa::path(
    put,
    path = "/api/v1/auth/password",
    request_body = ChangePasswordRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "비밀번호 변경 성공"),
        (status = 401, description = "인증 실패 또는 현재 비밀번호 불일치", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<ChangePasswordRequest>, AppError>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    req.validate()?;

    AuthService::change_password(&state, user.user_id()?, req).await?;

    Ok(Json(BaseResponse::ok("비밀번호가 변경되었습니다.")))
}
