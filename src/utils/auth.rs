use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;

use crate::domain::user::entity::user::Role;
use crate::state::AppState;
use crate::utils::cookie::ACCESS_TOKEN_COOKIE;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_access_token, Claims};

/// 인증된 사용자 정보를 담는 Extractor
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// JWT Claims에서 사용자 ID를 추출합니다.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("유효하지 않은 사용자 ID입니다.".to_string()))
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }

    /// 관리자 권한 확인
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("관리자만 접근할 수 있습니다.".to_string()))
        }
    }

    /// 호텔 운영자 또는 관리자 권한 확인
    pub fn require_owner_or_admin(&self) -> Result<(), AppError> {
        match self.0.role {
            Role::Owner | Role::Admin => Ok(()),
            Role::User => Err(AppError::Forbidden(
                "호텔 운영자 또는 관리자만 접근할 수 있습니다.".to_string(),
            )),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)?
            .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))?;

        // 토큰 검증 및 디코딩 (access token만 허용)
        let claims = decode_access_token(&token, &state.config.jwt_secret)?;

        Ok(AuthUser(claims))
    }
}

/// 로그인하지 않은 사용자도 허용하는 Extractor
///
/// 토큰이 없거나 유효하지 않으면 `None`이 됩니다.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = extract_token(&parts.headers)
            .ok()
            .flatten()
            .and_then(|token| decode_access_token(&token, &state.config.jwt_secret).ok())
            .map(AuthUser);

        Ok(OptionalAuthUser(user))
    }
}

/// Authorization 헤더, 없으면 access_token 쿠키에서 토큰 추출
pub fn extract_token(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    if let Some(auth_header) = headers.get(AUTHORIZATION) {
        let auth_header_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("잘못된 헤더 형식입니다.".to_string()))?;

        let token = auth_header_str.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("토큰 형식이 올바르지 않습니다.".to_string())
        })?;

        return Ok(Some(token.to_string()));
    }

    let jar = CookieJar::from_headers(headers);
    Ok(jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    #[test]
    fn should_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));

        assert_eq!(extract_token(&headers).unwrap(), Some("abc.def".to_string()));
    }

    #[test]
    fn should_reject_non_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn should_fall_back_to_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=from-cookie"),
        );

        assert_eq!(
            extract_token(&headers).unwrap(),
            Some("from-cookie".to_string())
        );
    }

    #[test]
    fn should_return_none_without_credentials() {
        assert_eq!(extract_token(&HeaderMap::new()).unwrap(), None);
    }
}
