use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::user::entity::user::Role;

/// 아이디 유효성 검증 (영문, 숫자, `_`, `.` 만 허용)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_invalid_chars"))
    }
}

/// 회원가입 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// 로그인 아이디 (3~50자)
    #[validate(
        length(min = 3, max = 50, message = "아이디는 3~50자 이내로 입력해야 합니다"),
        custom(
            function = "validate_username",
            message = "아이디는 영문, 숫자, _, . 만 사용할 수 있습니다"
        )
    )]
    pub username: String,

    #[validate(length(min = 4, max = 100, message = "비밀번호는 4자 이상이어야 합니다"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "이름은 1~50자 이내로 입력해야 합니다"))]
    pub full_name: String,

    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: Option<String>,

    /// 가입 권한 (USER 또는 OWNER, 기본값 USER)
    pub role: Option<Role>,

    /// 선호 언어 (예: ko, en)
    #[validate(length(max = 10, message = "언어 코드는 10자 이내여야 합니다"))]
    pub language: Option<String>,
}

/// 로그인 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "아이디는 필수입니다"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,
}

/// 로그인 응답 DTO
///
/// 토큰은 `access_token` 쿠키로도 전달됩니다.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub language: Option<String>,
}

/// 비밀번호 변경 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "현재 비밀번호는 필수입니다"))]
    pub current_password: String,

    #[validate(length(min = 4, max = 100, message = "새 비밀번호는 4자 이상이어야 합니다"))]
    pub new_password: String,
}

/// 로그인 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessLoginResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: LoginResponse,
}
