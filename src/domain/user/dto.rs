use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::entity::user::{self, Role};

/// Y/N 플래그 검증
pub fn validate_use_yn(value: &str) -> Result<(), ValidationError> {
    match value {
        "Y" | "N" => Ok(()),
        _ => Err(ValidationError::new("use_yn_invalid")),
    }
}

/// 사용자 정보 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub role: Role,
    pub language: Option<String>,
    pub use_yn: String,
    pub created_at: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            full_name: model.full_name,
            email: model.email,
            role: model.role,
            language: model.language,
            use_yn: model.use_yn,
            created_at: model.created_at,
        }
    }
}

/// 관리자용 사용자 정보 수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "이름은 1~50자 이내로 입력해야 합니다"))]
    pub full_name: Option<String>,

    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: Option<String>,

    pub role: Option<Role>,

    /// 계정 사용 여부 (Y/N)
    #[validate(custom(function = "validate_use_yn", message = "useYn은 Y 또는 N이어야 합니다"))]
    pub use_yn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_yn_should_accept_only_y_or_n() {
        assert!(validate_use_yn("Y").is_ok());
        assert!(validate_use_yn("N").is_ok());
        assert!(validate_use_yn("yes").is_err());
    }

    #[test]
    fn update_request_with_invalid_use_yn_should_fail() {
        let req = UpdateUserRequest {
            full_name: None,
            email: None,
            role: None,
            use_yn: Some("X".to_string()),
        };

        assert!(req.validate().is_err());
    }
}
