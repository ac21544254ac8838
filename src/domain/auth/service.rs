use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use tracing::{info, warn};

use super::dto::{ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest};
use crate::config::AppConfig;
use crate::domain::user::entity::user::{self, Role};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::encode_token;
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "아이디 또는 비밀번호가 올바르지 않습니다.";
const DUPLICATE_USERNAME: &str = "이미 사용 중인 아이디입니다.";

pub struct AuthService;

impl AuthService {
    /// 회원가입 후 곧바로 로그인 처리합니다.
    pub async fn register(
        state: &AppState,
        req: RegisterRequest,
    ) -> Result<LoginResponse, AppError> {
        let role = req.role.unwrap_or(Role::User);
        if role == Role::Admin {
            return Err(AppError::forbidden(
                "관리자 계정은 직접 가입할 수 없습니다.",
            ));
        }

        let exists = user::Entity::find()
            .filter(user::Column::Username.eq(req.username.as_str()))
            .one(&state.db)
            .await?
            .is_some();
        if exists {
            return Err(AppError::conflict(DUPLICATE_USERNAME));
        }

        let password = req.password.clone();
        let hashed = hash_password(req.password, state.config.bcrypt_cost).await?;
        let now = Utc::now().naive_utc();

        let created = user::ActiveModel {
            username: Set(req.username.clone()),
            password: Set(hashed),
            full_name: Set(req.full_name),
            email: Set(req.email),
            role: Set(role),
            language: Set(req.language),
            use_yn: Set("Y".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        // 동시 가입으로 사전 확인을 통과한 경우 유니크 인덱스에서 걸러짐
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(DUPLICATE_USERNAME),
            _ => e.into(),
        })?;

        info!(user_id = created.id, username = %created.username, role = ?created.role, "User registered");

        Self::login(
            state,
            LoginRequest {
                username: req.username,
                password,
            },
        )
        .await
    }

    /// 아이디/비밀번호 로그인
    ///
    /// 존재하지 않는 사용자, 비활성 계정, 비밀번호 불일치는 같은 메시지로 응답합니다.
    pub async fn login(state: &AppState, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let found = user::Entity::find()
            .filter(user::Column::Username.eq(req.username.as_str()))
            .one(&state.db)
            .await?;

        let Some(found) = found.filter(|u| u.is_active()) else {
            warn!(username = %req.username, "Login rejected: unknown or disabled user");
            return Err(AppError::InvalidCredentials(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(req.password, found.password.clone()).await? {
            warn!(username = %req.username, "Login rejected: password mismatch");
            return Err(AppError::InvalidCredentials(INVALID_CREDENTIALS.to_string()));
        }

        let token = encode_token(
            found.id,
            &found.username,
            found.role,
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        info!(user_id = found.id, "User logged in");

        Ok(LoginResponse {
            token,
            user_id: found.id,
            username: found.username,
            full_name: found.full_name,
            role: found.role,
            language: found.language,
        })
    }

    /// 현재 비밀번호 확인 후 새 비밀번호로 변경
    pub async fn change_password(
        state: &AppState,
        user_id: i64,
        req: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let found = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 사용자입니다."))?;

        if !verify_password(req.current_password, found.password.clone()).await? {
            return Err(AppError::InvalidCredentials(
                "현재 비밀번호가 올바르지 않습니다.".to_string(),
            ));
        }

        let hashed = hash_password(req.new_password, state.config.bcrypt_cost).await?;

        let mut active: user::ActiveModel = found.into();
        active.password = Set(hashed);
        active.updated_at = Set(Utc::now().naive_utc());
        active.update(&state.db).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// 설정된 관리자 계정이 없으면 생성합니다.
    pub async fn ensure_admin_account(
        db: &DatabaseConnection,
        config: &AppConfig,
    ) -> Result<(), AppError> {
        let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password)
        else {
            return Ok(());
        };

        let exists = user::Entity::find()
            .filter(user::Column::Username.eq(username.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            return Ok(());
        }

        let hashed = hash_password(password.clone(), config.bcrypt_cost).await?;
        let now = Utc::now().naive_utc();

        user::ActiveModel {
            username: Set(username.clone()),
            password: Set(hashed),
            full_name: Set("Administrator".to_string()),
            email: Set(None),
            role: Set(Role::Admin),
            language: Set(None),
            use_yn: Set("Y".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(username = %username, "Bootstrap admin account created");
        Ok(())
    }
}
