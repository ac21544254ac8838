use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::info;

use super::dto::{UpdateUserRequest, UserResponse};
use super::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct UserService;

impl UserService {
    /// 전체 사용자 목록 (가입 순)
    pub async fn list_users(state: &AppState) -> Result<Vec<UserResponse>, AppError> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&state.db)
            .await?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user(state: &AppState, user_id: i64) -> Result<UserResponse, AppError> {
        Self::find_user(state, user_id).await.map(UserResponse::from)
    }

    /// 사용자 정보 수정 (권한 변경, 계정 비활성화 포함)
    pub async fn update_user(
        state: &AppState,
        user_id: i64,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let existing = Self::find_user(state, user_id).await?;

        let mut active: user::ActiveModel = existing.into();
        if let Some(full_name) = req.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(email) = req.email {
            active.email = Set(Some(email));
        }
        if let Some(role) = req.role {
            active.role = Set(role);
        }
        if let Some(use_yn) = req.use_yn {
            active.use_yn = Set(use_yn);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        info!(user_id = updated.id, role = ?updated.role, use_yn = %updated.use_yn, "User updated by admin");

        Ok(updated.into())
    }

    pub(crate) async fn find_user(state: &AppState, user_id: i64) -> Result<user::Model, AppError> {
        user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 사용자입니다."))
    }
}
