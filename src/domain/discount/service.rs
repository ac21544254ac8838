use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::dto::{CreateDiscountRequest, DiscountPolicyResponse};
use super::entity::discount_policy::{self, DiscountType};
use crate::domain::hotel::service::ensure_hotel_manager;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;

pub struct DiscountService;

impl DiscountService {
    pub async fn list(
        state: &AppState,
        user: &AuthUser,
        hotel_id: i64,
    ) -> Result<Vec<DiscountPolicyResponse>, AppError> {
        ensure_hotel_manager(&state.db, user, hotel_id).await?;

        let policies = discount_policy::Entity::find()
            .filter(discount_policy::Column::HotelId.eq(hotel_id))
            .order_by_asc(discount_policy::Column::Id)
            .all(&state.db)
            .await?;

        Ok(policies.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        state: &AppState,
        user: &AuthUser,
        hotel_id: i64,
        req: CreateDiscountRequest,
    ) -> Result<DiscountPolicyResponse, AppError> {
        ensure_hotel_manager(&state.db, user, hotel_id).await?;
        req.check_values()?;

        // 할인 방식과 무관한 값은 저장하지 않는다
        let (rate, amount) = match req.discount_type {
            DiscountType::Percentage => (req.discount_rate, None),
            DiscountType::FixedAmount => (None, req.discount_amount),
        };

        let created = discount_policy::ActiveModel {
            hotel_id: Set(hotel_id),
            name: Set(req.name),
            min_days: Set(req.min_days),
            discount_type: Set(req.discount_type),
            discount_rate: Set(rate),
            discount_amount: Set(amount),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(hotel_id, policy_id = created.id, "Discount policy created");

        Ok(created.into())
    }

    pub async fn delete(state: &AppState, user: &AuthUser, policy_id: i64) -> Result<(), AppError> {
        let policy = discount_policy::Entity::find_by_id(policy_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 할인 정책입니다."))?;

        ensure_hotel_manager(&state.db, user, policy.hotel_id).await?;

        policy.delete(&state.db).await?;
        info!(policy_id, "Discount policy deleted");

        Ok(())
    }
}
