use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::discount_policy::{self, DiscountType};
use crate::utils::error::AppError;

/// 할인 정책 등록 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscountRequest {
    #[validate(length(min = 1, max = 100, message = "정책명은 1~100자 이내로 입력해야 합니다"))]
    pub name: String,

    /// 최소 숙박일 수
    #[validate(range(min = 0, max = 365, message = "최소 숙박일은 0~365일이어야 합니다"))]
    pub min_days: i32,

    pub discount_type: DiscountType,

    /// PERCENTAGE일 때 할인율 (0 초과 100 이하)
    #[schema(value_type = Option<String>, example = "10")]
    pub discount_rate: Option<Decimal>,

    /// FIXED_AMOUNT일 때 1박당 할인 금액
    #[schema(value_type = Option<String>, example = "10.00")]
    pub discount_amount: Option<Decimal>,
}

impl CreateDiscountRequest {
    /// 할인 방식에 맞는 값이 있는지 검증합니다.
    pub fn check_values(&self) -> Result<(), AppError> {
        match self.discount_type {
            DiscountType::Percentage => match self.discount_rate {
                Some(rate) if rate > Decimal::ZERO && rate <= Decimal::ONE_HUNDRED => Ok(()),
                _ => Err(AppError::validation_error(
                    "할인율은 0 초과 100 이하여야 합니다.",
                )),
            },
            DiscountType::FixedAmount => match self.discount_amount {
                Some(amount) if amount > Decimal::ZERO => Ok(()),
                _ => Err(AppError::validation_error(
                    "할인 금액은 0보다 커야 합니다.",
                )),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPolicyResponse {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub min_days: i32,
    pub discount_type: DiscountType,
    #[schema(value_type = Option<String>)]
    pub discount_rate: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub discount_amount: Option<Decimal>,
    pub created_at: NaiveDateTime,
}

impl From<discount_policy::Model> for DiscountPolicyResponse {
    fn from(model: discount_policy::Model) -> Self {
        Self {
            id: model.id,
            hotel_id: model.hotel_id,
            name: model.name,
            min_days: model.min_days,
            discount_type: model.discount_type,
            discount_rate: model.discount_rate,
            discount_amount: model.discount_amount,
            created_at: model.created_at,
        }
    }
}
