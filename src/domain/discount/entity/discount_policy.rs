use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 할인 방식
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// 소계에 대한 비율 할인
    #[sea_orm(string_value = "PERCENTAGE")]
    Percentage,
    /// 1박당 고정 금액 할인
    #[sea_orm(string_value = "FIXED_AMOUNT")]
    FixedAmount,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discount_policy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    /// 적용에 필요한 최소 숙박일 수
    pub min_days: i32,
    pub discount_type: DiscountType,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub discount_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub discount_amount: Option<Decimal>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::hotel::entity::hotel::Entity",
        from = "Column::HotelId",
        to = "crate::domain::hotel::entity::hotel::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Hotel,
}

impl Related<crate::domain::hotel::entity::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
