use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 예약 상태
///
/// PENDING → (CONFIRMED) → CHECKED_IN → CHECKED_OUT, 또는 CANCELLED
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
pub enum ReservationStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "CHECKED_IN")]
    CheckedIn,
    #[sea_orm(string_value = "CHECKED_OUT")]
    CheckedOut,
}

/// 결제 통화
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[sea_orm(string_value = "KRW")]
    Krw,
    #[default]
    #[sea_orm(string_value = "USD")]
    Usd,
    #[sea_orm(string_value = "PHP")]
    Php,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub hotel_id: i64,
    pub check_in: DateTime,
    pub check_out: DateTime,
    pub actual_check_in_time: Option<DateTime>,
    pub actual_check_out_time: Option<DateTime>,
    pub is_late_checkout: bool,
    pub status: ReservationStatus,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub total_price: Decimal,
    pub currency: Currency,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub discount_price: Option<Decimal>,
    pub discount_policy_name: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::UserId",
        to = "crate::domain::user::entity::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(
        belongs_to = "crate::domain::hotel::entity::hotel::Entity",
        from = "Column::HotelId",
        to = "crate::domain::hotel::entity::hotel::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Hotel,
    #[sea_orm(has_many = "super::reservation_room::Entity")]
    ReservationRoom,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::hotel::entity::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl Related<super::reservation_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
