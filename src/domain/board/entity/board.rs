use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 게시판 카테고리
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
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardCategory {
    #[sea_orm(string_value = "HOTEL_STORY")]
    HotelStory,
    #[sea_orm(string_value = "RESTAURANT_STORY")]
    RestaurantStory,
    #[sea_orm(string_value = "BAR_STORY")]
    BarStory,
    #[sea_orm(string_value = "QNA")]
    Qna,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "board")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub category: BoardCategory,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// 상단 고정 공지 여부
    pub is_notice: bool,
    pub view_count: i32,
    pub like_count: i32,
    pub use_yn: String,
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
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::board_like::Entity")]
    BoardLike,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::board_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoardLike.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
