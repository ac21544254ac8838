use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub room_type_id: i64,
    pub room_number: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room_type::Entity",
        from = "Column::RoomTypeId",
        to = "super::room_type::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RoomType,
    #[sea_orm(has_many = "crate::domain::reservation::entity::reservation_room::Entity")]
    ReservationRoom,
}

impl Related<super::room_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomType.def()
    }
}

impl Related<crate::domain::reservation::entity::reservation_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
