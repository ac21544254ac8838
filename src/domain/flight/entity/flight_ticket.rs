use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "flight_ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub airline_id: i64,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: Time,
    pub arrival_time: Time,
    pub use_yn: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::airline::Entity",
        from = "Column::AirlineId",
        to = "super::airline::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Airline,
}

impl Related<super::airline::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Airline.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
