use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "airline")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// IATA 항공사 코드 (예: KE)
    pub code: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::flight_ticket::Entity")]
    FlightTicket,
}

impl Related<super::flight_ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlightTicket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
