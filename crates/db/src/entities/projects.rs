//! `SeaORM` Entity for the projects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::travel_records::Entity")]
    TravelRecords,
}

impl Related<super::travel_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
