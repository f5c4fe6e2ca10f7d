//! `SeaORM` Entity for the notes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub member_id: Option<Uuid>,
    pub travel_record_id: Option<Uuid>,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub author: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id"
    )]
    Members,
    #[sea_orm(
        belongs_to = "super::travel_records::Entity",
        from = "Column::TravelRecordId",
        to = "super::travel_records::Column::Id"
    )]
    TravelRecords,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::travel_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
