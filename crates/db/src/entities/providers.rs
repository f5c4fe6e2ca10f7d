//! `SeaORM` Entity for the providers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "providers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// `airline`, `hotel_chain`, or `rental_vendor`.
    pub kind: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::travel_records::Entity")]
    TravelRecords,
    #[sea_orm(has_many = "super::credit_grants::Entity")]
    CreditGrants,
}

impl Related<super::travel_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelRecords.def()
    }
}

impl Related<super::credit_grants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditGrants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
