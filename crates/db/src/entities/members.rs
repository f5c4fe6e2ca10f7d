//! `SeaORM` Entity for the members table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::travel_records::Entity")]
    TravelRecords,
    #[sea_orm(has_many = "super::credit_grants::Entity")]
    CreditGrants,
    #[sea_orm(has_many = "super::approval_records::Entity")]
    ApprovalRecords,
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

impl Related<super::approval_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovalRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
