//! `SeaORM` Entity for the travel_records table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "travel_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub confirmation_code: String,
    /// `flight`, `hotel`, or `rental`.
    pub kind: String,
    pub member_id: Uuid,
    pub project_id: Uuid,
    pub provider_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_cost: Decimal,
    pub travel_date: Date,
    /// Free-text address, geocoded for map plotting (hotels).
    pub address: Option<String>,
    pub archived: bool,
    pub verified: bool,
    pub canceled: bool,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Projects,
    #[sea_orm(
        belongs_to = "super::providers::Entity",
        from = "Column::ProviderId",
        to = "super::providers::Column::Id"
    )]
    Providers,
    #[sea_orm(has_many = "super::credit_usages::Entity")]
    CreditUsages,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::providers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Providers.def()
    }
}

impl Related<super::credit_usages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditUsages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
