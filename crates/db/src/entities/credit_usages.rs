//! `SeaORM` Entity for the credit_usages table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "credit_usages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub grant_id: Uuid,
    pub travel_record_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credit_grants::Entity",
        from = "Column::GrantId",
        to = "super::credit_grants::Column::Id"
    )]
    CreditGrants,
    #[sea_orm(
        belongs_to = "super::travel_records::Entity",
        from = "Column::TravelRecordId",
        to = "super::travel_records::Column::Id"
    )]
    TravelRecords,
}

impl Related<super::credit_grants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditGrants.def()
    }
}

impl Related<super::travel_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
