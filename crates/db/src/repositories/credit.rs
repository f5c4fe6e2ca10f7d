//! Credit ledger repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{credit_grants, credit_usages, travel_records};
use fieldops_core::credit::{
    CreditError, CreditGrant, CreditRepository as CreditRepoTrait, CreditUsage, NewCreditUsage,
};
use fieldops_shared::types::{
    CreditGrantId, CreditUsageId, MemberId, ProviderId, TravelRecordId,
};

/// Input for recording a grant when a provider issues a credit.
#[derive(Debug, Clone)]
pub struct NewCreditGrant {
    /// Member who owns the credit.
    pub member_id: Uuid,
    /// Provider the credit was issued against.
    pub provider_id: Uuid,
    /// Grant amount.
    pub amount: Decimal,
    /// Why the credit was issued.
    pub reason: Option<String>,
    /// Date the provider issued the credit.
    pub issued_on: NaiveDate,
    /// Display name of the staff member entering the grant.
    pub created_by: String,
}

/// Credit ledger repository implementation.
#[derive(Debug, Clone)]
pub struct CreditRepository {
    db: DatabaseConnection,
}

impl CreditRepository {
    /// Create a new credit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a grant.
    ///
    /// # Errors
    ///
    /// Returns a repository error if the insert fails.
    pub async fn create_grant(&self, input: NewCreditGrant) -> Result<CreditGrant, CreditError> {
        let active_model = credit_grants::ActiveModel {
            id: Set(Uuid::now_v7()),
            member_id: Set(input.member_id),
            provider_id: Set(input.provider_id),
            amount: Set(input.amount),
            reason: Set(input.reason),
            issued_on: Set(input.issued_on),
            created_by: Set(input.created_by),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| CreditError::repository(e.to_string()))?;

        Ok(grant_to_domain(model))
    }
}

impl CreditRepoTrait for CreditRepository {
    async fn grants_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<CreditGrant>, CreditError> {
        let models = credit_grants::Entity::find()
            .filter(credit_grants::Column::MemberId.eq(member_id.into_inner()))
            .order_by_asc(credit_grants::Column::IssuedOn)
            .all(&self.db)
            .await
            .map_err(|e| CreditError::repository(e.to_string()))?;

        Ok(models.into_iter().map(grant_to_domain).collect())
    }

    async fn usages_for_record(
        &self,
        record_id: TravelRecordId,
    ) -> Result<Vec<CreditUsage>, CreditError> {
        let models = credit_usages::Entity::find()
            .filter(credit_usages::Column::TravelRecordId.eq(record_id.into_inner()))
            .order_by_desc(credit_usages::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CreditError::repository(e.to_string()))?;

        Ok(models.into_iter().map(usage_to_domain).collect())
    }

    async fn record_provider(
        &self,
        record_id: TravelRecordId,
    ) -> Result<Option<ProviderId>, CreditError> {
        let record = travel_records::Entity::find_by_id(record_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| CreditError::repository(e.to_string()))?;

        Ok(record.map(|r| ProviderId::from_uuid(r.provider_id)))
    }

    async fn grant_exists(
        &self,
        grant_id: CreditGrantId,
        member_id: MemberId,
    ) -> Result<bool, CreditError> {
        let count: u64 = credit_grants::Entity::find_by_id(grant_id.into_inner())
            .filter(credit_grants::Column::MemberId.eq(member_id.into_inner()))
            .count(&self.db)
            .await
            .map_err(|e| CreditError::repository(e.to_string()))?;

        Ok(count > 0)
    }

    async fn insert_usage(&self, usage: NewCreditUsage) -> Result<CreditUsage, CreditError> {
        let active_model = credit_usages::ActiveModel {
            id: Set(usage.id.into_inner()),
            grant_id: Set(usage.grant_id.into_inner()),
            travel_record_id: Set(usage.travel_record_id.into_inner()),
            amount: Set(usage.amount),
            created_by: Set(usage.created_by),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| CreditError::repository(e.to_string()))?;

        Ok(usage_to_domain(model))
    }
}

/// Convert a grant row to the domain model.
pub fn grant_to_domain(model: credit_grants::Model) -> CreditGrant {
    CreditGrant {
        id: CreditGrantId::from_uuid(model.id),
        member_id: MemberId::from_uuid(model.member_id),
        provider_id: ProviderId::from_uuid(model.provider_id),
        amount: model.amount,
        reason: model.reason,
        issued_on: model.issued_on,
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}

/// Convert a usage row to the domain model.
pub fn usage_to_domain(model: credit_usages::Model) -> CreditUsage {
    CreditUsage {
        id: CreditUsageId::from_uuid(model.id),
        grant_id: CreditGrantId::from_uuid(model.grant_id),
        travel_record_id: TravelRecordId::from_uuid(model.travel_record_id),
        amount: model.amount,
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}
