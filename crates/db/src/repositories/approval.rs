//! Approval record repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::approval_records;
use fieldops_core::approval::{
    ApprovalError, ApprovalRecord, ApprovalRepository as ApprovalRepoTrait, ApprovalStatus,
    ApprovalType, ApprovalUpdate, NewApprovalRecord, PivStatus,
};
use fieldops_shared::types::{ApprovalRecordId, MemberId};

/// Approval record repository implementation.
#[derive(Debug, Clone)]
pub struct ApprovalRepository {
    db: DatabaseConnection,
}

impl ApprovalRepository {
    /// Create a new approval repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ApprovalRepoTrait for ApprovalRepository {
    async fn find_by_id(
        &self,
        id: ApprovalRecordId,
    ) -> Result<Option<ApprovalRecord>, ApprovalError> {
        let model = approval_records::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| ApprovalError::repository(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn find_for_member(
        &self,
        member_id: MemberId,
        approval_type: ApprovalType,
    ) -> Result<Option<ApprovalRecord>, ApprovalError> {
        let model = approval_records::Entity::find()
            .filter(approval_records::Column::MemberId.eq(member_id.into_inner()))
            .filter(approval_records::Column::ApprovalType.eq(approval_type.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| ApprovalError::repository(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn list_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<ApprovalRecord>, ApprovalError> {
        let models = approval_records::Entity::find()
            .filter(approval_records::Column::MemberId.eq(member_id.into_inner()))
            .order_by_asc(approval_records::Column::ApprovalType)
            .all(&self.db)
            .await
            .map_err(|e| ApprovalError::repository(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn insert(&self, record: NewApprovalRecord) -> Result<ApprovalRecord, ApprovalError> {
        let now = Utc::now();
        let active_model = approval_records::ActiveModel {
            id: Set(record.id.into_inner()),
            member_id: Set(record.member_id.into_inner()),
            approval_type: Set(record.approval_type.as_str().to_string()),
            status: Set(record.status.as_str().to_string()),
            piv_status: Set(None),
            document_collected: Set(false),
            submitted_on: Set(record.submitted_on),
            approved_on: Set(None),
            updated_by: Set(record.updated_by),
            last_activity: Set(now.into()),
            created_at: Set(now.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ApprovalError::repository(e.to_string()))?;

        to_domain(model)
    }

    async fn update(
        &self,
        id: ApprovalRecordId,
        update: ApprovalUpdate,
        last_activity: DateTime<Utc>,
    ) -> Result<Option<ApprovalRecord>, ApprovalError> {
        let existing = approval_records::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| ApprovalError::repository(e.to_string()))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: approval_records::ActiveModel = existing.into();
        model.status = Set(update.status.as_str().to_string());
        model.piv_status = Set(update.piv_status.map(|p| p.as_str().to_string()));
        model.document_collected = Set(update.document_collected);
        model.submitted_on = Set(update.submitted_on);
        model.approved_on = Set(update.approved_on);
        model.updated_by = Set(update.updated_by);
        model.last_activity = Set(last_activity.into());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| ApprovalError::repository(e.to_string()))?;

        to_domain(updated).map(Some)
    }
}

/// Convert a row to the domain model.
///
/// Enum columns are stored as text; a row holding an unknown value is a
/// repository-level integrity failure, not a silent default.
fn to_domain(model: approval_records::Model) -> Result<ApprovalRecord, ApprovalError> {
    let approval_type = ApprovalType::parse(&model.approval_type).ok_or_else(|| {
        ApprovalError::repository(format!("invalid approval_type: {}", model.approval_type))
    })?;
    let status = ApprovalStatus::parse(&model.status)
        .ok_or_else(|| ApprovalError::repository(format!("invalid status: {}", model.status)))?;
    let piv_status = model
        .piv_status
        .as_deref()
        .map(|p| {
            PivStatus::parse(p)
                .ok_or_else(|| ApprovalError::repository(format!("invalid piv_status: {p}")))
        })
        .transpose()?;

    Ok(ApprovalRecord {
        id: ApprovalRecordId::from_uuid(model.id),
        member_id: MemberId::from_uuid(model.member_id),
        approval_type,
        status,
        piv_status,
        document_collected: model.document_collected,
        submitted_on: model.submitted_on,
        approved_on: model.approved_on,
        updated_by: model.updated_by,
        last_activity: model.last_activity.with_timezone(&Utc),
        created_at: model.created_at.with_timezone(&Utc),
    })
}
