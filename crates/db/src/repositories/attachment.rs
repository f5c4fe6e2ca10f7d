//! Attachment repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::attachments;
use fieldops_core::attachment::{
    Attachment, AttachmentError, AttachmentOwner, AttachmentRepository as AttachmentRepoTrait,
    NewAttachment,
};
use fieldops_shared::types::{AttachmentId, MemberId, TravelRecordId};

/// Attachment repository implementation.
#[derive(Debug, Clone)]
pub struct AttachmentRepository {
    db: DatabaseConnection,
}

impl AttachmentRepository {
    /// Create a new attachment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AttachmentRepoTrait for AttachmentRepository {
    async fn create(&self, input: NewAttachment) -> Result<Attachment, AttachmentError> {
        let (member_id, travel_record_id) = match input.owner {
            AttachmentOwner::Member(id) => (Some(id.into_inner()), None),
            AttachmentOwner::TravelRecord(id) => (None, Some(id.into_inner())),
        };

        let active_model = attachments::ActiveModel {
            id: Set(input.id.into_inner()),
            member_id: Set(member_id),
            travel_record_id: Set(travel_record_id),
            filename: Set(input.filename),
            mime_type: Set(input.mime_type),
            file_size: Set(input.file_size),
            storage_key: Set(input.storage_key),
            uploaded_by: Set(input.uploaded_by),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        to_domain(model)
    }

    async fn find_by_id(&self, id: AttachmentId) -> Result<Option<Attachment>, AttachmentError> {
        let model = attachments::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn list_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Attachment>, AttachmentError> {
        let models = attachments::Entity::find()
            .filter(attachments::Column::MemberId.eq(member_id.into_inner()))
            .order_by_desc(attachments::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn list_for_travel_record(
        &self,
        record_id: TravelRecordId,
    ) -> Result<Vec<Attachment>, AttachmentError> {
        let models = attachments::Entity::find()
            .filter(attachments::Column::TravelRecordId.eq(record_id.into_inner()))
            .order_by_desc(attachments::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn delete(&self, id: AttachmentId) -> Result<bool, AttachmentError> {
        let result = attachments::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert a row to the domain model.
fn to_domain(model: attachments::Model) -> Result<Attachment, AttachmentError> {
    let owner = match (model.member_id, model.travel_record_id) {
        (Some(member_id), None) => AttachmentOwner::Member(MemberId::from_uuid(member_id)),
        (None, Some(record_id)) => {
            AttachmentOwner::TravelRecord(TravelRecordId::from_uuid(record_id))
        }
        _ => {
            return Err(AttachmentError::repository(format!(
                "attachment {} must reference exactly one owner",
                model.id
            )));
        }
    };

    Ok(Attachment {
        id: AttachmentId::from_uuid(model.id),
        owner,
        filename: model.filename,
        mime_type: model.mime_type,
        file_size: model.file_size,
        storage_key: model.storage_key,
        uploaded_by: model.uploaded_by,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    })
}
