//! Attachment service implementation.

use std::sync::Arc;

use fieldops_shared::types::{AttachmentId, MemberId, TravelRecordId};

use super::error::AttachmentError;
use super::types::{Attachment, NewAttachment};
use crate::storage::{DownloadUrl, StorageService};

/// Repository trait for attachment persistence.
///
/// This trait is implemented by the db crate to provide actual database
/// operations.
pub trait AttachmentRepository: Send + Sync {
    /// Create a new attachment record.
    fn create(
        &self,
        input: NewAttachment,
    ) -> impl std::future::Future<Output = Result<Attachment, AttachmentError>> + Send;

    /// Find attachment by ID.
    fn find_by_id(
        &self,
        id: AttachmentId,
    ) -> impl std::future::Future<Output = Result<Option<Attachment>, AttachmentError>> + Send;

    /// List attachments on a member's onboarding file.
    fn list_for_member(
        &self,
        member_id: MemberId,
    ) -> impl std::future::Future<Output = Result<Vec<Attachment>, AttachmentError>> + Send;

    /// List attachments on a booking.
    fn list_for_travel_record(
        &self,
        record_id: TravelRecordId,
    ) -> impl std::future::Future<Output = Result<Vec<Attachment>, AttachmentError>> + Send;

    /// Delete attachment by ID.
    fn delete(
        &self,
        id: AttachmentId,
    ) -> impl std::future::Future<Output = Result<bool, AttachmentError>> + Send;
}

/// Attachment service for managing file references.
pub struct AttachmentService<R: AttachmentRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
}

impl<R: AttachmentRepository> AttachmentService<R> {
    /// Create a new attachment service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Record an attachment row for an object already in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, input: NewAttachment) -> Result<Attachment, AttachmentError> {
        self.repo.create(input).await
    }

    /// Get attachment by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the attachment is not found or the query fails.
    pub async fn get_by_id(&self, id: AttachmentId) -> Result<Attachment, AttachmentError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AttachmentError::NotFound(id))
    }

    /// List attachments on a member's onboarding file.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Attachment>, AttachmentError> {
        self.repo.list_for_member(member_id).await
    }

    /// List attachments on a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_travel_record(
        &self,
        record_id: TravelRecordId,
    ) -> Result<Vec<Attachment>, AttachmentError> {
        self.repo.list_for_travel_record(record_id).await
    }

    /// Resolve one attachment's stored key to a download URL.
    ///
    /// Callers resolving a whole list run these lookups concurrently and
    /// tolerate per-item failure: a failed resolution leaves that link
    /// unresolved while the others succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if presigning fails.
    pub async fn resolve_download(
        &self,
        attachment: &Attachment,
    ) -> Result<DownloadUrl, AttachmentError> {
        Ok(self.storage.presign_download(&attachment.storage_key).await?)
    }

    /// Delete an attachment: the storage object, then the row.
    ///
    /// A missing storage object is ignored; the row is authoritative.
    ///
    /// # Errors
    ///
    /// Returns an error if the attachment is not found or the row delete
    /// fails.
    pub async fn delete(&self, id: AttachmentId) -> Result<(), AttachmentError> {
        let attachment = self.get_by_id(id).await?;

        if let Err(e) = self.storage.delete(&attachment.storage_key).await {
            // Row removal proceeds; the object may already be gone.
            tracing::warn!(
                attachment_id = %id,
                storage_key = %attachment.storage_key,
                error = %e,
                "failed to delete storage object"
            );
        }

        self.repo.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::AttachmentOwner;
    use crate::storage::{StorageConfig, StorageProvider};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockAttachmentRepository {
        attachments: Mutex<HashMap<AttachmentId, Attachment>>,
    }

    impl MockAttachmentRepository {
        fn new() -> Self {
            Self {
                attachments: Mutex::new(HashMap::new()),
            }
        }
    }

    impl AttachmentRepository for MockAttachmentRepository {
        async fn create(&self, input: NewAttachment) -> Result<Attachment, AttachmentError> {
            let attachment = Attachment {
                id: input.id,
                owner: input.owner,
                filename: input.filename,
                mime_type: input.mime_type,
                file_size: input.file_size,
                storage_key: input.storage_key,
                uploaded_by: input.uploaded_by,
                created_at: chrono::Utc::now(),
            };
            self.attachments
                .lock()
                .unwrap()
                .insert(attachment.id, attachment.clone());
            Ok(attachment)
        }

        async fn find_by_id(
            &self,
            id: AttachmentId,
        ) -> Result<Option<Attachment>, AttachmentError> {
            Ok(self.attachments.lock().unwrap().get(&id).cloned())
        }

        async fn list_for_member(
            &self,
            member_id: MemberId,
        ) -> Result<Vec<Attachment>, AttachmentError> {
            Ok(self
                .attachments
                .lock()
                .unwrap()
                .values()
                .filter(|a| a.owner == AttachmentOwner::Member(member_id))
                .cloned()
                .collect())
        }

        async fn list_for_travel_record(
            &self,
            record_id: TravelRecordId,
        ) -> Result<Vec<Attachment>, AttachmentError> {
            Ok(self
                .attachments
                .lock()
                .unwrap()
                .values()
                .filter(|a| a.owner == AttachmentOwner::TravelRecord(record_id))
                .cloned()
                .collect())
        }

        async fn delete(&self, id: AttachmentId) -> Result<bool, AttachmentError> {
            Ok(self.attachments.lock().unwrap().remove(&id).is_some())
        }
    }

    fn service() -> AttachmentService<MockAttachmentRepository> {
        let config = StorageConfig::new(StorageProvider::local_fs("./test_files"));
        let storage = Arc::new(StorageService::from_config(config).unwrap());
        AttachmentService::new(storage, Arc::new(MockAttachmentRepository::new()))
    }

    fn new_attachment(owner: AttachmentOwner) -> NewAttachment {
        NewAttachment {
            id: AttachmentId::new(),
            owner,
            filename: "offer-letter.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            file_size: 2048,
            storage_key: "members/offer-letter.pdf".to_string(),
            uploaded_by: "Dana Cruz".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_by_owner() {
        let service = service();
        let member = MemberId::new();

        service
            .create(new_attachment(AttachmentOwner::Member(member)))
            .await
            .unwrap();
        service
            .create(new_attachment(AttachmentOwner::TravelRecord(
                TravelRecordId::new(),
            )))
            .await
            .unwrap();

        let listed = service.list_for_member(member).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].uploaded_by, "Dana Cruz");
    }

    #[tokio::test]
    async fn test_get_missing_attachment() {
        let service = service();
        let result = service.get_by_id(AttachmentId::new()).await;
        assert!(matches!(result, Err(AttachmentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_row_even_if_object_gone() {
        let service = service();
        let member = MemberId::new();
        let created = service
            .create(new_attachment(AttachmentOwner::Member(member)))
            .await
            .unwrap();

        // No object was ever written to ./test_files; delete still
        // removes the row.
        service.delete(created.id).await.unwrap();
        assert!(service.list_for_member(member).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_attachment() {
        let service = service();
        let result = service.delete(AttachmentId::new()).await;
        assert!(matches!(result, Err(AttachmentError::NotFound(_))));
    }
}
