//! Approval workflow service.

use chrono::{DateTime, NaiveDate, Utc};

use fieldops_shared::types::{ApprovalRecordId, MemberId};

use super::error::ApprovalError;
use super::types::{ApprovalRecord, ApprovalStatus, ApprovalType, PivStatus};

/// Row to persist for a first submission.
#[derive(Debug, Clone)]
pub struct NewApprovalRecord {
    /// Pre-generated identifier.
    pub id: ApprovalRecordId,
    /// Member under review.
    pub member_id: MemberId,
    /// Kind of approval.
    pub approval_type: ApprovalType,
    /// Initial status (always In Progress).
    pub status: ApprovalStatus,
    /// Submission date.
    pub submitted_on: Option<NaiveDate>,
    /// Display name of the submitter.
    pub updated_by: String,
}

/// Mutable fields overwritten by an update.
///
/// Updates are keyed by record id and replace every field here - the last
/// write wins in full when two editors race.
#[derive(Debug, Clone)]
pub struct ApprovalUpdate {
    /// New status (any member of the type's status set).
    pub status: ApprovalStatus,
    /// PIV badge status (meaningful for TSA records).
    pub piv_status: Option<PivStatus>,
    /// Whether supporting documents have been collected.
    pub document_collected: bool,
    /// Submission date.
    pub submitted_on: Option<NaiveDate>,
    /// Approval date.
    pub approved_on: Option<NaiveDate>,
    /// Display name of the acting editor.
    pub updated_by: String,
}

/// Repository trait for approval persistence.
pub trait ApprovalRepository: Send + Sync {
    /// Find a record by id.
    fn find_by_id(
        &self,
        id: ApprovalRecordId,
    ) -> impl std::future::Future<Output = Result<Option<ApprovalRecord>, ApprovalError>> + Send;

    /// Find the record for a (member, type) pair.
    fn find_for_member(
        &self,
        member_id: MemberId,
        approval_type: ApprovalType,
    ) -> impl std::future::Future<Output = Result<Option<ApprovalRecord>, ApprovalError>> + Send;

    /// All records for a member.
    fn list_for_member(
        &self,
        member_id: MemberId,
    ) -> impl std::future::Future<Output = Result<Vec<ApprovalRecord>, ApprovalError>> + Send;

    /// Insert a first-submission row.
    fn insert(
        &self,
        record: NewApprovalRecord,
    ) -> impl std::future::Future<Output = Result<ApprovalRecord, ApprovalError>> + Send;

    /// Overwrite the mutable fields of a record.
    fn update(
        &self,
        id: ApprovalRecordId,
        update: ApprovalUpdate,
        last_activity: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<ApprovalRecord>, ApprovalError>> + Send;
}

/// Service for submitting and re-reviewing approvals.
pub struct ApprovalService<R: ApprovalRepository> {
    repo: R,
}

impl<R: ApprovalRepository> ApprovalService<R> {
    /// Creates a new approval service.
    #[must_use]
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a first submission for a (member, type) pair.
    ///
    /// The record starts In Progress. A second submission for the same
    /// pair is a conflict; re-reviews go through [`Self::update`].
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubmitted` if the pair has a record, or
    /// `Repository` on a failed write.
    pub async fn submit(
        &self,
        member_id: MemberId,
        approval_type: ApprovalType,
        submitted_on: Option<NaiveDate>,
        submitted_by: String,
    ) -> Result<ApprovalRecord, ApprovalError> {
        if self
            .repo
            .find_for_member(member_id, approval_type)
            .await?
            .is_some()
        {
            return Err(ApprovalError::AlreadySubmitted {
                member_id,
                approval_type,
            });
        }

        self.repo
            .insert(NewApprovalRecord {
                id: ApprovalRecordId::new(),
                member_id,
                approval_type,
                status: ApprovalStatus::InProgress,
                submitted_on,
                updated_by: submitted_by,
            })
            .await
    }

    /// Overwrites a record's mutable fields in place.
    ///
    /// The new status may be any member of the record type's status set -
    /// including moving an Approved record back to In Progress or
    /// Rejected. The update stamps `last_activity` with wall-clock now.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `InvalidStatus` when the
    /// status does not belong to the type's enumeration, or `Repository`
    /// on a failed write.
    pub async fn update(
        &self,
        id: ApprovalRecordId,
        update: ApprovalUpdate,
    ) -> Result<ApprovalRecord, ApprovalError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApprovalError::NotFound(id))?;

        if !update.status.is_valid_for(existing.approval_type) {
            return Err(ApprovalError::InvalidStatus {
                status: update.status,
                approval_type: existing.approval_type,
            });
        }

        self.repo
            .update(id, update, Utc::now())
            .await?
            .ok_or(ApprovalError::NotFound(id))
    }

    /// All approval records for a member.
    ///
    /// # Errors
    ///
    /// Returns `Repository` if the query fails.
    pub async fn list_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<ApprovalRecord>, ApprovalError> {
        self.repo.list_for_member(member_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockApprovalRepository {
        records: Mutex<HashMap<ApprovalRecordId, ApprovalRecord>>,
    }

    impl MockApprovalRepository {
        fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
            }
        }
    }

    impl ApprovalRepository for MockApprovalRepository {
        async fn find_by_id(
            &self,
            id: ApprovalRecordId,
        ) -> Result<Option<ApprovalRecord>, ApprovalError> {
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }

        async fn find_for_member(
            &self,
            member_id: MemberId,
            approval_type: ApprovalType,
        ) -> Result<Option<ApprovalRecord>, ApprovalError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .find(|r| r.member_id == member_id && r.approval_type == approval_type)
                .cloned())
        }

        async fn list_for_member(
            &self,
            member_id: MemberId,
        ) -> Result<Vec<ApprovalRecord>, ApprovalError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.member_id == member_id)
                .cloned()
                .collect())
        }

        async fn insert(
            &self,
            record: NewApprovalRecord,
        ) -> Result<ApprovalRecord, ApprovalError> {
            let now = Utc::now();
            let row = ApprovalRecord {
                id: record.id,
                member_id: record.member_id,
                approval_type: record.approval_type,
                status: record.status,
                piv_status: None,
                document_collected: false,
                submitted_on: record.submitted_on,
                approved_on: None,
                updated_by: record.updated_by,
                last_activity: now,
                created_at: now,
            };
            self.records.lock().unwrap().insert(row.id, row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            id: ApprovalRecordId,
            update: ApprovalUpdate,
            last_activity: DateTime<Utc>,
        ) -> Result<Option<ApprovalRecord>, ApprovalError> {
            let mut records = self.records.lock().unwrap();
            let Some(row) = records.get_mut(&id) else {
                return Ok(None);
            };
            row.status = update.status;
            row.piv_status = update.piv_status;
            row.document_collected = update.document_collected;
            row.submitted_on = update.submitted_on;
            row.approved_on = update.approved_on;
            row.updated_by = update.updated_by;
            row.last_activity = last_activity;
            Ok(Some(row.clone()))
        }
    }

    fn update_to(status: ApprovalStatus, editor: &str) -> ApprovalUpdate {
        ApprovalUpdate {
            status,
            piv_status: None,
            document_collected: true,
            submitted_on: None,
            approved_on: None,
            updated_by: editor.to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_starts_in_progress() {
        let service = ApprovalService::new(MockApprovalRepository::new());
        let member = MemberId::new();

        let record = service
            .submit(member, ApprovalType::Clearance, None, "Dana Cruz".into())
            .await
            .unwrap();
        assert_eq!(record.status, ApprovalStatus::InProgress);
        assert_eq!(record.updated_by, "Dana Cruz");
    }

    #[tokio::test]
    async fn test_duplicate_submission_conflicts() {
        let service = ApprovalService::new(MockApprovalRepository::new());
        let member = MemberId::new();

        service
            .submit(member, ApprovalType::Tsa, None, "Dana Cruz".into())
            .await
            .unwrap();
        let second = service
            .submit(member, ApprovalType::Tsa, None, "Riley Poe".into())
            .await;
        assert!(matches!(
            second,
            Err(ApprovalError::AlreadySubmitted { .. })
        ));

        // A different type for the same member is a fresh pair.
        assert!(
            service
                .submit(member, ApprovalType::Clearance, None, "Riley Poe".into())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_any_status_reachable_from_any_other() {
        let service = ApprovalService::new(MockApprovalRepository::new());
        let member = MemberId::new();
        let record = service
            .submit(member, ApprovalType::BackgroundCheck, None, "Dana Cruz".into())
            .await
            .unwrap();

        // Walk every ordered pair of the type's status set; nothing rejects.
        let statuses = ApprovalType::BackgroundCheck.statuses();
        for &from in statuses {
            for &to in statuses {
                service.update(record.id, update_to(from, "A")).await.unwrap();
                let updated = service.update(record.id, update_to(to, "B")).await.unwrap();
                assert_eq!(updated.status, to);
                assert_eq!(updated.updated_by, "B");
            }
        }
    }

    #[tokio::test]
    async fn test_approved_can_be_walked_back() {
        let service = ApprovalService::new(MockApprovalRepository::new());
        let member = MemberId::new();
        let record = service
            .submit(member, ApprovalType::Clearance, None, "Dana Cruz".into())
            .await
            .unwrap();

        service
            .update(record.id, update_to(ApprovalStatus::Approved, "Dana Cruz"))
            .await
            .unwrap();
        let reverted = service
            .update(record.id, update_to(ApprovalStatus::Rejected, "Riley Poe"))
            .await
            .unwrap();
        assert_eq!(reverted.status, ApprovalStatus::Rejected);
    }

    #[tokio::test]
    async fn test_status_outside_type_set_rejected() {
        let service = ApprovalService::new(MockApprovalRepository::new());
        let member = MemberId::new();
        let record = service
            .submit(member, ApprovalType::Tsa, None, "Dana Cruz".into())
            .await
            .unwrap();

        // TSA vetting fails, it is not "Rejected".
        let result = service
            .update(record.id, update_to(ApprovalStatus::Rejected, "Dana Cruz"))
            .await;
        assert!(matches!(result, Err(ApprovalError::InvalidStatus { .. })));
    }

    #[tokio::test]
    async fn test_update_stamps_editor_and_activity() {
        let service = ApprovalService::new(MockApprovalRepository::new());
        let member = MemberId::new();
        let record = service
            .submit(member, ApprovalType::Tsa, None, "Dana Cruz".into())
            .await
            .unwrap();

        let mut update = update_to(ApprovalStatus::Approved, "Riley Poe");
        update.piv_status = Some(PivStatus::Issued);
        let updated = service.update(record.id, update).await.unwrap();

        assert_eq!(updated.updated_by, "Riley Poe");
        assert_eq!(updated.piv_status, Some(PivStatus::Issued));
        assert!(updated.last_activity >= record.last_activity);
    }

    #[tokio::test]
    async fn test_update_unknown_record() {
        let service = ApprovalService::new(MockApprovalRepository::new());
        let result = service
            .update(
                ApprovalRecordId::new(),
                update_to(ApprovalStatus::Approved, "Dana Cruz"),
            )
            .await;
        assert!(matches!(result, Err(ApprovalError::NotFound(_))));
    }
}
