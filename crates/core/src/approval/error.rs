//! Approval workflow error types.

use thiserror::Error;

use fieldops_shared::AppError;
use fieldops_shared::types::{ApprovalRecordId, MemberId};

use super::types::{ApprovalStatus, ApprovalType};

/// Approval operation errors.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// No approval record with the given id.
    #[error("approval record not found: {0}")]
    NotFound(ApprovalRecordId),

    /// A record for this (member, type) pair already exists.
    #[error("approval of type {approval_type} already submitted for member {member_id}")]
    AlreadySubmitted {
        /// Member with the existing record.
        member_id: MemberId,
        /// The duplicated approval type.
        approval_type: ApprovalType,
    },

    /// The status is not part of this approval type's enumeration.
    #[error("status {status} is not valid for approval type {approval_type}")]
    InvalidStatus {
        /// The rejected status.
        status: ApprovalStatus,
        /// The record's approval type.
        approval_type: ApprovalType,
    },

    /// The underlying store failed.
    #[error("approval repository error: {0}")]
    Repository(String),
}

impl ApprovalError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<ApprovalError> for AppError {
    fn from(err: ApprovalError) -> Self {
        match err {
            ApprovalError::NotFound(id) => Self::NotFound(format!("approval record {id}")),
            ApprovalError::AlreadySubmitted {
                member_id,
                approval_type,
            } => Self::Conflict(format!(
                "a {approval_type} approval already exists for member {member_id}"
            )),
            ApprovalError::InvalidStatus {
                status,
                approval_type,
            } => Self::BusinessRule(format!(
                "status {status} is not valid for {approval_type} records"
            )),
            ApprovalError::Repository(msg) => Self::Database(msg),
        }
    }
}
