//! Attachment error types.

use thiserror::Error;

use fieldops_shared::AppError;
use fieldops_shared::types::AttachmentId;

use crate::storage::StorageError;

/// Attachment operation errors.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// No attachment row with the given id.
    #[error("attachment not found: {0}")]
    NotFound(AttachmentId),

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The underlying store failed.
    #[error("attachment repository error: {0}")]
    Repository(String),
}

impl AttachmentError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<AttachmentError> for AppError {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::NotFound(id) => Self::NotFound(format!("attachment {id}")),
            AttachmentError::Storage(e) => Self::ExternalService(e.to_string()),
            AttachmentError::Repository(msg) => Self::Database(msg),
        }
    }
}
