//! Attachment domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldops_shared::types::{AttachmentId, MemberId, TravelRecordId};

/// The entity an attachment hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "owner_type", content = "owner_id", rename_all = "snake_case")]
pub enum AttachmentOwner {
    /// Attached to a member's onboarding file.
    Member(MemberId),
    /// Attached to a booking.
    TravelRecord(TravelRecordId),
}

/// Attachment domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier.
    pub id: AttachmentId,
    /// Owning member or travel record.
    pub owner: AttachmentOwner,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Key of the stored object.
    pub storage_key: String,
    /// Display name of the uploader.
    pub uploaded_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for recording an attachment row.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    /// Pre-generated identifier.
    pub id: AttachmentId,
    /// Owning member or travel record.
    pub owner: AttachmentOwner,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Key of the stored object.
    pub storage_key: String,
    /// Display name of the uploader.
    pub uploaded_by: String,
}
