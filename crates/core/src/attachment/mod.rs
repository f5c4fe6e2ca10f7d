//! File attachments on members and travel records.

pub mod error;
pub mod service;
pub mod types;

pub use error::AttachmentError;
pub use service::{AttachmentRepository, AttachmentService};
pub use types::{Attachment, AttachmentOwner, NewAttachment};
