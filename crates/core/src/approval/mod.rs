//! Onboarding approval workflow.
//!
//! One approval record exists per (member, approval type). Statuses are
//! freely editable in any direction by authorized staff; there is no
//! terminal state. Every update stamps the acting user and the wall-clock
//! time.

pub mod error;
pub mod service;
pub mod types;

pub use error::ApprovalError;
pub use service::{ApprovalRepository, ApprovalService, ApprovalUpdate, NewApprovalRecord};
pub use types::{ApprovalRecord, ApprovalStatus, ApprovalType, PivStatus};
