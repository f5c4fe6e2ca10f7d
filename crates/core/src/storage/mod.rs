//! Object storage service.
//!
//! Uploads happen outside this system; FieldOps resolves stored keys to
//! time-limited download URLs and deletes objects when their attachment
//! rows are removed.

pub mod config;
pub mod error;
pub mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{DownloadUrl, StorageService};
