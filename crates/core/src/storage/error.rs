//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Object not found in storage.
    #[error("object not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Presign operation not supported by provider.
    #[error("presign operation not supported by storage provider")]
    PresignNotSupported,

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            opendal::ErrorKind::Unsupported => Self::PresignNotSupported,
            _ => Self::Operation(err.to_string()),
        }
    }
}
