//! Storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, AWS S3, DigitalOcean Spaces
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Azure Blob Storage
    AzureBlob {
        /// Azure storage account name.
        account: String,
        /// Azure storage access key.
        access_key: String,
        /// Azure container name.
        container: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create Azure Blob Storage provider.
    #[must_use]
    pub fn azure_blob(
        account: impl Into<String>,
        access_key: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self::AzureBlob {
            account: account.into(),
            access_key: access_key.into(),
            container: container.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Presigned download URL TTL in seconds.
    pub presign_download_ttl_secs: u64,
}

impl StorageConfig {
    /// Default download TTL: 1 hour.
    pub const DEFAULT_DOWNLOAD_TTL: u64 = 3600;

    /// Create a new storage config with default settings.
    #[must_use]
    pub const fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            presign_download_ttl_secs: Self::DEFAULT_DOWNLOAD_TTL,
        }
    }

    /// Set presigned download URL TTL.
    #[must_use]
    pub const fn with_download_ttl(mut self, secs: u64) -> Self {
        self.presign_download_ttl_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names() {
        let s3 = StorageProvider::s3("https://r2.example.com", "files", "ak", "sk", "auto");
        assert_eq!(s3.name(), "s3");

        let azure = StorageProvider::azure_blob("fieldopsdev", "key", "files");
        assert_eq!(azure.name(), "azure_blob");

        assert_eq!(StorageProvider::local_fs("./files").name(), "local");
    }

    #[test]
    fn test_config_defaults() {
        let config = StorageConfig::new(StorageProvider::local_fs("./files"));
        assert_eq!(
            config.presign_download_ttl_secs,
            StorageConfig::DEFAULT_DOWNLOAD_TTL
        );
    }

    #[test]
    fn test_ttl_override() {
        let config = StorageConfig::new(StorageProvider::local_fs("./files")).with_download_ttl(60);
        assert_eq!(config.presign_download_ttl_secs, 60);
    }
}
