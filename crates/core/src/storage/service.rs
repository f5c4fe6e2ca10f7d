//! Storage service implementation using Apache OpenDAL.

use std::time::Duration;

use chrono::{DateTime, Utc};
use opendal::{Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// A time-limited download URL for a stored object.
#[derive(Debug, Clone)]
pub struct DownloadUrl {
    /// The presigned URL.
    pub url: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
}

/// Storage service for attachment objects.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// The provider name, for logging.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Generate a presigned download URL for a stored key.
    ///
    /// # Errors
    ///
    /// Returns an error if presigning is not supported or fails.
    pub async fn presign_download(&self, key: &str) -> Result<DownloadUrl, StorageError> {
        let ttl = Duration::from_secs(self.config.presign_download_ttl_secs);

        let presigned = self
            .operator
            .presign_read(key, ttl)
            .await
            .map_err(StorageError::from)?;

        Ok(DownloadUrl {
            url: presigned.uri().to_string(),
            expires_at: Utc::now()
                + chrono::Duration::seconds(
                    i64::try_from(self.config.presign_download_ttl_secs).unwrap_or(i64::MAX),
                ),
        })
    }

    /// Delete a stored object.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails. Deleting a missing object is
    /// not an error.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator
            .delete(key)
            .await
            .map_err(StorageError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_fs_operator_builds() {
        let config = StorageConfig::new(StorageProvider::local_fs("./test_files"));
        assert!(StorageService::from_config(config).is_ok());
    }

    #[tokio::test]
    async fn test_local_fs_does_not_support_presign() {
        let config = StorageConfig::new(StorageProvider::local_fs("./test_files"));
        let service = StorageService::from_config(config).unwrap();

        let result = service.presign_download("missing/key.pdf").await;
        assert!(matches!(result, Err(StorageError::PresignNotSupported)));
    }
}
