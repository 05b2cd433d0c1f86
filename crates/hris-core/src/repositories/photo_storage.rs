//! Photo storage trait (port)

use async_trait::async_trait;

use crate::error::DomainError;

/// Binary object store for employee photos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Store `bytes` under `key` and return a URL the object can be fetched from.
    async fn upload(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, DomainError>;
}
