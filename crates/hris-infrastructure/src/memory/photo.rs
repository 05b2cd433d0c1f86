use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use hris_core::error::DomainError;
use hris_core::repositories::PhotoStorage;

/// Stored object: content type and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct InMemoryPhotoStorage {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryPhotoStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for InMemoryPhotoStorage {
    fn default() -> Self {
        Self::new("memory://photos")
    }
}

#[async_trait]
impl PhotoStorage for InMemoryPhotoStorage {
    async fn upload(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, DomainError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}
