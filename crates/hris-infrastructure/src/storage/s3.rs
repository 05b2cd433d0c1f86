// ============================================================================
// HRIS Infrastructure - S3 Photo Storage
// File: crates/hris-infrastructure/src/storage/s3.rs
// ============================================================================
//! Employee photos on S3-compatible storage (AWS S3 or MinIO)
//!
//! Objects are addressed as `{public_base_url}/{bucket}/{key}`.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use tracing::{error, info};

use hris_core::error::DomainError;
use hris_core::repositories::PhotoStorage;
use hris_shared::config::StorageSettings;

pub struct S3PhotoStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3PhotoStorage {
    pub fn new(client: Client, bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Build a client from settings. Credentials come from the usual AWS
    /// provider chain (`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`, profile, ...).
    pub async fn from_settings(settings: &StorageSettings) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .endpoint_url(&settings.endpoint)
            .load()
            .await;
        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(settings.force_path_style)
            .build();

        let public_base_url = settings
            .public_base_url
            .clone()
            .unwrap_or_else(|| settings.endpoint.clone());

        Self::new(Client::from_conf(config), settings.bucket.clone(), public_base_url)
    }

    /// Create the bucket if it does not exist yet.
    pub async fn ensure_bucket(&self) -> Result<(), DomainError> {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return Ok(());
        }

        match self.client.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                info!(bucket = %self.bucket, "Photo bucket created");
                Ok(())
            }
            Err(e)
                if e.as_service_error().is_some_and(|se| {
                    se.is_bucket_already_owned_by_you() || se.is_bucket_already_exists()
                }) =>
            {
                Ok(())
            }
            Err(e) => {
                error!(bucket = %self.bucket, error = %e, "Photo bucket bootstrap failed");
                Err(DomainError::StorageError(e.to_string()))
            }
        }
    }

    pub fn object_url(&self, key: &str) -> String {
        object_url(&self.public_base_url, &self.bucket, key)
    }
}

fn object_url(base: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), bucket, key)
}

#[async_trait]
impl PhotoStorage for S3PhotoStorage {
    async fn upload(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, DomainError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(bytes.into())
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "S3 upload failed");
                DomainError::StorageError(format!("photo upload failed: {e}"))
            })?;

        info!(key = %key, size, "Photo uploaded");
        Ok(self.object_url(key))
    }
}
