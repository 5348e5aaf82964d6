//! Signed object gateway
//!
//! Turns resolved store credentials plus an object key into time-bounded
//! signed URLs and mediates list, upload and delete calls. The client is
//! rebuilt from the cookie configuration on every request; no connection is
//! shared across requests.

mod error;

use std::time::Duration;

use aws_sdk_s3::{
    config::{retry::RetryConfig, BehaviorVersion, Credentials, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
    Client,
};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;

use crate::config::StoreConfig;
pub use error::{GatewayError, GatewayResult};

/// Validity window for every signed URL, upload and download alike
pub const SIGNED_URL_EXPIRY_SECS: u64 = 3600;

/// One object as surfaced to the file manager UI
///
/// Field names follow the store listing record the UI already consumes, with
/// the derived download URL appended. The signed URL expires and must never
/// be cached beyond its validity window.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectRecord {
    /// Object key, also the path-like display name
    #[serde(rename = "Key")]
    pub key: String,
    /// Size in bytes
    #[serde(rename = "Size")]
    pub size: i64,
    /// Last modification time reported by the store
    #[serde(rename = "LastModified")]
    pub last_modified: Option<DateTime<Utc>>,
    /// GET signed URL, valid for [`SIGNED_URL_EXPIRY_SECS`]
    pub url: String,
}

/// Stateless gateway over one bucket of the S3-compatible store
pub struct ObjectGateway {
    client: Client,
    bucket: String,
}

impl ObjectGateway {
    /// Builds a fresh client from resolved credentials.
    ///
    /// Retries are disabled: a single failed store call surfaces immediately
    /// to the caller.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "r2-cookie-config",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Lists the first page of the bucket and attaches a GET signed URL to
    /// every record.
    ///
    /// Presigning runs concurrently but the returned sequence preserves the
    /// store's listing order. Either the full sequence is returned or an
    /// error; there is no partial result.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnreachable`] if the list call fails and
    /// [`GatewayError::UrlGenerationFailed`] if any record cannot be signed.
    pub async fn list_objects(&self) -> GatewayResult<Vec<ObjectRecord>> {
        let listing = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|err| GatewayError::StoreUnreachable(err.to_string()))?;

        // Entries without a key cannot be addressed, let alone signed; skip them
        let records = try_join_all(
            listing
                .contents()
                .iter()
                .filter_map(|object| object.key().map(|key| (key.to_string(), object)))
                .map(|(key, object)| async move {
                    let url = self.download_url(&key).await?;

                    Ok::<_, GatewayError>(ObjectRecord {
                        size: object.size().unwrap_or(0),
                        last_modified: object
                            .last_modified()
                            .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
                        key,
                        url,
                    })
                }),
        )
        .await?;

        Ok(records)
    }

    /// Generates a GET signed URL for one object key.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UrlGenerationFailed`] on signer error.
    pub async fn download_url(&self, key: &str) -> GatewayResult<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config()?)
            .await
            .map_err(|err| GatewayError::UrlGenerationFailed(err.to_string()))?;

        Ok(presigned.uri().to_string())
    }

    /// Generates a PUT signed URL scoped to the key and content type.
    ///
    /// The key is not sanitized and collisions are not checked: last writer
    /// wins. When no content type is given the store assigns its default.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UrlGenerationFailed`] on signer error.
    pub async fn upload_url(
        &self,
        key: &str,
        content_type: Option<&str>,
    ) -> GatewayResult<String> {
        let mut request = self.client.put_object().bucket(&self.bucket).key(key);
        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }

        let presigned = request
            .presigned(presigning_config()?)
            .await
            .map_err(|err| GatewayError::UrlGenerationFailed(err.to_string()))?;

        Ok(presigned.uri().to_string())
    }

    /// Uploads the full payload inline, overwriting any existing object with
    /// the same key, and returns a GET signed URL for the stored object.
    ///
    /// Whole-object puts are atomic on the store side, so there is no partial
    /// object to roll back on failure.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UploadFailed`] if the put fails and
    /// [`GatewayError::UrlGenerationFailed`] if the follow-up signing fails.
    pub async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> GatewayResult<String> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes));
        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }

        request
            .send()
            .await
            .map_err(|err| GatewayError::UploadFailed(err.to_string()))?;

        self.download_url(key).await
    }

    /// Deletes by exact key. Deleting an absent key succeeds because the
    /// store is idempotent on delete; no existence check is performed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DeleteFailed`] on store error.
    pub async fn delete_object(&self, key: &str) -> GatewayResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| GatewayError::DeleteFailed(err.to_string()))?;

        Ok(())
    }

    /// Reachability probe: issues a list call and discards the result.
    ///
    /// The UI exposes this as "clear cache", but no cache exists on this
    /// side; every signed URL is freshly derived per request.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreUnreachable`] if the list call fails.
    pub async fn probe(&self) -> GatewayResult<()> {
        self.client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|err| GatewayError::StoreUnreachable(err.to_string()))?;

        Ok(())
    }
}

fn presigning_config() -> GatewayResult<PresigningConfig> {
    PresigningConfig::expires_in(Duration::from_secs(SIGNED_URL_EXPIRY_SECS))
        .map_err(|err| GatewayError::UrlGenerationFailed(err.to_string()))
}
