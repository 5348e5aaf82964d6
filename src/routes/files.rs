use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    config::StoreConfig,
    gateway::{ObjectGateway, ObjectRecord},
    types::{AppError, SuccessResponse},
};

/// Lists the bucket and returns every object with a fresh download URL.
///
/// All-or-nothing: a failure anywhere yields an error response, never a
/// partial listing. An empty bucket is an empty array, not an error.
#[instrument(skip(jar))]
pub async fn list(jar: CookieJar) -> Result<Json<Vec<ObjectRecord>>, AppError> {
    let config = StoreConfig::resolve(&jar)?;
    let records = ObjectGateway::new(&config).list_objects().await?;

    tracing::debug!("listed {} objects", records.len());
    Ok(Json(records))
}

/// Body of `DELETE /files`
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    /// Exact key of the object to delete
    pub key: String,
}

/// Deletes one object by exact key.
///
/// Deleting an absent key still succeeds; the store is idempotent on delete.
#[instrument(skip(jar, payload))]
pub async fn delete(
    jar: CookieJar,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let config = StoreConfig::resolve(&jar)?;

    if payload.key.is_empty() {
        return Err(AppError::bad_request("Key must not be empty"));
    }

    ObjectGateway::new(&config)
        .delete_object(&payload.key)
        .await?;

    tracing::info!(key = %payload.key, "deleted object");
    Ok(Json(SuccessResponse::ok()))
}

/// Reachability probe behind the UI's "clear cache" button.
///
/// Issues a list call and discards the result. Nothing is evicted because
/// this service holds no cache.
#[instrument(skip(jar))]
pub async fn clear_cache(jar: CookieJar) -> Result<Json<SuccessResponse>, AppError> {
    let config = StoreConfig::resolve(&jar)?;

    ObjectGateway::new(&config).probe().await.map_err(|err| {
        tracing::error!(error = %err, "store probe failed");
        AppError::internal("Failed to clear cache")
    })?;

    Ok(Json(SuccessResponse::ok()))
}
