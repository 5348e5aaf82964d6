use axum::{extract::Multipart, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    config::StoreConfig,
    gateway::ObjectGateway,
    types::{AppError, SuccessResponse},
};

/// Body of `POST /upload-url`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    /// Object key the client intends to upload to
    pub filename: String,
    /// Content type the upload will carry; omitted means the store picks
    /// its default
    pub content_type: Option<String>,
}

/// Response of `POST /upload-url`
#[derive(Debug, Serialize)]
pub struct UploadUrlResponse {
    /// PUT signed URL, valid 3600 seconds
    pub url: String,
}

/// Generates a PUT signed URL scoped to the requested key and content type.
#[instrument(skip(jar, payload))]
pub async fn upload_url(
    jar: CookieJar,
    Json(payload): Json<UploadUrlRequest>,
) -> Result<Json<UploadUrlResponse>, AppError> {
    let config = StoreConfig::resolve(&jar)?;

    if payload.filename.is_empty() {
        return Err(AppError::bad_request("Filename must not be empty"));
    }

    let url = ObjectGateway::new(&config)
        .upload_url(&payload.filename, payload.content_type.as_deref())
        .await?;

    tracing::info!(key = %payload.filename, "generated upload URL");
    Ok(Json(UploadUrlResponse { url }))
}

/// Relays a multipart upload to the store inline.
///
/// Expects one part named `file`; its filename becomes the object key (last
/// writer wins) and its content type is passed through untouched. Responds
/// with a fresh download URL for the stored object.
#[instrument(skip(jar, multipart))]
pub async fn upload(
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<Json<SuccessResponse>, AppError> {
    let config = StoreConfig::resolve(&jar)?;

    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(format!("Invalid multipart body: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let Some(filename) = field.file_name().map(ToString::to_string) else {
            break;
        };
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::bad_request(format!("Failed to read upload: {err}")))?;

        file = Some((filename, content_type, bytes.to_vec()));
        break;
    }

    let Some((filename, content_type, bytes)) = file else {
        return Err(AppError::bad_request("No file provided"));
    };

    if filename.is_empty() {
        return Err(AppError::bad_request("No file provided"));
    }

    let size = bytes.len();
    let url = ObjectGateway::new(&config)
        .put_object(&filename, bytes, content_type.as_deref())
        .await?;

    tracing::info!(key = %filename, size, "stored object");
    Ok(Json(SuccessResponse::with_url(url)))
}
