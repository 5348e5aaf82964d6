use axum::{
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tracing::instrument;

use crate::{
    config::StoreConfig,
    types::{AppError, SuccessResponse},
};

/// Persists the store configuration in the `r2Config` cookie.
///
/// The configuration is overwritten wholesale on every save; there are no
/// partial updates. The cookie value is the same raw JSON shape the browser
/// keeps in local storage, so both sides resolve identical fields.
#[instrument(skip(payload))]
pub async fn save(Json(payload): Json<StoreConfig>) -> Result<Response, AppError> {
    payload.validate()?;

    let header = payload.set_cookie_header()?;
    // Cookie values are limited to visible ASCII; anything else is bad input
    let header = HeaderValue::from_str(&header)
        .map_err(|_| AppError::bad_request("R2 configuration is invalid"))?;

    tracing::info!(bucket = %payload.bucket, "saved store configuration");

    let mut response = Json(SuccessResponse::ok()).into_response();
    response.headers_mut().insert(SET_COOKIE, header);
    Ok(response)
}
