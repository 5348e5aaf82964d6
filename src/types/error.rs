//! Universal error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::ConfigError;
use crate::gateway::GatewayError;

/// Uniform error envelope: `{"error": "<message>"}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure description
    pub error: String,
}

/// Application error type carrying the HTTP status and public message
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 with the given message
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500 with the given message
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {}", self.message),
            500..=599 => tracing::error!("Server error: {}", self.message),
            _ => {}
        }

        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Missing or unparseable configuration is a client problem: the browser
/// never sent a usable `r2Config` cookie.
impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match &err {
            ConfigError::Missing => Self::bad_request("R2 configuration not found"),
            ConfigError::Invalid(detail) => {
                tracing::warn!("Rejected configuration cookie: {detail}");
                Self::bad_request("R2 configuration is invalid")
            }
        }
    }
}

/// Convert gateway errors to application errors
///
/// The diagnostic is logged here; the response body carries only the generic
/// per-operation message the UI expects.
impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        tracing::error!(error = %err, "gateway operation failed");

        let message = match &err {
            GatewayError::StoreUnreachable(_) => "Failed to fetch files",
            GatewayError::UrlGenerationFailed(_) => "Failed to generate upload URL",
            GatewayError::UploadFailed(_) => "Failed to upload file",
            GatewayError::DeleteFailed(_) => "Failed to delete file",
        };

        Self::internal(message)
    }
}
