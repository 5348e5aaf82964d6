//! Error types for gateway operations

use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while mediating store operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The underlying list call errored
    #[error("store unreachable: {0}")]
    StoreUnreachable(String),

    /// The presigner failed to produce a signed URL
    #[error("signed URL generation failed: {0}")]
    UrlGenerationFailed(String),

    /// Inline upload failed
    #[error("upload failed: {0}")]
    UploadFailed(String),

    /// Delete failed
    #[error("delete failed: {0}")]
    DeleteFailed(String),
}
