mod environment;
mod error;

use serde::Serialize;

pub use environment::Environment;
pub use error::AppError;

/// Success envelope returned by mutating endpoints
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always `true` on the success path
    pub success: bool,
    /// Fresh download URL for the affected object, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SuccessResponse {
    /// Plain `{"success": true}` body
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            url: None,
        }
    }

    /// `{"success": true, "url": ...}` body
    #[must_use]
    pub const fn with_url(url: String) -> Self {
        Self {
            success: true,
            url: Some(url),
        }
    }
}
