//! Store credential resolution
//!
//! The browser persists the connection parameters twice: in local storage for
//! its own use and in the `r2Config` cookie so that server-side handlers can
//! read them. Both copies hold the same raw JSON shape, so configuration
//! entered once is interpreted identically on either path.

use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cookie holding the store configuration as raw JSON
pub const CONFIG_COOKIE: &str = "r2Config";

/// One year, matching the cookie the configuration form writes
pub const CONFIG_COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// Result type for configuration resolution
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while resolving the store configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration cookie was attached to the request
    #[error("R2 configuration not found")]
    Missing,

    /// The cookie exists but cannot be parsed into the five required fields
    #[error("R2 configuration is invalid: {0}")]
    Invalid(String),
}

/// Connection parameters for the S3-compatible store
///
/// All five fields must be non-empty. There are no default credentials:
/// absence at request time is a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store region, `auto` for R2
    pub region: String,
    /// Endpoint URL, e.g. `https://<account>.r2.cloudflarestorage.com`
    pub endpoint: String,
    /// Access key id
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Bucket all objects live in
    pub bucket: String,
}

impl StoreConfig {
    /// Resolves the configuration from the request's cookie jar.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the cookie is absent and
    /// [`ConfigError::Invalid`] when it does not parse or a field is empty.
    pub fn resolve(jar: &CookieJar) -> ConfigResult<Self> {
        let cookie = jar.get(CONFIG_COOKIE).ok_or(ConfigError::Missing)?;
        Self::from_json(cookie.value())
    }

    /// Parses the persisted JSON shape shared with the browser's local store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on parse failure or an empty field.
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first empty field.
    pub fn validate(&self) -> ConfigResult<()> {
        let fields = [
            ("region", &self.region),
            ("endpoint", &self.endpoint),
            ("accessKeyId", &self.access_key_id),
            ("secretAccessKey", &self.secret_access_key),
            ("bucket", &self.bucket),
        ];

        for (name, value) in fields {
            if value.is_empty() {
                return Err(ConfigError::Invalid(format!("field `{name}` is empty")));
            }
        }

        Ok(())
    }

    /// Renders the `Set-Cookie` value persisting this configuration,
    /// mirroring the attributes the configuration form uses: raw JSON value,
    /// path `/`, one-year max-age.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration cannot be
    /// serialized.
    pub fn set_cookie_header(&self) -> ConfigResult<String> {
        let json =
            serde_json::to_string(self).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(format!(
            "{CONFIG_COOKIE}={json}; Path=/; Max-Age={CONFIG_COOKIE_MAX_AGE_SECS}"
        ))
    }
}
