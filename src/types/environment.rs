//! Environment configuration for different deployment stages

use std::env;

/// Application environment configuration
///
/// Store credentials are resolved per request from the configuration cookie,
/// so the environment only controls process-level concerns such as the log
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment (JSON logs)
    Production,
    /// Development environment (human-readable logs)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }
}
