//! Backend service for a browser-based R2 file manager

#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

/// Store credential resolution from the request cookie
pub mod config;

/// Signed object gateway over the S3-compatible store
pub mod gateway;

/// HTTP route handlers
pub mod routes;

/// Server startup
pub mod server;

/// Shared types: environment, error envelope, responses
pub mod types;
