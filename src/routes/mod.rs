/// Configuration persistence route
pub mod config;
/// Listing, deletion and cache-probe routes
pub mod files;
/// Health check route
pub mod health;
/// Upload URL generation and inline upload routes
pub mod upload;

use axum::{
    routing::{get, post},
    Router,
};

/// Creates the router with all handler routes
pub fn handler() -> Router {
    Router::new()
        .route("/health", get(health::handler))
        .route("/config", post(config::save))
        .route("/files", get(files::list).delete(files::delete))
        .route("/files/clear-cache", post(files::clear_cache))
        .route("/upload-url", post(upload::upload_url))
        .route("/upload", post(upload::upload))
}
