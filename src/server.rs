use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::routes;

/// Upper bound for inline upload bodies. The axum default of 2 MiB is too
/// small for a file manager.
const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Binds the listener and serves the API until shutdown.
///
/// # Errors
///
/// Returns an error if the port cannot be parsed or the listener fails to
/// bind.
pub async fn start() -> anyhow::Result<()> {
    let router = routes::handler()
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("R2 file manager backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown signal handler");
        // Keep serving; a missing signal handler must not stop the process.
        std::future::pending::<()>().await;
    }
}
