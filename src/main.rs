use anyhow::Context;
use dotenvy::dotenv;
use hogwarts::logging::{init_tracing, shutdown_tracer};
use hogwarts::metrics::init_metrics;
use hogwarts::router::init_router;
use hogwarts::state::init_app_state;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing().context("Failed to create log directory")?;
    let metrics_handle = init_metrics().context("Failed to install metrics recorder")?;

    let state = init_app_state().await?.with_metrics(metrics_handle);
    let address = state.server_config.bind_address();
    let port = state.server_config.port;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running on http://localhost:{}", port);
    info!("Swagger UI available at http://localhost:{}/swagger-ui", port);
    info!("Scalar UI available at http://localhost:{}/scalar", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
