use std::net::SocketAddr;

use anyhow::Context;
use college_ledger_viewer::{
    app,
    bootstrap::{initialize_viewer, shutdown_signal},
    config::APP_CONFIG,
    utils::tracing::init_standard_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &APP_CONFIG.log_level);

    tracing::info!("Starting application...");

    let viewer = initialize_viewer(&APP_CONFIG).await;
    tracing::info!("Viewer mounted in {:?} state", viewer.phase());

    let app = app::create_app(viewer, APP_CONFIG.swagger_enabled);

    let address = format!("0.0.0.0:{}", APP_CONFIG.port);

    tracing::info!("Server listening on {}", &address);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Failed to start server")?;

    Ok(())
}
