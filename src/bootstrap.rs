use tokio::signal;

use crate::config::Config;
use crate::viewer::Viewer;

/// Connect to the wallet provider once, at startup.
pub async fn initialize_viewer(config: &Config) -> Viewer {
    let provider_config = config.provider_config();

    match (&provider_config.rpc_url, &provider_config.private_key) {
        (None, _) => tracing::warn!("BLOCKCHAIN_RPC_URL not set, contract actions are disabled"),
        (Some(url), Some(_)) => tracing::info!("Connecting to {} with a local signer...", url),
        (Some(url), None) => tracing::info!("Connecting to {} using node accounts...", url),
    }
    tracing::info!("Contract address: {}", provider_config.contract_address);

    Viewer::mount(&provider_config).await
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut stream = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        stream.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
