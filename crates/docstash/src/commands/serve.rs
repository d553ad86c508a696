//! HTTP server command implementation.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::{info, warn};

use docstash::email::{Mailer, SmtpMailer};
use docstash::server::{self, AppState, Stores};

pub async fn run(
    config_path: &str,
    host_override: Option<IpAddr>,
    port_override: Option<u16>,
    data_dir_override: Option<&Path>,
) -> Result<()> {
    let (mut config, documents) = super::load_storage(config_path, data_dir_override).await?;

    // CLI overrides config
    if let Some(host) = host_override {
        config.server.host = host.to_string();
    }
    if let Some(port) = port_override {
        config.server.port = port;
    }

    documents.init().await?;
    info!(root = %documents.root().display(), "Storage initialized");

    let smtp = SmtpMailer::from_config(&config.email);
    let email_available = smtp.is_available();
    let mailer: Arc<dyn Mailer> = Arc::new(smtp);
    info!(available = email_available, "Email delivery configured");

    let state = AppState {
        stores: Stores::file(documents.clone()),
        mailer,
        email_available,
        data_dir: documents.root().to_path_buf(),
    };

    let app = server::build_app(state, &config.server);

    let ip: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(ip, config.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(addr = %addr, "Starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
