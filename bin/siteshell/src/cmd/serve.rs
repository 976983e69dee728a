//! Serve command - HTTP server rendering pages inside the site shell

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use siteshell_render::SiteShell;
use tokio::net::TcpListener;

use super::{content_repository, load_config};
use crate::server::{ServerState, create_router};

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    host: Option<&str>,
    port: Option<u16>,
    fixtures: Option<&Path>,
) -> Result<()> {
    tracing::info!(?config_path, ?host, ?port, "Starting server");

    let mut config = load_config(config_path)?;
    if let Some(h) = host {
        config.server.host = h.to_string();
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    let repository = content_repository(&config, fixtures)?;
    let config = Arc::new(config);
    let shell = SiteShell::new(repository, Arc::clone(&config));
    let state = Arc::new(ServerState::new(shell, &config.server.pages_dir));
    let app = create_router(&config, state);

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Site running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
