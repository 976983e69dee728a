//! SiteShell CLI Library
//!
//! Command implementations and the HTTP server for the SiteShell binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (serve, render, check)
//! - [`server`] - axum router serving shell-wrapped pages
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use siteshell::cmd;
//!
//! # async fn run() -> color_eyre::eyre::Result<()> {
//! cmd::check::run(Path::new("siteshell.toml"), None, false).await?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;
pub mod server;

pub use siteshell_core::Config;
pub use siteshell_render::{PageContent, SiteShell};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
