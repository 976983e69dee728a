//! SiteShell CLI
//!
//! Renders the ThaiPFA site header and footer, sourced from the content
//! repository, around page content.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for SiteShell.
#[derive(Parser)]
#[command(
    name = "siteshell",
    version,
    about = "Serves pages inside the CMS-driven site shell"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "siteshell.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Serve pages wrapped in the site shell
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Read content from a JSON fixture file instead of the content API
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },
    /// Render one page fragment into a full document
    Render {
        /// Page fragment to wrap
        page: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Document title (defaults to the site title)
        #[arg(short, long)]
        title: Option<String>,
        /// Read content from a JSON fixture file instead of the content API
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },
    /// Validate configuration and content documents
    Check {
        /// Read content from a JSON fixture file instead of the content API
        #[arg(long)]
        fixtures: Option<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    siteshell::init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve {
            host,
            port,
            fixtures,
        } => {
            siteshell::cmd::serve::run(&cli.config, host.as_deref(), port, fixtures.as_deref())
                .await?;
        }
        Commands::Render {
            page,
            output,
            title,
            fixtures,
        } => {
            siteshell::cmd::render::run(
                &cli.config,
                &page,
                output.as_deref(),
                title.as_deref(),
                fixtures.as_deref(),
            )
            .await?;
        }
        Commands::Check { fixtures, strict } => {
            siteshell::cmd::check::run(&cli.config, fixtures.as_deref(), strict).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_serve_command_parsing() {
        let args = ["siteshell", "serve", "--port", "8080"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, PathBuf::from("siteshell.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Serve {
                host,
                port,
                fixtures,
            } => {
                assert!(host.is_none());
                assert_eq!(port, Some(8080));
                assert!(fixtures.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_render_command_parsing() {
        let args = [
            "siteshell",
            "render",
            "pages/index.html",
            "--output",
            "dist/index.html",
            "--title",
            "Home",
            "--fixtures",
            "fixtures.json",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Render {
                page,
                output,
                title,
                fixtures,
            } => {
                assert_eq!(page, PathBuf::from("pages/index.html"));
                assert_eq!(output, Some(PathBuf::from("dist/index.html")));
                assert_eq!(title.as_deref(), Some("Home"));
                assert_eq!(fixtures, Some(PathBuf::from("fixtures.json")));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["siteshell", "check", "--strict"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { fixtures, strict } => {
                assert!(strict);
                assert!(fixtures.is_none());
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["siteshell", "-vvv", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["siteshell", "--config", "site.toml", "serve"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }
}
