//! COBA - Conversation client for the C.O.B.A text analysis service
//!
//! Main entry point for the COBA client application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coba::cli::{Cli, Commands};
use coba::commands;
use coba::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { feature } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(f) = &feature {
                tracing::debug!("Using feature override: {}", f);
            }
            commands::chat::run_chat(config, feature).await?;
            Ok(())
        }
        Commands::Analyze {
            feature,
            text,
            file,
        } => {
            tracing::info!("Starting one-shot analysis: {}", feature);
            if let Some(path) = &file {
                tracing::debug!("Analyzing document: {}", path.display());
            }
            commands::analyze::run_analyze(config, &feature, text, file).await?;
            Ok(())
        }
        Commands::Features => {
            commands::list_features();
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects debug-level
/// logging for the crate.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "coba=debug" } else { "coba=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
