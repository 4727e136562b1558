//! Kaiwa - Interactive AI chat client
//!
//! Main entry point for the Kaiwa application.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kaiwa::cli::{Cli, Commands};
use kaiwa::commands;
use kaiwa::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { resume } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(r) = &resume {
                tracing::debug!("Resuming history: {}", r);
            }
            commands::chat::run_chat(config, resume).await
        }
        Commands::Serve { bind } => {
            tracing::info!("Starting completion endpoint server");
            commands::serve::run_serve(config, bind).await
        }
        Commands::History { command } => commands::history::handle_history(&config, command),
    }
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` controls filtering; `--verbose` lowers the default level
/// to debug when no filter is set.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "kaiwa=debug" } else { "kaiwa=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
