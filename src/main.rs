//! Main entry point for the Juremy push CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use juremy_push::cli::commands::{self, Commands, GlobalOptions};

/// Juremy search push - trigger Juremy searches from the command line
#[derive(Parser, Debug)]
#[command(name = "juremy-push", version, about, long_about = None)]
struct Args {
    /// App token (optional, defaults to JUREMY_APP_TOKEN or the stored token)
    #[arg(long)]
    app_token: Option<String>,

    /// Juremy base URL (defaults to https://juremy.com)
    #[arg(long)]
    base_url: Option<String>,

    /// Configuration file (JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    let default_filter = format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options = GlobalOptions {
        config: args.config,
        base_url: args.base_url,
        app_token: args.app_token,
    };

    // Execute command
    match args.command {
        Some(Commands::Push {
            source,
            target,
            text,
        }) => {
            let lookup = commands::build_lookup(commands::load_config(&options)?)?;
            commands::handle_push(&lookup, source, target, text).await?;
        }
        Some(Commands::Ping) => {
            let lookup = commands::build_lookup(commands::load_config(&options)?)?;
            commands::handle_ping(&lookup).await?;
        }
        Some(Commands::Configure { token, temporary }) => {
            let lookup = commands::build_lookup(commands::load_config(&options)?)?;
            commands::handle_configure(&lookup, token, temporary).await?;
        }
        Some(Commands::Languages) => {
            commands::handle_languages();
        }
        Some(Commands::Server { host, port }) => {
            let lookup = commands::build_lookup(commands::load_config(&options)?)?;
            commands::handle_server(lookup, host, port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
