//! CLI command definitions and handlers

use clap::Subcommand;
use std::io::Read;
use tracing::info;

use crate::core::client::PushClient;
use crate::core::config::LookupConfig;
use crate::core::languages::{supported_languages, Language};
use crate::core::lookup::JuremyLookup;
use crate::core::models::PushOutcome;

/// Commands for the Juremy push client
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Push a segment to the open Juremy session
    Push {
        /// Source language, e.g. en or en-GB
        #[arg(short, long)]
        source: String,

        /// Target language, e.g. hu
        #[arg(short, long)]
        target: String,

        /// Segment text (read from stdin if omitted)
        #[arg(long)]
        text: Option<String>,
    },

    /// Set up routing and check that Juremy is listening
    Ping,

    /// Store the app token and check the connection
    Configure {
        /// App token shown in Juremy
        #[arg(long)]
        token: String,

        /// Keep the token for this run only
        #[arg(long)]
        temporary: bool,
    },

    /// List supported languages
    Languages,

    /// Start the local HTTP bridge
    Server {
        /// Bind address (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port (default: 8421)
        #[arg(short, long, default_value_t = 8421)]
        port: u16,
    },
}

/// Settings shared by all commands
#[derive(Debug, Default)]
pub struct GlobalOptions {
    pub config: Option<std::path::PathBuf>,
    pub base_url: Option<String>,
    pub app_token: Option<String>,
}

/// Resolve configuration: file, then environment, then flags
pub fn load_config(options: &GlobalOptions) -> anyhow::Result<LookupConfig> {
    let mut config = match &options.config {
        Some(path) => LookupConfig::from_file(path)?,
        None => LookupConfig::default(),
    };
    config.apply_env()?;

    if let Some(base_url) = &options.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(token) = &options.app_token {
        config.token_override = Some(token.clone());
    }

    Ok(config)
}

/// Build the lookup from resolved configuration
pub fn build_lookup(config: LookupConfig) -> anyhow::Result<JuremyLookup> {
    let credentials = config.credentials()?;
    let client = PushClient::new(config, credentials)?;
    Ok(JuremyLookup::new(client))
}

/// Handle push command
pub async fn handle_push(
    lookup: &JuremyLookup,
    source: String,
    target: String,
    text: Option<String>,
) -> anyhow::Result<()> {
    let source = Language::parse(&source)?;
    let target = Language::parse(&target)?;

    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            strip_line_ending(&buf).to_string()
        }
    };
    let text = text.as_str();
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to push: text is empty");
    }

    info!("Pushing {} -> {} ({} chars)", source, target, text.chars().count());

    match lookup.client().push_search(&source, &target, text).await? {
        PushOutcome::Delivered => println!("✅ Search pushed to Juremy"),
        PushOutcome::Superseded => println!("⏭️  Search superseded by a newer one"),
    }

    Ok(())
}

/// Drop the newline that ends piped input
fn strip_line_ending(input: &str) -> &str {
    input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .unwrap_or(input)
}

/// Handle ping command
pub async fn handle_ping(lookup: &JuremyLookup) -> anyhow::Result<()> {
    lookup.client().setup_route_and_ping().await?;
    println!("✅ Connected to Juremy");
    Ok(())
}

/// Handle configure command
pub async fn handle_configure(
    lookup: &JuremyLookup,
    token: String,
    temporary: bool,
) -> anyhow::Result<()> {
    lookup.configure(&token, temporary).await?;

    if temporary {
        println!("✅ Token accepted (not saved)");
    } else {
        println!(
            "✅ Token accepted and saved to {}",
            lookup.client().config().credentials_path.display()
        );
    }

    Ok(())
}

/// Handle languages command
pub fn handle_languages() {
    println!("Supported languages:");
    for (two, three) in supported_languages() {
        println!("   {}  {}", two, three);
    }
}

/// Handle server command
pub async fn handle_server(lookup: JuremyLookup, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP bridge on {}:{}", host, port);
    println!("🚀 Bridge listening on http://{}:{}", host, port);

    run_server(host, port, lookup).await?;

    Ok(())
}
