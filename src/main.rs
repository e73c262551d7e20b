//! geode-pilot: A terminal UI for Apache Geode clusters

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use geode_pilot_core::ConsoleConfig;
use geode_pilot_core::constants::DEFAULT_PAGE_LIMIT;
use geode_pilot_tui::App;
use geode_rs::{ConfigError, Context, GeodeClient, GeodeConfig};
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};

/// geode-pilot: Terminal UI for Apache Geode clusters
#[derive(Parser, Debug)]
#[command(name = "geode-pilot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Context to use (from ~/.geode/config)
    #[arg(short, long)]
    context: Option<String>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data-browser endpoint, overriding the config (e.g. localhost:8080)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log file path (default: /tmp/geode-pilot.log)
    #[arg(long, default_value = "/tmp/geode-pilot.log")]
    log_file: String,

    /// Entries fetched per data page
    #[arg(short, long, default_value_t = DEFAULT_PAGE_LIMIT)]
    page_size: u32,

    /// Seconds between cluster status polls
    #[arg(long, default_value = "5")]
    poll_secs: u64,
}

/// Pick the target: --endpoint, then the config file, then localhost
fn resolve_context(cli: &Cli) -> Result<Context> {
    if let Some(endpoint) = &cli.endpoint {
        return Ok(Context::from_endpoint(endpoint));
    }

    let loaded = match &cli.config {
        Some(path) => GeodeConfig::load_from(path).map(Some),
        None => match GeodeConfig::load_default() {
            Err(ConfigError::NotFound(path)) if cli.context.is_none() => {
                tracing::info!("No config at {}, using defaults", path.display());
                Ok(None)
            }
            other => other.map(Some),
        },
    }
    .wrap_err("failed to load config")?;

    let Some(config) = loaded else {
        return Ok(Context::default());
    };
    let context = match &cli.context {
        Some(name) => config.get_context(name)?.clone(),
        None => config
            .current_context()
            .cloned()
            .unwrap_or_default(),
    };
    Ok(context)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging to file (not stdout, which would corrupt TUI)
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let log_file = File::create(&cli.log_file)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    tracing::info!("Starting geode-pilot");

    let context = resolve_context(&cli)?;
    let api_root = context.api_root();
    tracing::info!("Using data browser at {}", api_root);

    let client = GeodeClient::connect(&api_root, context.timeout())?;
    let config = ConsoleConfig {
        poll_interval: Duration::from_secs(cli.poll_secs.max(1)),
        page_limit: cli.page_size.max(1),
        ..ConsoleConfig::default()
    };

    let mut app = App::new(client, config);
    app.run().await?;

    tracing::info!("Goodbye!");
    Ok(())
}
