use anyhow::{Context, Result};
use clap::Parser;
use pwrstat_exporter::{config::Config, pwrstat::StatusSource, server};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Address on which to expose metrics and web interface (overrides config)
    #[arg(long = "web.listen-address", env = "PWRSTAT_WEB_LISTEN_ADDRESS")]
    listen_address: Option<String>,

    /// Path under which to expose metrics (overrides config)
    #[arg(long = "web.telemetry-path", env = "PWRSTAT_WEB_TELEMETRY_PATH")]
    telemetry_path: Option<String>,

    /// Read the UPS report from a captured file instead of running pwrstat
    #[arg(long, env = "PWRSTAT_REPLAY_FILE")]
    replay_file: Option<PathBuf>,

    /// Print the parsed UPS status as JSON and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(listen_address) = args.listen_address {
        config.server.listen_address = listen_address;
    }
    if let Some(telemetry_path) = args.telemetry_path {
        config.server.metrics_path = telemetry_path;
    }
    if let Some(replay_file) = args.replay_file {
        config.source.replay_file = Some(replay_file);
    }

    config.validate().context("Invalid configuration")?;

    if args.once {
        let source = StatusSource::from(&config.source);
        let record = tokio::task::spawn_blocking(move || source.fetch()).await??;
        println!("{}", record.to_json()?);
        return Ok(());
    }

    info!(
        "Starting pwrstat Prometheus Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Configuration loaded successfully");

    // Start the metrics server
    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
