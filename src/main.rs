//! Dark Risk Radar CLI
//!
//! Interactive terminal that scores companies for hidden risk.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;

use dark_risk_radar::utils::{load_config, Config};
use dark_risk_radar::{run_session, GoogleNewsFeed, RiskRadar, YahooClient};

#[derive(Parser)]
#[command(name = "dark-risk-radar")]
#[command(about = "Hidden-risk radar for public and private companies")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "radar.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write a sample configuration file and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the report stays readable
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Some(path) = cli.init_config {
        Config::create_sample_config(&path)?;
        println!("Sample configuration written to {}", path.display());
        return Ok(());
    }

    let config = load_config(&cli.config)?;
    let classifier = config
        .build_classifier()
        .context("Failed to set up the sentiment classifier")?;
    info!("Using sentiment engine: {}", classifier.name());

    let radar = RiskRadar::new(
        Box::new(YahooClient::from_config(&config.data)),
        Box::new(YahooClient::from_config(&config.data)),
        Box::new(GoogleNewsFeed::from_config(&config.data)),
        classifier,
    )
    .with_limits(&config.data);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&radar, stdin.lock(), stdout.lock()).context("Terminal I/O failed")?;

    Ok(())
}
