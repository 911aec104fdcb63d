use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tvguide_collector::{
    collector::collect_schedules,
    config::Config,
    output::write_csv,
    sources::ScheduleSourceFactory,
};

#[derive(Parser)]
#[command(name = "tvguide-collector")]
#[command(version)]
#[command(about = "Collects TV broadcast schedules into a single CSV file")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Output CSV path (overrides config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Channels to collect, comma-separated slugs (overrides config file)
    #[arg(long, value_name = "SLUGS", value_delimiter = ',')]
    channels: Option<Vec<String>>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("tvguide_collector={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting TV guide collector v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if let Some(channels) = cli.channels {
        config.collection.channels = channels;
    }

    let sources = ScheduleSourceFactory::create_enabled(&config.collection)?;
    info!("Collecting {} channels", sources.len());

    let entries = collect_schedules(&sources).await;
    write_csv(&entries, &config.output.path).await?;

    info!(
        "Done: {} entries across {} channels written to {}",
        entries.len(),
        sources.len(),
        config.output.path.display()
    );
    Ok(())
}
