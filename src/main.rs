use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use tron_transfer_exporter::config::ExporterConfig;
use tron_transfer_exporter::exporter::Exporter;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: A plain positional interface keeps the binary honest for now; a richer
    //      CLI would reach for the clap crate.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: tron-transfer-exporter [config].toml [output].csv [start_date] [end_date] [log_level]");
        eprintln!("Dates use \"yyyy-mm-dd hh:mm:ss\" in the configured time zone");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let config_path = &args[1];
    let output_path = &args[2];
    let log_level = args.get(5)
        .map(|level| parse_log_level(level)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let config = ExporterConfig::load(config_path)?;
    let start_ts = args.get(3).map(|date| config.parse_local_date(date)).transpose()?;
    let end_ts = args.get(4).map(|date| config.parse_local_date(date)).transpose()?;

    let exporter = Exporter::new(config);

    let timer = Instant::now();
    exporter.export_csv(output_path, start_ts, end_ts).await?;
    let duration = timer.elapsed();

    info!("Exported wallet transfers in: {duration:?}");

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Progress output goes to stderr so a piped CSV stays clean
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
