//! keyramp - analog joystick axes from digital key chords

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keyramp::cli;
use keyramp::config::AppConfig;
use keyramp::driver::{AxisController, ConsoleSink, DriverLoop, TickClock};
use keyramp::input::{IdleInput, ScriptedInput};

/// keyramp - Ramp analog axes from held key chords
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "KEYRAMP_CONFIG", default_value = "config.yaml")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Validate the configuration, print the axis partitions and exit
    #[arg(long)]
    check: bool,

    /// Replay held keys from a YAML input script instead of idling
    #[arg(long)]
    script: Option<String>,

    /// Tick cadence in milliseconds (overrides driver.cadence_ms)
    #[arg(long)]
    cadence_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting keyramp...");
    info!("Configuration file: {}", args.config);

    let config = AppConfig::load(&args.config).await?;
    let axes = config.build_axes()?;
    info!("Configuration loaded: {} axes", axes.len());

    if args.check {
        cli::print_partitions(&axes);
        return Ok(());
    }

    let cadence_ms = args.cadence_ms.unwrap_or(config.driver.cadence_ms);
    if cadence_ms == 0 {
        anyhow::bail!("Cadence must be greater than zero");
    }
    let cadence = Duration::from_millis(cadence_ms);

    let controller = AxisController::new(axes, config.keys.clone());
    let mut sink = ConsoleSink::new();

    let ticks = match &args.script {
        Some(path) => {
            let mut input = ScriptedInput::load(path).await?;
            info!("Replaying input script {} ({} ticks)", path, input.total_ticks());
            DriverLoop::new(controller, cadence, TickClock::Fixed)
                .run(&mut input, &mut sink, shutdown_signal())
                .await?
        }
        None => {
            let mut input = IdleInput;
            DriverLoop::new(controller, cadence, TickClock::Realtime)
                .run(&mut input, &mut sink, shutdown_signal())
                .await?
        }
    };

    info!("keyramp shutdown complete after {} ticks", ticks);
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
