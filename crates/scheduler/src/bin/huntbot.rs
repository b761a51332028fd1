//! huntbot: polls job sources and relays new postings to a Slack channel.
//!
//! Runs one pass immediately, then repeats on the configured interval until
//! interrupted. `--once` runs a single pass and exits; `--dry-run` logs the
//! messages instead of posting them.

use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use huntbot_core::env::load_dotenv;
use huntbot_core::HuntbotConfig;
use huntbot_notify::{DeliveryChannel, Dispatcher, LogChannel, SlackChannel};
use huntbot_scheduler::{PassOutcome, Pipeline, Scheduler};
use huntbot_sources::{build_sweeps, Aggregator, LocationFilter, SearchProfile};

// ── CLI ─────────────────────────────────────────────────────────────

/// Job posting relay for Slack.
#[derive(Parser, Debug)]
#[command(name = "huntbot", version, about)]
struct Cli {
    /// Path to huntbot.toml config file.
    #[arg(long, env = "HUNTBOT_CONFIG", default_value = "config/huntbot.toml")]
    config: String,

    /// Run a single pass and exit.
    #[arg(long)]
    once: bool,

    /// Log notifications instead of posting them to Slack.
    #[arg(long)]
    dry_run: bool,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = HuntbotConfig::from_file_or_defaults(&cli.config)?;
    info!(path = %cli.config, "huntbot config ready");
    config.log_summary();

    // ── Sources ─────────────────────────────────────────────────────

    let sweeps = build_sweeps(&config.sources);
    if sweeps.is_empty() {
        tracing::warn!("no usable sources configured; passes will find nothing");
    }
    let aggregator = Aggregator::new(
        SearchProfile::from_config(&config.search),
        LocationFilter::new(&config.search.accepted_locations),
        sweeps,
        config.schedule.source_pause,
    );

    // ── Delivery ────────────────────────────────────────────────────

    let channel: Arc<dyn DeliveryChannel> = if cli.dry_run {
        info!("dry run: notifications will be logged, not posted");
        Arc::new(LogChannel::new())
    } else {
        Arc::new(SlackChannel::from_config(
            &config.slack.token,
            &config.slack.api_base,
        )?)
    };
    let dispatcher = Dispatcher::new(channel, config.schedule.send_pause);

    let mut pipeline = Pipeline::new(aggregator, dispatcher, config.slack.channel.clone());
    let mut scheduler = Scheduler::new(config.schedule.interval, config.schedule.cooldown);

    if cli.once {
        return match scheduler.run_once(&mut pipeline).await {
            PassOutcome::Completed(_) => Ok(()),
            PassOutcome::Failed(e) => Err(e.into()),
        };
    }

    // ── Run until interrupted ───────────────────────────────────────

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received, stopping after current pass");
            let _ = stop_tx.send(true);
        }
    });

    info!(channel = %config.slack.channel, "huntbot starting");
    scheduler.run(&mut pipeline, stop_rx).await;
    info!("huntbot exited cleanly");

    Ok(())
}
