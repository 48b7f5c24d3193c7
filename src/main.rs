//! # Goal Watch
//!
//! Watches the race for the European top-scorer title and announces who is
//! closest.
//!
//! ## Usage
//!
//! ```sh
//! goal_watch --once --dry-run
//! ```
//!
//! ## Architecture
//!
//! Each run is a straight line:
//! 1. **Scraping**: ranked scorers from footballdatabase.eu, then the scorer
//!    names from maxifoot.fr
//! 2. **Reconciling**: keep the ranked scorers whose last name maxifoot also lists
//! 3. **Announcing**: header plus the first five players, leaders' pictures attached
//! 4. **Publishing**: post to the configured endpoint, or print in dry-run mode
//!
//! Without `--once` the binary stays up and runs once a day.

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod engine;
mod errors;
mod models;
mod orchestrator;
mod outputs;
mod schedule;
mod scrapers;
mod utils;

use cli::Cli;
use config::{resolve_url, Settings};
use orchestrator::{Orchestrator, RunOutcome, RunSettings};
use outputs::{error_log::FileErrorLog, media::MediaResolver, publish::WebhookPublisher};
use scrapers::HttpExtractor;
use utils::{current_period_label, ensure_writable_dir};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("goal_watch starting up");

    let args = Cli::parse();
    debug!(config = ?args.config, dry_run = args.dry_run, once = args.once, "Parsed CLI arguments");

    // ---- Settings ----
    let settings = Settings::load(args.config.as_deref()).await?;
    let period_label = args
        .period
        .clone()
        .or_else(|| settings.period_label.clone())
        .unwrap_or_else(current_period_label);
    settings.validate(&period_label)?;
    info!(%period_label, dry_run = args.dry_run, "Configuration validated");
    if settings.publisher.endpoint.is_none() {
        warn!("No publisher endpoint configured; only dry runs can succeed");
    }

    if let Err(e) = ensure_writable_dir(&settings.error_log_dir).await {
        warn!(
            path = %settings.error_log_dir.display(),
            error = %e,
            "Error log directory is not writable; failures will only reach the console"
        );
    }

    // ---- Collaborators ----
    let client = Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let extractor = HttpExtractor::new(
        client.clone(),
        resolve_url("primary", &settings.primary.url, &period_label)?,
        resolve_url("secondary", &settings.secondary.url, &period_label)?,
        settings.primary.clone(),
        settings.secondary.clone(),
    );
    let endpoint = settings
        .publisher
        .endpoint
        .as_deref()
        .map(url::Url::parse)
        .transpose()?;
    let publisher = WebhookPublisher::new(client, endpoint, args.publish_token.clone());
    let error_log = FileErrorLog::new(&settings.error_log_dir);
    let media = MediaResolver::new(&settings.media.dir, &settings.media.extension);

    let orchestrator = Orchestrator::new(
        extractor,
        publisher,
        error_log,
        media,
        RunSettings {
            period_label,
            source_delay: Duration::from_millis(settings.source_delay_ms),
            goal_marker: settings.goal_marker.clone(),
            dry_run: args.dry_run,
        },
    );

    if args.once {
        return match orchestrator.run_once().await {
            RunOutcome::Published { leaders, media } => {
                info!(leaders, media, "Announcement published");
                Ok(())
            }
            RunOutcome::ExtractionFailed | RunOutcome::PublishFailed => {
                Err("run failed; see the error log".into())
            }
            _ => Ok(()),
        };
    }

    info!(
        hour = settings.schedule.hour,
        minute = settings.schedule.minute,
        "Running daily"
    );
    let orchestrator = &orchestrator;
    schedule::run_daily(settings.schedule, move || async move {
        orchestrator.run_once().await;
    })
    .await;

    Ok(())
}
