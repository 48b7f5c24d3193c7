//! One run, from the two scrapes to the published announcement.
//!
//! ```text
//! Idle -> Extracting(Primary) -> Extracting(Secondary) -> Reconciling
//!      -> SelectingLeaders -> ResolvingMedia -> Publishing -> Idle
//! ```
//!
//! Extraction failures abort the run and go to the error log. An empty
//! roster ends the run quietly. Missing pictures only drop that picture. A
//! publishing failure is logged and the run ends; nothing is ever retried
//! and nothing propagates out of [`Orchestrator::run_once`].

use crate::engine::announce;
use crate::engine::leaders::select_leaders;
use crate::engine::reconcile::{reconcile, records_from_rows, validity_keys};
use crate::errors::{EmptyRosterError, RunError};
use crate::models::Post;
use crate::outputs::error_log::ErrorSink;
use crate::outputs::media::MediaResolver;
use crate::outputs::publish::Publisher;
use crate::scrapers::Extractor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

/// Which page is being scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Secondary,
}

/// Stages of a run, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Extracting(Source),
    Reconciling,
    SelectingLeaders,
    ResolvingMedia,
    Publishing,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Published { leaders: usize, media: usize },
    /// Dry-run mode: the text that would have been published.
    DryRun { text: String },
    NothingToReport,
    ExtractionFailed,
    PublishFailed,
    /// Another run was still in progress.
    Skipped,
}

/// Per-run knobs that do not belong to a collaborator.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub period_label: String,
    pub source_delay: Duration,
    pub goal_marker: String,
    pub dry_run: bool,
}

pub struct Orchestrator<E, P, S> {
    extractor: E,
    publisher: P,
    errors: S,
    media: MediaResolver,
    settings: RunSettings,
    running: AtomicBool,
}

/// Clears the in-progress flag however the run ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<E, P, S> Orchestrator<E, P, S>
where
    E: Extractor,
    P: Publisher,
    S: ErrorSink,
{
    pub fn new(extractor: E, publisher: P, errors: S, media: MediaResolver, settings: RunSettings) -> Self {
        Self {
            extractor,
            publisher,
            errors,
            media,
            settings,
            running: AtomicBool::new(false),
        }
    }

    /// Execute one complete run. Overlapping calls are skipped.
    #[instrument(level = "info", skip_all, fields(period = %self.settings.period_label))]
    pub async fn run_once(&self) -> RunOutcome {
        if self.running.swap(true, Ordering::AcqRel) {
            info!("A run is already in progress; skipping this one");
            return RunOutcome::Skipped;
        }
        let _guard = RunGuard(&self.running);

        let t0 = Instant::now();
        let outcome = self.run().await;
        transition(RunState::Idle);
        info!(?outcome, elapsed_ms = t0.elapsed().as_millis() as u64, "Run finished");
        outcome
    }

    async fn run(&self) -> RunOutcome {
        transition(RunState::Extracting(Source::Primary));
        let rows = match self.extractor.primary().await {
            Ok(rows) => rows,
            Err(e) => return self.abort(e.into()).await,
        };
        let primary = records_from_rows(rows);

        if !self.settings.source_delay.is_zero() {
            sleep(self.settings.source_delay).await;
        }

        transition(RunState::Extracting(Source::Secondary));
        let names = match self.extractor.secondary().await {
            Ok(names) => names,
            Err(e) => return self.abort(e.into()).await,
        };
        let keys = validity_keys(names);
        if keys.is_empty() {
            info!("Secondary source yielded no usable names");
        }

        transition(RunState::Reconciling);
        let roster = reconcile(&primary, &keys);
        if roster.is_empty() {
            info!(primary = primary.len(), keys = keys.len(), "No players in both lists; nothing to report");
            return RunOutcome::NothingToReport;
        }
        let text = announce::format(&roster, &self.settings.period_label, &self.settings.goal_marker);

        transition(RunState::SelectingLeaders);
        let leaders = match select_leaders(&roster) {
            Ok(leaders) => leaders,
            Err(EmptyRosterError) => {
                info!("No leaders; nothing to report");
                return RunOutcome::NothingToReport;
            }
        };
        info!(
            count = leaders.len(),
            goals = leaders[0].goal_count,
            "Selected leaders"
        );

        transition(RunState::ResolvingMedia);
        let media = self.media.resolve_all(&leaders).await;

        transition(RunState::Publishing);
        let post = Post { text, media };
        if self.settings.dry_run {
            info!("Dry run; not publishing");
            println!("{}", post.text);
            return RunOutcome::DryRun { text: post.text };
        }

        match self.publisher.publish(&post).await {
            Ok(()) => RunOutcome::Published {
                leaders: leaders.len(),
                media: post.media.len(),
            },
            Err(e) => {
                error!(error = %e, "Failed to publish announcement");
                self.errors.record(&e.into()).await;
                RunOutcome::PublishFailed
            }
        }
    }

    async fn abort(&self, failure: RunError) -> RunOutcome {
        error!(stage = failure.stage(), error = %failure, "Run aborted");
        self.errors.record(&failure).await;
        RunOutcome::ExtractionFailed
    }
}

fn transition(state: RunState) {
    debug!(?state, "Entering state");
}
