//! Periodic snapshot scheduler.
//!
//! The scheduler is a two-state machine: it is armed in the `Idle`
//! state, and [`Scheduler::run`] moves it to `Running`, performs one
//! build-and-publish cycle immediately, then repeats on a fixed
//! interval. Each tick reads the clock once, builds a complete
//! snapshot, swaps it into the store and fans it out to subscribers.
//!
//! A tick can never corrupt the store: the builder always returns a
//! whole snapshot (per-field faults degrade to absent values), and a
//! failed fan-out is logged without touching the stored value or the
//! following ticks. The loop has no terminal state short of process
//! shutdown; the only fatal condition is failing to arm the timer at
//! startup (a zero interval), which aborts before the loop begins.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use skywatch_core::snapshot::AstroSnapshot;
use skywatch_core::{build_snapshot, SkywatchConfig};
use skywatch_observer::AppState;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::awtrix::AwtrixClient;
use crate::report;

/// Lifecycle phase of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// Armed but not yet ticking.
    Idle,
    /// Ticking on the configured interval.
    Running,
}

/// Errors that prevent the scheduler from being armed.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The configured update interval cannot drive a timer.
    #[error("update interval must be at least 1 second (got {seconds})")]
    InvalidInterval {
        /// The rejected interval value.
        seconds: u64,
    },
}

/// Result of one build-and-publish cycle.
#[derive(Debug)]
pub struct TickOutcome {
    /// The snapshot built this tick.
    pub snapshot: AstroSnapshot,
    /// Number of subscriber channels the payload reached.
    pub delivered: usize,
}

/// Periodic driver of the snapshot pipeline.
#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    latitude_deg: f64,
    phase: SchedulerPhase,
}

impl Scheduler {
    /// Arm a scheduler from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidInterval`] if the configured
    /// interval is zero -- the engine must abort startup rather than
    /// run silently without data.
    pub fn from_config(config: &SkywatchConfig) -> Result<Self, SchedulerError> {
        let seconds = config.schedule.update_interval_secs;
        if seconds == 0 {
            return Err(SchedulerError::InvalidInterval { seconds });
        }
        Ok(Self {
            interval: Duration::from_secs(seconds),
            latitude_deg: config.site.latitude,
            phase: SchedulerPhase::Idle,
        })
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    /// The fixed tick interval.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Perform one build-and-publish cycle at the current instant.
    ///
    /// Reads the clock once, builds the snapshot, replaces the store
    /// value and broadcasts to all current subscribers.
    pub async fn tick_once(&self, state: &AppState) -> TickOutcome {
        let now = Utc::now();
        let snapshot = build_snapshot(now, self.latitude_deg);
        let delivered = state.publish_snapshot(snapshot.clone()).await;
        TickOutcome {
            snapshot,
            delivered,
        }
    }

    /// Run the tick loop forever.
    ///
    /// Transitions to `Running`, ticks once immediately, then on every
    /// interval boundary. Missed ticks are delayed, not bunched. Each
    /// tick logs the full report and, when a matrix client is present,
    /// pushes display values to it; neither can stop the loop.
    pub async fn run(mut self, state: Arc<AppState>, matrix: Option<AwtrixClient>) {
        self.phase = SchedulerPhase::Running;
        info!(
            interval_secs = self.interval.as_secs(),
            latitude = self.latitude_deg,
            "Scheduler entering Running state"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // The first tick completes immediately; the startup cycle
            // and the recurring cycle share one code path.
            ticker.tick().await;

            info!("=== Scheduled update starting ===");
            let outcome = self.tick_once(&state).await;
            report::log_report(&outcome.snapshot, self.latitude_deg);

            if let Some(client) = &matrix {
                client.push_snapshot(&outcome.snapshot).await;
                let (succeeded, failed) = client.stats();
                info!(succeeded, failed, "Matrix update summary");
            }

            info!(
                subscribers_reached = outcome.delivered,
                "=== Scheduled update completed ==="
            );
        }
    }
}
