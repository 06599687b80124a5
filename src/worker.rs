//! Background chart generation
//!
//! Chart jobs go through a bounded queue to a serving task that builds one
//! chart at a time on tokio's blocking pool. Outcomes are posted back on a
//! bounded channel read by the single owner of presentation state. Jobs carry
//! owned record clones, so nothing is shared or locked across threads.
//!
//! ```text
//! owner ──submit──> [jobs: capacity] ──> serve ──spawn_blocking──> build_chart
//!   ^                                                                   │
//!   └──────────────── [outcomes: capacity] <── ChartOutcome ────────────┘
//! ```
//!
//! An owner that stops taking outcomes stalls the worker: once both channels
//! are full, [`ChartWorker::submit`] waits. At most `2 * capacity + 1` jobs
//! can be outstanding before that happens.
//!
//! Dropping the [`ChartWorker`] closes the queue and stops the serving task.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::charts::{build_chart, ChartData, ChartKind};
use crate::config::DEFAULT_WORKER_QUEUE_CAPACITY;
use crate::experiment::ExperimentRecord;
use crate::{Error, Result};

/// Identifier handed out by [`ChartWorker::submit`].
pub type JobId = u64;

/// A chart build request.
#[derive(Debug, Clone)]
pub struct ChartJob {
    /// Job identifier
    pub id: JobId,
    /// Figure to build
    pub kind: ChartKind,
    /// Records the figure is built from
    pub records: Vec<ExperimentRecord>,
}

/// Result of a chart job, posted back to the owner.
#[derive(Debug)]
pub struct ChartOutcome {
    /// Job identifier
    pub id: JobId,
    /// Figure that was requested
    pub kind: ChartKind,
    /// Chart data or the reason it could not be built
    pub result: Result<ChartData>,
}

/// Handle to the background chart worker.
///
/// Must be created inside a tokio runtime.
pub struct ChartWorker {
    jobs: mpsc::Sender<ChartJob>,
    outcomes: mpsc::Receiver<ChartOutcome>,
    next_id: JobId,
    pending: usize,
}

impl ChartWorker {
    /// Spawn a worker with the default queue capacity.
    #[must_use]
    pub fn spawn() -> Self {
        Self::with_capacity(DEFAULT_WORKER_QUEUE_CAPACITY)
    }

    /// Spawn a worker whose queue holds at most `capacity` waiting jobs.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or when called outside a tokio runtime.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (job_tx, job_rx) = mpsc::channel(capacity);
        let (outcome_tx, outcome_rx) = mpsc::channel(capacity);
        tokio::spawn(serve(job_rx, outcome_tx));
        Self {
            jobs: job_tx,
            outcomes: outcome_rx,
            next_id: 0,
            pending: 0,
        }
    }

    /// Queue a chart job.
    ///
    /// Waits while the queue is full. Cancel safe: a cancelled call queues
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerClosed`] if the serving task has stopped.
    pub async fn submit(&mut self, kind: ChartKind, records: Vec<ExperimentRecord>) -> Result<JobId> {
        let id = self.next_id;
        self.jobs
            .send(ChartJob { id, kind, records })
            .await
            .map_err(|_| Error::WorkerClosed)?;
        self.next_id += 1;
        self.pending += 1;
        debug!(id, %kind, "chart job queued");
        Ok(id)
    }

    /// Wait for the next finished job.
    ///
    /// Returns `None` once nothing is pending.
    pub async fn next_outcome(&mut self) -> Option<ChartOutcome> {
        if self.pending == 0 {
            return None;
        }
        let outcome = self.outcomes.recv().await?;
        self.pending -= 1;
        Some(outcome)
    }

    /// Take a finished job without waiting, for frame-driven front ends.
    pub fn try_next_outcome(&mut self) -> Option<ChartOutcome> {
        let outcome = self.outcomes.try_recv().ok()?;
        self.pending -= 1;
        Some(outcome)
    }

    /// Jobs submitted whose outcome has not been taken yet.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// True while any job is outstanding (drives a busy indicator).
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.pending > 0
    }
}

async fn serve(mut jobs: mpsc::Receiver<ChartJob>, outcomes: mpsc::Sender<ChartOutcome>) {
    while let Some(ChartJob { id, kind, records }) = jobs.recv().await {
        let result = tokio::task::spawn_blocking(move || build_chart(kind, &records))
            .await
            .unwrap_or_else(|e| Err(Error::ChartTask(e.to_string())));
        if let Err(error) = &result {
            warn!(id, %kind, %error, "chart job failed");
        }
        if outcomes.send(ChartOutcome { id, kind, result }).await.is_err() {
            debug!(id, "chart outcome dropped, owner is gone");
            break;
        }
    }
    debug!("chart queue closed, worker stopping");
}
