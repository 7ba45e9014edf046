//! # Snapshot Writer
//!
//! Background task that persists snapshots handed over by the state store.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Snapshot Writer                                   │
//! │                                                                         │
//! │  TrackerState mutator                                                   │
//! │       │ sink.commit(&snapshot)   (sync, never blocks)                   │
//! │       ▼                                                                 │
//! │  ┌──────────────┐  unbounded   ┌──────────────────────────────────┐     │
//! │  │SnapshotWriter│ ───────────► │ writer task                      │     │
//! │  └──────────────┘   channel    │                                  │     │
//! │                                │  recv Save(s1)                   │     │
//! │  SnapshotWriterHandle          │  drain queued: Save(s2), Save(s3)│     │
//! │       │ shutdown()             │  save(s3) only  (coalesced)      │     │
//! │       └──────────────────────► │  Shutdown → final save, exit     │     │
//! │                                └───────────────┬──────────────────┘     │
//! │                                                ▼                        │
//! │                                     SnapshotRepository::save            │
//! │                                                                         │
//! │  A failed save is logged and the next snapshot is tried as usual.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every snapshot is complete, so skipping the older ones in a burst loses
//! nothing.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::snapshot::SnapshotRepository;
use stocktally_core::{Snapshot, SnapshotSink};

/// Messages for the writer task.
#[derive(Debug)]
enum WriterCommand {
    /// Persist this snapshot (or a newer one, if queued).
    Save(Box<Snapshot>),
    /// Write whatever is still queued, then stop.
    Shutdown,
}

/// Counters reported when the writer stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Snapshots received from the state store.
    pub received: u64,
    /// Successful saves.
    pub saved: u64,
    /// Snapshots skipped because a newer one was queued behind them.
    pub coalesced: u64,
    /// Saves that failed.
    pub failed: u64,
}

// =============================================================================
// Sink Side
// =============================================================================

/// The persistence sink handed to `TrackerState`.
///
/// ## Usage
/// ```rust,ignore
/// let (writer, handle) = SnapshotWriter::spawn(db.snapshots());
/// let mut state = TrackerState::from_snapshot(snapshot, writer);
///
/// state.add_store("Airport");      // queued, returns immediately
///
/// drop(state);
/// let stats = handle.shutdown().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<WriterCommand>,
}

impl SnapshotWriter {
    /// Starts the writer task on the current tokio runtime.
    pub fn spawn(repo: SnapshotRepository) -> (SnapshotWriter, SnapshotWriterHandle) {
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(repo, rx));
        info!("Snapshot writer started");

        (
            SnapshotWriter { tx: tx.clone() },
            SnapshotWriterHandle { tx, task },
        )
    }
}

impl SnapshotSink for SnapshotWriter {
    fn commit(&self, snapshot: &Snapshot) {
        if self
            .tx
            .send(WriterCommand::Save(Box::new(snapshot.clone())))
            .is_err()
        {
            warn!("Snapshot writer stopped, change not persisted");
        }
    }
}

// =============================================================================
// Control Side
// =============================================================================

/// Handle for stopping the writer and waiting for the final save.
#[derive(Debug)]
pub struct SnapshotWriterHandle {
    tx: mpsc::UnboundedSender<WriterCommand>,
    task: JoinHandle<WriterStats>,
}

impl SnapshotWriterHandle {
    /// Writes any queued snapshot, stops the task and returns its counters.
    ///
    /// Snapshots committed after this call are dropped with a warning.
    pub async fn shutdown(self) -> DbResult<WriterStats> {
        // The task may already be gone; joining below reports why.
        let _ = self.tx.send(WriterCommand::Shutdown);

        self.task
            .await
            .map_err(|e| DbError::WriterStopped(e.to_string()))
    }
}

// =============================================================================
// Writer Task
// =============================================================================

async fn run(
    repo: SnapshotRepository,
    mut rx: mpsc::UnboundedReceiver<WriterCommand>,
) -> WriterStats {
    let mut stats = WriterStats::default();

    while let Some(command) = rx.recv().await {
        let mut latest = match command {
            WriterCommand::Save(snapshot) => {
                stats.received += 1;
                Some(snapshot)
            }
            WriterCommand::Shutdown => None,
        };
        let mut stopping = latest.is_none();

        // Everything already queued is older than the last queued snapshot.
        while let Ok(next) = rx.try_recv() {
            match next {
                WriterCommand::Save(snapshot) => {
                    stats.received += 1;
                    if latest.replace(snapshot).is_some() {
                        stats.coalesced += 1;
                    }
                }
                WriterCommand::Shutdown => stopping = true,
            }
        }

        if let Some(snapshot) = latest {
            match repo.save(&snapshot).await {
                Ok(()) => {
                    stats.saved += 1;
                    debug!(saved = stats.saved, "Snapshot persisted");
                }
                Err(e) => {
                    stats.failed += 1;
                    error!(error = %e, "Failed to persist snapshot");
                }
            }
        }

        if stopping {
            break;
        }
    }

    info!(
        received = stats.received,
        saved = stats.saved,
        coalesced = stats.coalesced,
        failed = stats.failed,
        "Snapshot writer stopped"
    );

    stats
}

// =============================================================================
// Unit Tests
// =============================================================================
