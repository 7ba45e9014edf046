//! # stocktally-db: Persistence Bridge for Stock Tally
//!
//! Keeps the tracker snapshot in SQLite. The state store never waits on it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stock Tally Data Flow                            │
//! │                                                                         │
//! │  stocktally CLI                                                         │
//! │       │ startup: load            every mutation: commit                 │
//! │       ▼                                   │                             │
//! │  ┌────────────────────────────────────────┼────────────────────────┐    │
//! │  │                 stocktally-db (THIS CRATE)                      │    │
//! │  │                                        ▼                        │    │
//! │  │   ┌───────────────┐    ┌───────────────────┐   ┌─────────────┐  │    │
//! │  │   │   Database    │    │  SnapshotWriter   │   │ Migrations  │  │    │
//! │  │   │   (pool.rs)   │    │   (writer.rs)     │   │ (embedded)  │  │    │
//! │  │   │               │    │  queue, coalesce  │   │             │  │    │
//! │  │   │ SqlitePool    │◄───│        │          │   │ 001_initial │  │    │
//! │  │   │               │    │        ▼          │   │             │  │    │
//! │  │   │               │◄───│ SnapshotRepository│   │             │  │    │
//! │  │   └───────────────┘    └───────────────────┘   └─────────────┘  │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     SQLite Database                             │    │
//! │  │        <platform data dir>/stocktally/stocktally.db             │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Snapshot repository
//! - [`writer`] - Background snapshot writer (the state store's sink)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stocktally_core::TrackerState;
//! use stocktally_db::{Database, DbConfig, SnapshotWriter};
//!
//! let db = Database::new(DbConfig::new("stocktally.db")).await?;
//! let snapshot = db.snapshots().load().await?;
//!
//! let (writer, handle) = SnapshotWriter::spawn(db.snapshots());
//! let mut state = TrackerState::from_snapshot(snapshot, writer);
//! state.ensure_initial_store();
//!
//! drop(state);
//! handle.shutdown().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod writer;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::snapshot::SnapshotRepository;
pub use writer::{SnapshotWriter, SnapshotWriterHandle, WriterStats};
