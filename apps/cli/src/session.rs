//! # Session
//!
//! One command invocation's worth of application state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open()                                                                 │
//! │    Database::new ─► SnapshotRepository::load ─► SnapshotWriter::spawn   │
//! │    ─► TrackerState::from_snapshot(snapshot, writer)                     │
//! │    ─► ensure_initial_store                                              │
//! │                                                                         │
//! │  commands mutate `state`; every commit is queued on the writer          │
//! │                                                                         │
//! │  close()                                                                │
//! │    drop state ─► writer.shutdown() (final save) ─► Database::close      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stocktally_core::{StoreId, TrackerState};
use stocktally_db::{Database, DbConfig, SnapshotWriter, SnapshotWriterHandle, WriterStats};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Loaded state plus the database it persists to.
pub struct Session {
    pub config: AppConfig,
    pub state: TrackerState,
    db: Database,
    writer: SnapshotWriterHandle,
}

impl Session {
    /// Opens the configured database file, creating it when missing.
    pub async fn open(config: AppConfig) -> CliResult<Self> {
        let path = config.database_path()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::new(DbConfig::new(path)).await?;
        Self::start(config, db).await
    }

    /// Opens a session on a fresh in-memory database.
    pub async fn in_memory(config: AppConfig) -> CliResult<Self> {
        let db = Database::new(DbConfig::in_memory()).await?;
        Self::start(config, db).await
    }

    async fn start(config: AppConfig, db: Database) -> CliResult<Self> {
        let snapshot = db.snapshots().load().await?;
        info!(
            stores = snapshot.stores.len(),
            products = snapshot.products.len(),
            sales = snapshot.sales.len(),
            "Snapshot loaded"
        );

        let (writer, handle) = SnapshotWriter::spawn(db.snapshots());
        let mut state = TrackerState::from_snapshot(snapshot, writer);

        if let Some(id) = state.ensure_initial_store() {
            debug!(store_id = %id, "Created initial store");
        }

        Ok(Session {
            config,
            state,
            db,
            writer: handle,
        })
    }

    /// Id of the selected store, if it exists.
    pub fn selected_store(&self) -> CliResult<StoreId> {
        self.state
            .selected_store()
            .map(|store| store.id.clone())
            .ok_or(CliError::NoStoreSelected)
    }

    /// Flushes pending writes and hands back the database, still open.
    pub async fn finish(self) -> CliResult<(Database, WriterStats)> {
        let Session {
            state, db, writer, ..
        } = self;

        // The state owns the last sender clone used for commits.
        drop(state);
        let stats = writer.shutdown().await?;

        Ok((db, stats))
    }

    /// Flushes pending writes and closes the database.
    pub async fn close(self) -> CliResult<WriterStats> {
        let (db, stats) = self.finish().await?;
        db.close().await;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocktally_core::DEFAULT_STORE_NAME;

    #[tokio::test]
    async fn test_open_creates_initial_store() {
        let session = Session::in_memory(AppConfig::default()).await.unwrap();

        let store = session.selected_store().unwrap();
        assert_eq!(session.state.store(&store).unwrap().name, DEFAULT_STORE_NAME);
    }

    #[tokio::test]
    async fn test_finish_persists_changes() {
        let mut session = Session::in_memory(AppConfig::default()).await.unwrap();
        session.state.add_store("Airport");
        let expected = session.state.snapshot();

        let (db, stats) = session.finish().await.unwrap();

        assert_eq!(stats.failed, 0);
        assert_eq!(db.snapshots().load().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_dangling_selection_is_not_a_store() {
        let mut session = Session::in_memory(AppConfig::default()).await.unwrap();
        session.state.select_store(StoreId::new("gone"));

        assert!(matches!(
            session.selected_store(),
            Err(CliError::NoStoreSelected)
        ));
    }
}
