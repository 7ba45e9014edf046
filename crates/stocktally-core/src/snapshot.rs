//! # Snapshot & Persistence Hooks
//!
//! The serializable picture of the whole state, and the hook through which
//! the state store hands it to persistence.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Process start                                                          │
//! │     bridge.load() ──► Snapshot ──► TrackerState::from_snapshot(.., sink)│
//! │                                                                         │
//! │  Every committed mutation                                               │
//! │     TrackerState ──► sink.commit(&Snapshot)   (returns immediately)     │
//! │                                                                         │
//! │  The in-memory state is the source of truth. A slow or failed write     │
//! │  never blocks or reorders the next mutation.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::ids::StoreId;
use crate::types::{Product, Sale, Store};

/// Full state as persisted: every record plus the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub stores: Vec<Store>,

    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub sales: Vec<Sale>,

    #[serde(default)]
    pub selected_store_id: Option<StoreId>,
}

impl Snapshot {
    /// Checks whether the snapshot holds no records and no selection.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
            && self.products.is_empty()
            && self.sales.is_empty()
            && self.selected_store_id.is_none()
    }
}

/// Receives the full snapshot after every committed mutation.
///
/// Implementations must not block: queue the write and return.
pub trait SnapshotSink: Send {
    fn commit(&self, snapshot: &Snapshot);
}

impl<F> SnapshotSink for F
where
    F: Fn(&Snapshot) + Send,
{
    fn commit(&self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Sink that discards every snapshot (tests, dry runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn commit(&self, _snapshot: &Snapshot) {}
}
