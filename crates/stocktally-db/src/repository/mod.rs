//! # Repository Module
//!
//! Database repository implementations for Stock Tally.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI startup / SnapshotWriter                                           │
//! │       │                                                                 │
//! │       │  db.snapshots().load()  /  .save(&snapshot)                     │
//! │       ▼                                                                 │
//! │  SnapshotRepository                                                     │
//! │  ├── load(&self)            → Snapshot                                  │
//! │  └── save(&self, snapshot)  → replace all rows, one transaction         │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database (stores, products, sales, selection)                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - Whole-state load and save

pub mod snapshot;
