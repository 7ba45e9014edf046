//! # stocktally-core: State and Metrics for Stock Tally
//!
//! This crate holds everything Stock Tally knows about stores, products and
//! sales. It performs no I/O: persistence is reached through [`SnapshotSink`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stock Tally Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    stocktally CLI (apps/cli)                    │    │
//! │  │    stores ──► products ──► sales record ──► dashboard           │    │
//! │  │    form coercion • confirmations • currency formatting          │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │             ★ stocktally-core (THIS CRATE) ★                    │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   state   │  │  metrics  │  │ snapshot  │    │    │
//! │  │   │  Store    │  │ Tracker-  │  │  summary  │  │ Snapshot  │    │    │
//! │  │   │  Product  │  │  State    │  │  per-prod │  │ Sink      │    │    │
//! │  │   │  Sale     │  │ StoreScope│  │  recent   │  │           │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘    │    │
//! │  │                                                      │          │    │
//! │  │   NO I/O • NO DATABASE • NO CLOCK READS IN MUTATORS  │          │    │
//! │  └──────────────────────────────────────────────────────┼──────────┘    │
//! │                                                         │ commit()      │
//! │  ┌──────────────────────────────────────────────────────▼──────────┐    │
//! │  │                stocktally-db (Persistence Bridge)               │    │
//! │  │           SQLite snapshot repository, background writer         │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Store, Product and Sale records
//! - [`ids`] - Typed opaque identifiers
//! - [`money`] - Money in integer cents
//! - [`state`] - The state store and its per-store view
//! - [`metrics`] - Derived financial figures
//! - [`snapshot`] - Persisted form of the state and the commit hook
//! - [`error`] - Why a mutation was rejected
//!
//! ## Design Principles
//!
//! 1. **Mutators never fail loudly**: a rejected mutation is a no-op that
//!    returns `false`
//! 2. **Scope before aggregate**: per-store figures only see that store
//! 3. **Integer money**: all monetary values are cents (i64)
//! 4. **Frozen sales**: a sale keeps the price and cost it was recorded at
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use stocktally_core::{metrics, Money, Product, ProductId, Sale, SaleId, TrackerState};
//!
//! let mut state = TrackerState::default();
//! let store = state.ensure_initial_store().unwrap();
//!
//! let widget = Product {
//!     id: ProductId::generate(),
//!     store_id: store.clone(),
//!     name: "Widget".to_string(),
//!     sku: "W-1".to_string(),
//!     cost: Money::from_cents(500),
//!     price: Money::from_cents(1000),
//!     stock: 20,
//!     stock_alert_threshold: 5,
//! };
//! state.add_product(widget.clone());
//!
//! state.add_sale(Sale {
//!     id: SaleId::generate(),
//!     store_id: store.clone(),
//!     product_id: widget.id.clone(),
//!     date: Utc::now(),
//!     quantity: 3,
//!     unit_price: widget.price,
//!     unit_cost: widget.cost,
//! });
//!
//! let summary = metrics::summary(&state.scope(&store));
//! assert_eq!(summary.inventory_value.cents(), 10_000);
//! assert_eq!(summary.revenue.cents(), 3_000);
//! assert_eq!(summary.profit.cents(), 1_500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ids;
pub mod metrics;
pub mod money;
pub mod snapshot;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::Rejection;
pub use ids::{ProductId, SaleId, StoreId};
pub use metrics::{ProductMetrics, RecentSale, StoreSummary, RECENT_SALES_LIMIT};
pub use money::Money;
pub use snapshot::{NullSink, Snapshot, SnapshotSink};
pub use state::{StoreScope, TrackerState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the store created on first start.
pub const DEFAULT_STORE_NAME: &str = "My Store";
