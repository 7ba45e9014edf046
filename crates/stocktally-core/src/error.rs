//! # Rejection Reasons
//!
//! Why a state store mutation was not committed.
//!
//! ## Policy, Not Faults
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mutation Outcomes                                    │
//! │                                                                         │
//! │  UI action ──► TrackerState mutator                                     │
//! │                     │                                                   │
//! │                     ├── checks pass ──► mutate ──► notify sink ──► true │
//! │                     │                                                   │
//! │                     └── Rejection ───► debug! log ───────────────► false│
//! │                                         (state unchanged)               │
//! │                                                                         │
//! │  A rejection never reaches the caller as an error. Re-submitting a      │
//! │  form with a stale id is harmless.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A sale that references a deleted product is not a rejection at all: read
//! paths render it with a fallback label.

use thiserror::Error;

use crate::ids::{ProductId, StoreId};

/// Reason a mutation was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A required name trimmed to nothing.
    #[error("{field} must not be blank")]
    BlankName { field: &'static str },

    /// The targeted store does not exist.
    #[error("Store not found: {0}")]
    UnknownStore(StoreId),

    /// The targeted product does not exist.
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    /// A sale names a store other than its product's store.
    #[error("Product {product_id} belongs to store {product_store}, not {sale_store}")]
    StoreMismatch {
        product_id: ProductId,
        product_store: StoreId,
        sale_store: StoreId,
    },

    /// A sale with quantity 0.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// `ensure_initial_store` found stores already present.
    #[error("stores already exist")]
    AlreadyInitialized,
}

/// Outcome of an internal mutation step.
pub(crate) type Outcome<T> = Result<T, Rejection>;
