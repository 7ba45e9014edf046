//! # State Store
//!
//! Holds every store, product and sale in memory, plus the selected store.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Store Operations                               │
//! │                                                                         │
//! │  UI Action              Mutator                 Collection Change       │
//! │  ─────────              ───────                 ─────────────────       │
//! │                                                                         │
//! │  App start ───────────► ensure_initial_store() ► "My Store" if empty    │
//! │  New store ───────────► add_store() ───────────► stores.insert          │
//! │  Rename ──────────────► rename_store() ────────► store.name = ..        │
//! │  Delete store ────────► delete_store() ────────► cascade products+sales │
//! │  Pick store ──────────► select_store() ────────► selected = id          │
//! │  Product form ────────► add_product() ─────────► products.insert        │
//! │                    └──► update_product() ──────► replace in place       │
//! │  Delete product ──────► delete_product() ──────► sales untouched        │
//! │  Quick sale ──────────► add_sale() ────────────► sales.insert           │
//! │                                                  (stock untouched)      │
//! │                                                                         │
//! │  Every committed mutation hands the full snapshot to the sink.          │
//! │  Rejected mutations change nothing and notify nobody.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Delete Policies
//! - Deleting a **store** removes its products and sales.
//! - Deleting a **product** leaves its sales in place. Readers resolve the
//!   missing product to a fallback label.
//!
//! ## Stock Is Not a Ledger
//! Recording a sale never touches `Product::stock`. Stock and sales are
//! independent; stock only changes when the product is edited.

use std::collections::BTreeMap;
use std::fmt;

use chrono::SubsecRound;
use tracing::debug;

use crate::error::{Outcome, Rejection};
use crate::ids::{ProductId, SaleId, StoreId};
use crate::snapshot::{NullSink, Snapshot, SnapshotSink};
use crate::types::{Product, Sale, Store};
use crate::DEFAULT_STORE_NAME;

// =============================================================================
// Tracker State
// =============================================================================

/// The store of record.
///
/// Construct one per session and pass it to whatever needs it. Tests build a
/// fresh instance each.
///
/// ## Usage
/// ```rust
/// use stocktally_core::TrackerState;
///
/// let mut state = TrackerState::default();
/// state.ensure_initial_store();
/// state.ensure_initial_store();
/// assert_eq!(state.store_count(), 1);
/// ```
pub struct TrackerState {
    stores: BTreeMap<StoreId, Store>,
    products: BTreeMap<ProductId, Product>,
    sales: BTreeMap<SaleId, Sale>,
    selected_store_id: Option<StoreId>,
    sink: Box<dyn SnapshotSink>,
}

impl TrackerState {
    /// Creates an empty state that reports commits to `sink`.
    pub fn new(sink: impl SnapshotSink + 'static) -> Self {
        Self::from_snapshot(Snapshot::default(), sink)
    }

    /// Creates a state from a loaded snapshot.
    ///
    /// Records are taken verbatim, including a selection that points at a
    /// store no longer present. Loading does not notify the sink.
    pub fn from_snapshot(snapshot: Snapshot, sink: impl SnapshotSink + 'static) -> Self {
        let Snapshot {
            stores,
            products,
            sales,
            selected_store_id,
        } = snapshot;

        let state = TrackerState {
            stores: stores.into_iter().map(|s| (s.id.clone(), s)).collect(),
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
            sales: sales.into_iter().map(|s| (s.id.clone(), s)).collect(),
            selected_store_id,
            sink: Box::new(sink),
        };

        debug!(
            stores = state.stores.len(),
            products = state.products.len(),
            sales = state.sales.len(),
            "State loaded"
        );

        state
    }

    /// Returns the full state as a snapshot (records in id order).
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stores: self.stores.values().cloned().collect(),
            products: self.products.values().cloned().collect(),
            sales: self.sales.values().cloned().collect(),
            selected_store_id: self.selected_store_id.clone(),
        }
    }

    // =========================================================================
    // Store Mutators
    // =========================================================================

    /// Creates and selects a default store when there are no stores at all.
    ///
    /// Idempotent: returns `None` and changes nothing once any store exists.
    pub fn ensure_initial_store(&mut self) -> Option<StoreId> {
        self.apply("ensure_initial_store", |state| {
            if !state.stores.is_empty() {
                return Err(Rejection::AlreadyInitialized);
            }
            let id = state.insert_store(DEFAULT_STORE_NAME.to_string());
            state.selected_store_id = Some(id.clone());
            Ok(id)
        })
    }

    /// Adds a store named `name` (trimmed).
    ///
    /// The new store becomes the selection only if nothing is selected.
    /// Returns `None` when the name is blank.
    pub fn add_store(&mut self, name: &str) -> Option<StoreId> {
        self.apply("add_store", |state| {
            let name = non_blank(name, "store name")?;
            let id = state.insert_store(name);
            if state.selected_store_id.is_none() {
                state.selected_store_id = Some(id.clone());
            }
            Ok(id)
        })
    }

    /// Renames a store. Products and sales are untouched.
    pub fn rename_store(&mut self, id: &StoreId, name: &str) -> bool {
        self.apply("rename_store", |state| {
            let store = state
                .stores
                .get_mut(id)
                .ok_or_else(|| Rejection::UnknownStore(id.clone()))?;
            store.name = non_blank(name, "store name")?;
            Ok(())
        })
        .is_some()
    }

    /// Deletes a store together with all of its products and sales.
    ///
    /// If the store was selected, the remaining store with the smallest id is
    /// selected instead, or nothing when none remain.
    pub fn delete_store(&mut self, id: &StoreId) -> bool {
        self.apply("delete_store", |state| {
            state
                .stores
                .remove(id)
                .ok_or_else(|| Rejection::UnknownStore(id.clone()))?;

            let products_before = state.products.len();
            let sales_before = state.sales.len();
            state.products.retain(|_, p| &p.store_id != id);
            state.sales.retain(|_, s| &s.store_id != id);

            debug!(
                store_id = %id,
                products_removed = products_before - state.products.len(),
                sales_removed = sales_before - state.sales.len(),
                "Cascaded store deletion"
            );

            if state.selected_store_id.as_ref() == Some(id) {
                state.selected_store_id = state.stores.keys().next().cloned();
            }
            Ok(())
        })
        .is_some()
    }

    /// Selects a store. Never rejected, even for an id that does not exist.
    pub fn select_store(&mut self, id: StoreId) {
        self.apply("select_store", |state| {
            state.selected_store_id = Some(id);
            Ok(())
        });
    }

    // =========================================================================
    // Product Mutators
    // =========================================================================

    /// Inserts a product under its own id.
    ///
    /// Field values are stored as given; the form layer has already coerced
    /// them. Rejected when the owning store does not exist.
    pub fn add_product(&mut self, product: Product) -> bool {
        self.apply("add_product", |state| {
            if !state.stores.contains_key(&product.store_id) {
                return Err(Rejection::UnknownStore(product.store_id));
            }
            state.products.insert(product.id.clone(), product);
            Ok(())
        })
        .is_some()
    }

    /// Replaces the fields of the product stored under `id`.
    ///
    /// The stored id and owning store are kept; everything else comes from
    /// `product`. An unknown `id` is dropped without inserting anything.
    pub fn update_product(&mut self, id: &ProductId, product: Product) -> bool {
        self.apply("update_product", |state| {
            let existing = state
                .products
                .get_mut(id)
                .ok_or_else(|| Rejection::UnknownProduct(id.clone()))?;
            *existing = Product {
                id: existing.id.clone(),
                store_id: existing.store_id.clone(),
                ..product
            };
            Ok(())
        })
        .is_some()
    }

    /// Deletes a product. Sales that reference it are kept.
    pub fn delete_product(&mut self, id: &ProductId) -> bool {
        self.apply("delete_product", |state| {
            state
                .products
                .remove(id)
                .ok_or_else(|| Rejection::UnknownProduct(id.clone()))?;
            Ok(())
        })
        .is_some()
    }

    // =========================================================================
    // Sale Mutators
    // =========================================================================

    /// Records a sale as given, with its date truncated to milliseconds.
    ///
    /// The sale must name an existing store and an existing product of that
    /// same store, with a quantity of at least 1. Product stock is never
    /// adjusted.
    pub fn add_sale(&mut self, sale: Sale) -> bool {
        self.apply("add_sale", |state| {
            if sale.quantity == 0 {
                return Err(Rejection::ZeroQuantity);
            }
            if !state.stores.contains_key(&sale.store_id) {
                return Err(Rejection::UnknownStore(sale.store_id));
            }
            let product = state
                .products
                .get(&sale.product_id)
                .ok_or_else(|| Rejection::UnknownProduct(sale.product_id.clone()))?;
            if product.store_id != sale.store_id {
                return Err(Rejection::StoreMismatch {
                    product_id: product.id.clone(),
                    product_store: product.store_id.clone(),
                    sale_store: sale.store_id,
                });
            }
            let sale = Sale {
                date: sale.date.trunc_subsecs(3),
                ..sale
            };
            state.sales.insert(sale.id.clone(), sale);
            Ok(())
        })
        .is_some()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn store(&self, id: &StoreId) -> Option<&Store> {
        self.stores.get(id)
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn sale(&self, id: &SaleId) -> Option<&Sale> {
        self.sales.get(id)
    }

    /// All stores, ordered by name then id for display.
    pub fn stores(&self) -> Vec<&Store> {
        let mut stores: Vec<&Store> = self.stores.values().collect();
        stores.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        stores
    }

    /// All products of every store, in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// All sales of every store, in id order.
    pub fn sales(&self) -> impl Iterator<Item = &Sale> {
        self.sales.values()
    }

    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn sale_count(&self) -> usize {
        self.sales.len()
    }

    /// The selected store id, which may dangle after `select_store`.
    pub fn selected_store_id(&self) -> Option<&StoreId> {
        self.selected_store_id.as_ref()
    }

    /// The selected store, if the selection points at an existing store.
    pub fn selected_store(&self) -> Option<&Store> {
        self.selected_store_id.as_ref().and_then(|id| self.stores.get(id))
    }

    /// A view of one store's products and sales.
    pub fn scope<'a>(&'a self, store_id: &'a StoreId) -> StoreScope<'a> {
        StoreScope {
            state: self,
            store_id,
        }
    }

    /// The view of the selected store, if it exists.
    pub fn selected_scope(&self) -> Option<StoreScope<'_>> {
        self.selected_store().map(|store| self.scope(&store.id))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn insert_store(&mut self, name: String) -> StoreId {
        let id = StoreId::generate();
        self.stores.insert(
            id.clone(),
            Store {
                id: id.clone(),
                name,
            },
        );
        id
    }

    /// Runs one mutation step and notifies the sink if it committed.
    fn apply<T>(
        &mut self,
        operation: &'static str,
        step: impl FnOnce(&mut Self) -> Outcome<T>,
    ) -> Option<T> {
        match step(self) {
            Ok(value) => {
                debug!(operation, "Mutation committed");
                self.sink.commit(&self.snapshot());
                Some(value)
            }
            Err(reason) => {
                debug!(operation, %reason, "Mutation rejected");
                None
            }
        }
    }
}

impl Default for TrackerState {
    fn default() -> Self {
        TrackerState::new(NullSink)
    }
}

impl fmt::Debug for TrackerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerState")
            .field("stores", &self.stores.len())
            .field("products", &self.products.len())
            .field("sales", &self.sales.len())
            .field("selected_store_id", &self.selected_store_id)
            .finish_non_exhaustive()
    }
}

fn non_blank(value: &str, field: &'static str) -> Outcome<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Rejection::BlankName { field });
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// Store Scope
// =============================================================================

/// One store's slice of the state.
///
/// Every per-store metric goes through a scope, so records of other stores are
/// filtered out before anything is aggregated.
#[derive(Debug, Clone, Copy)]
pub struct StoreScope<'a> {
    state: &'a TrackerState,
    store_id: &'a StoreId,
}

impl<'a> StoreScope<'a> {
    pub fn store_id(&self) -> &'a StoreId {
        self.store_id
    }

    pub fn store(&self) -> Option<&'a Store> {
        self.state.store(self.store_id)
    }

    /// Products owned by this store.
    pub fn products(&self) -> impl Iterator<Item = &'a Product> + 'a {
        let store_id = self.store_id;
        self.state
            .products
            .values()
            .filter(move |p| &p.store_id == store_id)
    }

    /// Sales recorded in this store.
    pub fn sales(&self) -> impl Iterator<Item = &'a Sale> + 'a {
        let store_id = self.store_id;
        self.state
            .sales
            .values()
            .filter(move |s| &s.store_id == store_id)
    }

    /// Looks up a product by id across all stores, for labelling sales.
    pub fn lookup_product(&self, id: &ProductId) -> Option<&'a Product> {
        self.state.product(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
