//! # Metrics Engine
//!
//! Pure functions deriving the dashboard numbers from the current state.
//!
//! ## Scoping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Metric Derivation                                    │
//! │                                                                         │
//! │  TrackerState ──► scope(store_id) ──► products ∩ store ──┐              │
//! │                                  └──► sales ∩ store ─────┤              │
//! │                                                          ▼              │
//! │                     summary()  product_metrics()  recent_sales()        │
//! │                                                                         │
//! │  Filtering happens before aggregation, so a figure for one store never  │
//! │  contains a cent from another.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Formulas
//! | Metric          | Definition                                    |
//! |-----------------|-----------------------------------------------|
//! | inventory value | Σ product `cost × stock`                      |
//! | revenue         | Σ sale `quantity × unit_price`                |
//! | cogs            | Σ sale `quantity × unit_cost`                 |
//! | profit          | revenue − cogs                                |
//! | low stock       | products with `stock ≤ stock_alert_threshold` |
//!
//! Sales carry frozen prices, so editing a product never changes revenue,
//! cogs or profit that are already on record.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ids::ProductId;
use crate::money::Money;
use crate::state::StoreScope;
use crate::types::{Product, Sale};

/// Number of rows in the dashboard's recent sales list.
pub const RECENT_SALES_LIMIT: usize = 10;

/// Label shown for a sale whose product has been deleted.
pub const UNKNOWN_PRODUCT_LABEL: &str = "Unknown";

// =============================================================================
// Aggregates
// =============================================================================

/// Σ `cost × stock` over `products`.
pub fn inventory_value<'a>(products: impl IntoIterator<Item = &'a Product>) -> Money {
    products.into_iter().map(Product::inventory_value).sum()
}

/// Σ `quantity × unit_price` over `sales`.
pub fn revenue<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Money {
    sales.into_iter().map(Sale::revenue).sum()
}

/// Σ `quantity × unit_cost` over `sales`.
pub fn cogs<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Money {
    sales.into_iter().map(Sale::cogs).sum()
}

/// Revenue minus cogs over `sales`. Negative when selling below cost.
pub fn profit<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Money {
    sales.into_iter().map(Sale::profit).sum()
}

/// Products at or below their alert threshold, in input order.
pub fn low_stock<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
    products.into_iter().filter(|p| p.is_low_stock()).collect()
}

// =============================================================================
// Store Summary
// =============================================================================

/// The dashboard cards of one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub total_products: usize,
    pub inventory_value: Money,
    pub revenue: Money,
    pub cogs: Money,
    pub profit: Money,
    /// Ordered by name, then id.
    pub low_stock: Vec<Product>,
}

/// Computes the summary cards for the scoped store.
///
/// ## Example
/// ```rust
/// use stocktally_core::{metrics, TrackerState};
///
/// let mut state = TrackerState::default();
/// let store = state.ensure_initial_store().unwrap();
/// let summary = metrics::summary(&state.scope(&store));
/// assert_eq!(summary.total_products, 0);
/// assert!(summary.revenue.is_zero());
/// ```
pub fn summary(scope: &StoreScope<'_>) -> StoreSummary {
    let products = by_name(scope.products().collect());

    StoreSummary {
        total_products: products.len(),
        inventory_value: inventory_value(products.iter().copied()),
        revenue: revenue(scope.sales()),
        cogs: cogs(scope.sales()),
        profit: profit(scope.sales()),
        low_stock: low_stock(products).into_iter().cloned().collect(),
    }
}

// =============================================================================
// Per-Product Metrics
// =============================================================================

/// Sales totals of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetrics {
    pub product: Product,
    /// Units sold across all of the product's sales.
    pub sold: u64,
    pub revenue: Money,
    pub cogs: Money,
    pub profit: Money,
}

impl ProductMetrics {
    fn empty(product: &Product) -> Self {
        ProductMetrics {
            product: product.clone(),
            sold: 0,
            revenue: Money::zero(),
            cogs: Money::zero(),
            profit: Money::zero(),
        }
    }

    fn record(&mut self, sale: &Sale) {
        self.sold += u64::from(sale.quantity);
        self.revenue += sale.revenue();
        self.cogs += sale.cogs();
        self.profit += sale.profit();
    }
}

/// One row per product of the scoped store, ordered by name then id.
///
/// Products without sales get an all-zero row. Sales of deleted products have
/// no row to land in and are skipped.
pub fn product_metrics(scope: &StoreScope<'_>) -> Vec<ProductMetrics> {
    let mut rows: BTreeMap<&ProductId, ProductMetrics> = scope
        .products()
        .map(|p| (&p.id, ProductMetrics::empty(p)))
        .collect();

    for sale in scope.sales() {
        if let Some(row) = rows.get_mut(&sale.product_id) {
            row.record(sale);
        }
    }

    let mut rows: Vec<ProductMetrics> = rows.into_values().collect();
    rows.sort_by(|a, b| {
        a.product
            .name
            .cmp(&b.product.name)
            .then_with(|| a.product.id.cmp(&b.product.id))
    });
    rows
}

// =============================================================================
// Recent Sales
// =============================================================================

/// A sale as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub sale: Sale,
    /// Current name of the product, or [`UNKNOWN_PRODUCT_LABEL`].
    pub product_name: String,
    pub revenue: Money,
    pub profit: Money,
}

/// The newest `limit` sales of the scoped store, newest first.
pub fn recent_sales(scope: &StoreScope<'_>, limit: usize) -> Vec<RecentSale> {
    let mut sales: Vec<&Sale> = scope.sales().collect();
    sales.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

    sales
        .into_iter()
        .take(limit)
        .map(|sale| RecentSale {
            sale: sale.clone(),
            product_name: scope
                .lookup_product(&sale.product_id)
                .map_or_else(|| UNKNOWN_PRODUCT_LABEL.to_string(), |p| p.name.clone()),
            revenue: sale.revenue(),
            profit: sale.profit(),
        })
        .collect()
}

fn by_name(mut products: Vec<&Product>) -> Vec<&Product> {
    products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    products
}

// =============================================================================
// Unit Tests
// =============================================================================
