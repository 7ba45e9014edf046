//! # Domain Types
//!
//! The three records Stock Tally keeps.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌──────────────────┐  │
//! │  │     Store       │   │      Product         │   │      Sale        │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ──────────────  │  │
//! │  │  id             │◄──│  store_id            │   │  store_id        │  │
//! │  │  name           │   │  id                  │◄ ─│  product_id      │  │
//! │  └─────────────────┘   │  name, sku           │   │  date            │  │
//! │          ▲             │  cost, price         │   │  quantity        │  │
//! │          │             │  stock               │   │  unit_price ❄    │  │
//! │          └─────────────│  stock_alert_thresh. │   │  unit_cost  ❄    │  │
//! │                        └──────────────────────┘   └──────────────────┘  │
//! │                                                                         │
//! │  ◄── owned (cascade on store delete)   ◄ ─ weak (may dangle)            │
//! │  ❄  frozen at sale time                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A sale copies the product's price and cost when it is recorded. Editing the
//! product later never changes historical revenue or profit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ProductId, SaleId, StoreId};
use crate::money::Money;

// =============================================================================
// Store
// =============================================================================

/// A store owning a catalog of products and a log of sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique identifier, generated at creation and never changed.
    pub id: StoreId,

    /// Display name (non-empty, trimmed).
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in one store's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Owning store. Fixed for the lifetime of the product.
    pub store_id: StoreId,

    /// Display name.
    pub name: String,

    /// Free-form stock keeping unit, not required to be unique.
    pub sku: String,

    /// Unit cost.
    pub cost: Money,

    /// Unit selling price. May be below cost.
    pub price: Money,

    /// Units on hand. Only changed by editing the product.
    pub stock: u32,

    /// Low-stock alert level. Absent in older snapshots, read as 0.
    #[serde(default)]
    pub stock_alert_threshold: u32,
}

impl Product {
    /// Whether the product should show up as a low-stock alert.
    ///
    /// A product with the default threshold of 0 alerts only when sold out.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.stock_alert_threshold
    }

    /// Value of the units on hand at cost (`cost × stock`).
    #[inline]
    pub fn inventory_value(&self) -> Money {
        self.cost * self.stock
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,

    /// Store the sale was recorded in. Equal to the product's store at
    /// creation time.
    pub store_id: StoreId,

    /// Product sold. The product may have been deleted since.
    pub product_id: ProductId,

    /// When the sale was recorded. Millisecond precision: the state store
    /// truncates anything finer, matching what persistence keeps.
    #[serde(rename = "dateISO")]
    pub date: DateTime<Utc>,

    /// Units sold, at least 1.
    pub quantity: u32,

    /// Selling price per unit at the time of sale (frozen).
    pub unit_price: Money,

    /// Cost per unit at the time of sale (frozen).
    pub unit_cost: Money,
}

impl Sale {
    /// Revenue of this sale (`quantity × unit_price`).
    #[inline]
    pub fn revenue(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Cost of goods sold (`quantity × unit_cost`).
    #[inline]
    pub fn cogs(&self) -> Money {
        self.unit_cost * self.quantity
    }

    /// Profit of this sale (`quantity × (unit_price − unit_cost)`).
    #[inline]
    pub fn profit(&self) -> Money {
        self.revenue() - self.cogs()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(stock: u32, threshold: u32) -> Product {
        Product {
            id: ProductId::new("p1"),
            store_id: StoreId::new("s1"),
            name: "Beans".to_string(),
            sku: "BN-1".to_string(),
            cost: Money::from_cents(500),
            price: Money::from_cents(1000),
            stock,
            stock_alert_threshold: threshold,
        }
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(product(5, 5).is_low_stock());
        assert!(product(4, 5).is_low_stock());
        assert!(!product(6, 5).is_low_stock());
        assert!(product(0, 0).is_low_stock());
        assert!(!product(1, 0).is_low_stock());
    }

    #[test]
    fn test_inventory_value() {
        assert_eq!(product(20, 5).inventory_value().cents(), 10_000);
        assert!(product(0, 5).inventory_value().is_zero());
    }

    #[test]
    fn test_sale_figures() {
        let sale = Sale {
            id: SaleId::new("x1"),
            store_id: StoreId::new("s1"),
            product_id: ProductId::new("p1"),
            date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            quantity: 3,
            unit_price: Money::from_cents(1000),
            unit_cost: Money::from_cents(500),
        };
        assert_eq!(sale.revenue().cents(), 3000);
        assert_eq!(sale.cogs().cents(), 1500);
        assert_eq!(sale.profit().cents(), 1500);
    }

    #[test]
    fn test_sale_below_cost_has_negative_profit() {
        let sale = Sale {
            id: SaleId::new("x2"),
            store_id: StoreId::new("s1"),
            product_id: ProductId::new("p1"),
            date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            quantity: 2,
            unit_price: Money::from_cents(400),
            unit_cost: Money::from_cents(500),
        };
        assert_eq!(sale.profit().cents(), -200);
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(product(3, 1)).unwrap();
        assert_eq!(value["storeId"], "s1");
        assert_eq!(value["stockAlertThreshold"], 1);
        assert_eq!(value["cost"], 500);
    }

    #[test]
    fn test_missing_threshold_defaults_to_zero() {
        let json = r#"{
            "id": "p9", "storeId": "s1", "name": "Tea", "sku": "",
            "cost": 100, "price": 250, "stock": 4
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.stock_alert_threshold, 0);
    }

    #[test]
    fn test_sale_date_key() {
        let json = r#"{
            "id": "x1", "storeId": "s1", "productId": "p1",
            "dateISO": "2024-03-01T12:00:00.000Z",
            "quantity": 1, "unitPrice": 1000, "unitCost": 500
        }"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.date, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    }
}
