//! # Snapshot Repository
//!
//! Reads and writes the whole tracker snapshot.
//!
//! ## Save = Replace
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    save(&Snapshot)  (one transaction)                   │
//! │                                                                         │
//! │  DELETE sales ──► DELETE products ──► DELETE stores ──► DELETE selection│
//! │                                                                         │
//! │  INSERT stores ──► INSERT products ──► INSERT sales ──► INSERT selection│
//! │                                                                         │
//! │  COMMIT   (a failure anywhere rolls back to the previous snapshot)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The state store is the source of truth, so the database never merges:
//! whatever the latest snapshot says is what the tables hold afterwards.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use stocktally_core::{Money, Product, ProductId, Sale, SaleId, Snapshot, Store, StoreId};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: String,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    store_id: String,
    name: String,
    sku: String,
    cost_cents: i64,
    price_cents: i64,
    stock: i64,
    stock_alert_threshold: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    store_id: String,
    product_id: String,
    sold_at: String,
    quantity: i64,
    unit_price_cents: i64,
    unit_cost_cents: i64,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Store {
            id: StoreId::new(row.id),
            name: row.name,
        }
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let stock = count("product", &row.id, "stock", row.stock)?;
        let stock_alert_threshold = count(
            "product",
            &row.id,
            "stock_alert_threshold",
            row.stock_alert_threshold,
        )?;

        Ok(Product {
            id: ProductId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            sku: row.sku,
            cost: Money::from_cents(row.cost_cents),
            price: Money::from_cents(row.price_cents),
            stock,
            stock_alert_threshold,
        })
    }
}

impl TryFrom<SaleRow> for Sale {
    type Error = DbError;

    fn try_from(row: SaleRow) -> Result<Self, Self::Error> {
        let quantity = count("sale", &row.id, "quantity", row.quantity)?;
        let date = DateTime::parse_from_rfc3339(&row.sold_at)
            .map_err(|e| {
                DbError::corrupt("sale", &row.id, format!("sold_at {:?}: {e}", row.sold_at))
            })?
            .with_timezone(&Utc);

        Ok(Sale {
            id: SaleId::new(row.id),
            store_id: StoreId::new(row.store_id),
            product_id: ProductId::new(row.product_id),
            date,
            quantity,
            unit_price: Money::from_cents(row.unit_price_cents),
            unit_cost: Money::from_cents(row.unit_cost_cents),
        })
    }
}

/// Converts a stored INTEGER count back to `u32`.
fn count(entity: &'static str, id: &str, column: &str, value: i64) -> DbResult<u32> {
    u32::try_from(value)
        .map_err(|_| DbError::corrupt(entity, id, format!("{column} out of range: {value}")))
}

/// Formats a sale timestamp the way it is stored (`2024-03-01T12:00:00.000Z`).
fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the persisted snapshot.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.snapshots();
///
/// let snapshot = repo.load().await?;
/// repo.save(&state.snapshot()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Loads the stored snapshot. A fresh database yields an empty snapshot.
    ///
    /// Records come back in id order.
    pub async fn load(&self) -> DbResult<Snapshot> {
        let stores: Vec<StoreRow> = sqlx::query_as("SELECT id, name FROM stores ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let products: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT
                id, store_id, name, sku,
                cost_cents, price_cents,
                stock, stock_alert_threshold
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let sales: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT
                id, store_id, product_id, sold_at,
                quantity, unit_price_cents, unit_cost_cents
            FROM sales
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let selected_store_id: Option<String> =
            sqlx::query_scalar("SELECT store_id FROM selection WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?
                .flatten();

        let snapshot = Snapshot {
            stores: stores.into_iter().map(Store::from).collect(),
            products: products
                .into_iter()
                .map(Product::try_from)
                .collect::<DbResult<_>>()?,
            sales: sales
                .into_iter()
                .map(Sale::try_from)
                .collect::<DbResult<_>>()?,
            selected_store_id: selected_store_id.map(StoreId::new),
        };

        debug!(
            stores = snapshot.stores.len(),
            products = snapshot.products.len(),
            sales = snapshot.sales.len(),
            "Snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Replaces the stored snapshot with `snapshot` in one transaction.
    pub async fn save(&self, snapshot: &Snapshot) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for table in ["sales", "products", "stores", "selection"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }

        for store in &snapshot.stores {
            sqlx::query("INSERT INTO stores (id, name) VALUES (?1, ?2)")
                .bind(store.id.as_str())
                .bind(&store.name)
                .execute(&mut *tx)
                .await?;
        }

        for product in &snapshot.products {
            insert_product(&mut tx, product).await?;
        }

        for sale in &snapshot.sales {
            insert_sale(&mut tx, sale).await?;
        }

        if let Some(store_id) = &snapshot.selected_store_id {
            sqlx::query("INSERT INTO selection (id, store_id) VALUES (1, ?1)")
                .bind(store_id.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        debug!(
            stores = snapshot.stores.len(),
            products = snapshot.products.len(),
            sales = snapshot.sales.len(),
            "Snapshot saved"
        );

        Ok(())
    }
}

async fn insert_product(tx: &mut Transaction<'_, Sqlite>, product: &Product) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO products (
            id, store_id, name, sku,
            cost_cents, price_cents,
            stock, stock_alert_threshold
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(product.id.as_str())
    .bind(product.store_id.as_str())
    .bind(&product.name)
    .bind(&product.sku)
    .bind(product.cost.cents())
    .bind(product.price.cents())
    .bind(i64::from(product.stock))
    .bind(i64::from(product.stock_alert_threshold))
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_sale(tx: &mut Transaction<'_, Sqlite>, sale: &Sale) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO sales (
            id, store_id, product_id, sold_at,
            quantity, unit_price_cents, unit_cost_cents
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(sale.id.as_str())
    .bind(sale.store_id.as_str())
    .bind(sale.product_id.as_str())
    .bind(format_timestamp(&sale.date))
    .bind(i64::from(sale.quantity))
    .bind(sale.unit_price.cents())
    .bind(sale.unit_cost.cents())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
