//! Sale commands: the quick-sale form and the sales log.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use stocktally_core::{metrics, ProductId, Sale, SaleId, StoreId};
use tracing::info;

use crate::cli::SalesCommand;
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::forms::{parse_money, parse_quantity};
use crate::render;
use crate::session::Session;

pub fn execute<R: BufRead, W: Write>(
    command: SalesCommand,
    session: &mut Session,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    let store_id = session.selected_store()?;

    match command {
        SalesCommand::Record {
            product_id,
            qty,
            unit_price,
        } => record(
            session,
            console,
            store_id,
            ProductId::new(product_id),
            &qty,
            unit_price.as_deref(),
            Utc::now(),
        ),
        SalesCommand::List => list(session, console, &store_id),
    }
}

/// Records a sale at `date`.
///
/// Unit cost is always the product's current cost. A missing or blank unit
/// price falls back to the product's current price.
pub fn record<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    store_id: StoreId,
    product_id: ProductId,
    qty: &str,
    unit_price: Option<&str>,
    date: DateTime<Utc>,
) -> CliResult<()> {
    let product = session
        .state
        .product(&product_id)
        .filter(|product| product.store_id == store_id)
        .ok_or_else(|| CliError::not_found("Product", product_id.as_str()))?;

    let unit_price = match unit_price.map(str::trim) {
        Some(text) if !text.is_empty() => parse_money(text, session.config.currency.decimals),
        _ => product.price,
    };

    let sale = Sale {
        id: SaleId::generate(),
        store_id,
        product_id,
        date,
        quantity: parse_quantity(qty),
        unit_price,
        unit_cost: product.cost,
    };
    let line = format!(
        "Recorded sale: {} × {} = {}",
        sale.quantity,
        product.name,
        session.config.format_currency(sale.revenue())
    );

    let sale_id = sale.id.clone();
    session.state.add_sale(sale);

    info!(sale_id = %sale_id, "Sale recorded");
    console.line(line)?;
    Ok(())
}

fn list<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
    store_id: &StoreId,
) -> CliResult<()> {
    let scope = session.state.scope(store_id);
    let rows = metrics::recent_sales(&scope, usize::MAX);
    if rows.is_empty() {
        console.line("No sales yet.")?;
        return Ok(());
    }

    console.line(render::sales_table(&session.config, &rows))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{console, output, session};
    use chrono::TimeZone;
    use stocktally_core::{Money, Product};

    fn add_mug(session: &mut Session, store_id: &StoreId) -> ProductId {
        let id = ProductId::generate();
        session.state.add_product(Product {
            id: id.clone(),
            store_id: store_id.clone(),
            name: "Mug".into(),
            sku: String::new(),
            cost: Money::from_cents(300),
            price: Money::from_cents(1000),
            stock: 4,
            stock_alert_threshold: 0,
        });
        id
    }

    fn only_sale(session: &Session) -> Sale {
        let sales: Vec<_> = session.state.sales().cloned().collect();
        assert_eq!(sales.len(), 1);
        sales.into_iter().next().unwrap()
    }

    #[tokio::test]
    async fn test_record_freezes_current_price_and_cost() {
        let mut session = session().await;
        let store = session.selected_store().unwrap();
        let product = add_mug(&mut session, &store);
        let mut out = console("");
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        record(&mut session, &mut out, store.clone(), product.clone(), "2", None, date).unwrap();

        let sale = only_sale(&session);
        assert_eq!(sale.store_id, store);
        assert_eq!(sale.product_id, product);
        assert_eq!(sale.quantity, 2);
        assert_eq!(sale.unit_price, Money::from_cents(1000));
        assert_eq!(sale.unit_cost, Money::from_cents(300));
        assert_eq!(sale.date, date);
        assert!(output(out).contains("= $20.00"));
    }

    #[tokio::test]
    async fn test_record_does_not_touch_stock() {
        let mut session = session().await;
        let store = session.selected_store().unwrap();
        let product = add_mug(&mut session, &store);
        let mut out = console("");

        execute(
            SalesCommand::Record {
                product_id: product.to_string(),
                qty: "3".into(),
                unit_price: None,
            },
            &mut session,
            &mut out,
        )
        .unwrap();

        assert_eq!(session.state.product(&product).unwrap().stock, 4);
    }

    #[tokio::test]
    async fn test_record_coerces_quantity_and_price() {
        let mut session = session().await;
        let store = session.selected_store().unwrap();
        let product = add_mug(&mut session, &store);
        let mut out = console("");

        record(&mut session, &mut out, store, product, "-4", Some("8.25"), Utc::now()).unwrap();

        let sale = only_sale(&session);
        assert_eq!(sale.quantity, 1);
        assert_eq!(sale.unit_price, Money::from_cents(825));
    }

    #[tokio::test]
    async fn test_blank_unit_price_uses_product_price() {
        let mut session = session().await;
        let store = session.selected_store().unwrap();
        let product = add_mug(&mut session, &store);
        let mut out = console("");

        record(&mut session, &mut out, store, product, "1", Some("  "), Utc::now()).unwrap();

        assert_eq!(only_sale(&session).unit_price, Money::from_cents(1000));
    }

    #[tokio::test]
    async fn test_product_of_other_store_is_not_found() {
        let mut session = session().await;
        let store = session.selected_store().unwrap();
        let product = add_mug(&mut session, &store);
        let other = session.state.add_store("Harbour").unwrap();
        session.state.select_store(other);
        let mut out = console("");

        let result = execute(
            SalesCommand::Record {
                product_id: product.to_string(),
                qty: "1".into(),
                unit_price: None,
            },
            &mut session,
            &mut out,
        );

        assert!(matches!(result, Err(CliError::NotFound { .. })));
        assert_eq!(session.state.sale_count(), 0);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let mut session = session().await;
        let store = session.selected_store().unwrap();
        let product = add_mug(&mut session, &store);
        let mut out = console("");
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

        record(&mut session, &mut out, store.clone(), product.clone(), "1", Some("1"), early)
            .unwrap();
        record(&mut session, &mut out, store, product, "1", Some("2"), late).unwrap();

        let mut listing = console("");
        execute(SalesCommand::List, &mut session, &mut listing).unwrap();
        let text = output(listing);

        let first = text.find("2024-03-01").unwrap();
        let second = text.find("2024-01-01").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let mut session = session().await;
        let mut out = console("");

        execute(SalesCommand::List, &mut session, &mut out).unwrap();

        assert_eq!(output(out), "No sales yet.\n");
    }
}
