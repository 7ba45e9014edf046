//! Dashboard: summary cards, low-stock alerts and recent sales of the
//! selected store.

use std::io::{BufRead, Write};

use comfy_table::{Cell, CellAlignment};
use stocktally_core::{metrics, RECENT_SALES_LIMIT};

use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::render;
use crate::session::Session;

pub fn execute<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    let selected = session
        .state
        .selected_scope()
        .and_then(|scope| scope.store().map(|store| (scope, store)));
    let Some((scope, store)) = selected else {
        console.line(CliError::NoStoreSelected)?;
        return Ok(());
    };

    let config = &session.config;
    let summary = metrics::summary(&scope);

    console.line(format!("Store: {}", store.name))?;

    let mut cards = render::table(&["Total Products", "Inventory Value", "Revenue", "Profit"]);
    cards.add_row(vec![
        Cell::new(summary.total_products),
        render::money_cell(config, summary.inventory_value),
        render::money_cell(config, summary.revenue),
        render::money_cell(config, summary.profit),
    ]);
    for column in 0..4 {
        render::align_column(&mut cards, column, CellAlignment::Right);
    }
    console.line(cards)?;

    console.blank()?;
    console.line("Low Stock")?;
    if summary.low_stock.is_empty() {
        console.line("No low-stock products.")?;
    } else {
        let mut table = render::table(&["Name", "SKU", "Stock", "Alert At"]);
        render::align_right(&mut table, &[2, 3]);
        for product in &summary.low_stock {
            table.add_row(vec![
                Cell::new(&product.name),
                Cell::new(&product.sku),
                render::stock_cell(product.stock, true),
                Cell::new(product.stock_alert_threshold),
            ]);
        }
        console.line(table)?;
    }

    console.blank()?;
    console.line("Recent Sales")?;
    let recent = metrics::recent_sales(&scope, RECENT_SALES_LIMIT);
    if recent.is_empty() {
        console.line("No sales yet.")?;
    } else {
        console.line(render::sales_table(config, &recent))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ProductArgs, ProductsCommand};
    use crate::commands::test_support::{console, output, session};
    use chrono::{Duration, TimeZone, Utc};
    use stocktally_core::{Money, Product, ProductId, Sale, SaleId, StoreId};

    #[tokio::test]
    async fn test_empty_store() {
        let session = session().await;
        let mut out = console("");

        execute(&session, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("Store: My Store"));
        assert!(text.contains("$0.00"));
        assert!(text.contains("No low-stock products."));
        assert!(text.contains("No sales yet."));
    }

    #[tokio::test]
    async fn test_no_store_selected_prompts_to_create_one() {
        let mut session = session().await;
        session.state.select_store(StoreId::new("gone"));
        let mut out = console("");

        execute(&session, &mut out).unwrap();

        assert_eq!(output(out), "Please create a store to get started.\n");
    }

    #[tokio::test]
    async fn test_huge_form_values_do_not_break_the_dashboard() {
        let mut session = session().await;
        let mut out = console("");
        crate::commands::product::execute(
            ProductsCommand::Add(ProductArgs {
                name: "Gold".into(),
                sku: String::new(),
                cost: "1e17".into(),
                price: "1e17".into(),
                stock: "2".into(),
                threshold: String::new(),
            }),
            &mut session,
            &mut out,
        )
        .unwrap();

        execute(&session, &mut out).unwrap();

        // Cost is capped at 10^12 cents; two units are worth 2 × $10,000,000,000.
        assert!(output(out).contains("$20000000000.00"));
    }

    #[tokio::test]
    async fn test_cards_and_recent_sales_limit() {
        let mut session = session().await;
        let store = session.selected_store().unwrap();
        let product = ProductId::new("p1");
        session.state.add_product(Product {
            id: product.clone(),
            store_id: store.clone(),
            name: "Mug".into(),
            sku: "M-1".into(),
            cost: Money::from_cents(300),
            price: Money::from_cents(1000),
            stock: 2,
            stock_alert_threshold: 5,
        });

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for day in 0..12 {
            session.state.add_sale(Sale {
                id: SaleId::generate(),
                store_id: store.clone(),
                product_id: product.clone(),
                date: start + Duration::days(day),
                quantity: 1,
                unit_price: Money::from_cents(1000),
                unit_cost: Money::from_cents(300),
            });
        }
        let mut out = console("");

        execute(&session, &mut out).unwrap();

        let text = output(out);
        // 12 sales at $10.00 revenue and $7.00 profit each.
        assert!(text.contains("$120.00"));
        assert!(text.contains("$84.00"));
        // Inventory value: 2 × $3.00.
        assert!(text.contains("$6.00"));
        assert!(text.contains("2 (low)"));
        assert!(text.contains("2024-01-12"));
        assert!(text.contains("2024-01-03"));
        assert!(!text.contains("2024-01-02"));
    }
}
