//! Product commands, all scoped to the selected store.

use std::io::{BufRead, Write};

use comfy_table::Cell;
use stocktally_core::{metrics, Product, ProductId, StoreId};
use tracing::info;

use crate::cli::{ProductArgs, ProductEditArgs, ProductsCommand};
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::forms::ProductForm;
use crate::render;
use crate::session::Session;

pub fn execute<R: BufRead, W: Write>(
    command: ProductsCommand,
    session: &mut Session,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    let store_id = session.selected_store()?;

    match command {
        ProductsCommand::List => list(session, console, &store_id),
        ProductsCommand::Add(args) => add(session, console, store_id, args),
        ProductsCommand::Edit { id, fields } => {
            edit(session, console, &store_id, &ProductId::new(id), fields)
        }
        ProductsCommand::Delete { id, yes } => {
            delete(session, console, &store_id, &ProductId::new(id), yes)
        }
    }
}

/// Looks up a product of the selected store.
fn store_product<'a>(
    session: &'a Session,
    store_id: &StoreId,
    id: &ProductId,
) -> CliResult<&'a Product> {
    session
        .state
        .product(id)
        .filter(|product| &product.store_id == store_id)
        .ok_or_else(|| CliError::not_found("Product", id.as_str()))
}

fn list<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
    store_id: &StoreId,
) -> CliResult<()> {
    let rows = metrics::product_metrics(&session.state.scope(store_id));
    if rows.is_empty() {
        console.line("No products yet.")?;
        return Ok(());
    }

    let config = &session.config;
    let mut table = render::table(&[
        "Name", "SKU", "Cost", "Price", "Stock", "Sold", "Revenue", "Profit", "Id",
    ]);
    render::align_right(&mut table, &[2, 3, 4, 5, 6, 7]);

    for row in rows {
        let product = &row.product;
        table.add_row(vec![
            Cell::new(&product.name),
            Cell::new(&product.sku),
            render::money_cell(config, product.cost),
            render::money_cell(config, product.price),
            render::stock_cell(product.stock, product.is_low_stock()),
            Cell::new(row.sold),
            render::money_cell(config, row.revenue),
            render::money_cell(config, row.profit),
            render::dim_cell(&product.id),
        ]);
    }
    console.line(table)?;
    Ok(())
}

fn add<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    store_id: StoreId,
    args: ProductArgs,
) -> CliResult<()> {
    let form = ProductForm {
        name: args.name,
        sku: args.sku,
        cost: args.cost,
        price: args.price,
        stock: args.stock,
        threshold: args.threshold,
    };
    let product = form.into_product(
        ProductId::generate(),
        store_id,
        session.config.currency.decimals,
    )?;

    let id = product.id.clone();
    let name = product.name.clone();
    session.state.add_product(product);

    info!(product_id = %id, "Product added");
    console.line(format!("Added product {name} ({id})"))?;
    Ok(())
}

fn edit<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    store_id: &StoreId,
    id: &ProductId,
    fields: ProductEditArgs,
) -> CliResult<()> {
    let decimals = session.config.currency.decimals;
    let current = store_product(session, store_id, id)?;

    let mut form = ProductForm::from_product(current, decimals);
    let ProductEditArgs {
        name,
        sku,
        cost,
        price,
        stock,
        threshold,
    } = fields;
    for (field, value) in [
        (&mut form.name, name),
        (&mut form.sku, sku),
        (&mut form.cost, cost),
        (&mut form.price, price),
        (&mut form.stock, stock),
        (&mut form.threshold, threshold),
    ] {
        if let Some(value) = value {
            *field = value;
        }
    }

    let product = form.into_product(id.clone(), store_id.clone(), decimals)?;
    let name = product.name.clone();
    session.state.update_product(id, product);

    console.line(format!("Updated product {name}"))?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    store_id: &StoreId,
    id: &ProductId,
    yes: bool,
) -> CliResult<()> {
    let name = store_product(session, store_id, id)?.name.clone();

    if !yes && !console.confirm("Delete product?")? {
        console.line("Cancelled.")?;
        return Ok(());
    }

    session.state.delete_product(id);
    info!(product_id = %id, "Product deleted");
    console.line(format!("Deleted product {name}"))?;
    Ok(())
}
