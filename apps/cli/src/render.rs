//! Table rendering helpers (comfy-table).

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use stocktally_core::{Money, RecentSale};

use crate::config::AppConfig;

/// Creates a styled table with the given header labels.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|label| header_cell(label)));
    table
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Right-aligns every listed column.
pub fn align_right(table: &mut Table, columns: &[usize]) {
    for &index in columns {
        align_column(table, index, CellAlignment::Right);
    }
}

/// A formatted amount; negative amounts are red.
pub fn money_cell(config: &AppConfig, amount: Money) -> Cell {
    let cell = Cell::new(config.format_currency(amount));
    if amount.is_negative() {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

/// A stock count, highlighted when at or below the alert threshold.
pub fn stock_cell(stock: u32, low: bool) -> Cell {
    if low {
        Cell::new(format!("{stock} (low)"))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(stock)
    }
}

/// Sales rows as shown on the dashboard and by `sales list`.
pub fn sales_table(config: &AppConfig, rows: &[RecentSale]) -> Table {
    let mut table = table(&["Date", "Product", "Qty", "Unit Price", "Revenue", "Profit"]);
    align_right(&mut table, &[2, 3, 4, 5]);

    for row in rows {
        table.add_row(vec![
            Cell::new(row.sale.date.format("%Y-%m-%d %H:%M")),
            Cell::new(&row.product_name),
            Cell::new(row.sale.quantity),
            money_cell(config, row.sale.unit_price),
            money_cell(config, row.revenue),
            money_cell(config, row.profit),
        ]);
    }
    table
}
