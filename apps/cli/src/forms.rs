//! # Form Coercion
//!
//! Turns raw command-line text into typed field values before anything
//! reaches the state store.
//!
//! ## Rules
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ Field        │ Coercion                                                 │
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ name, sku    │ trimmed; a blank product name rejects the whole form     │
//! │ cost, price  │ leading decimal number; "", junk, NaN, negative  → 0     │
//! │              │ rounded to the minor unit, capped at MAX_MONEY_UNITS     │
//! │ stock,       │ leading integer ("12.7" → 12); "", junk, negative → 0    │
//! │ threshold    │ capped at MAX_COUNT                                      │
//! │ quantity     │ like a count, then at least 1                            │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! Trailing text after the number is ignored, as a browser number field does.

use stocktally_core::{Money, Product, ProductId, StoreId};

use crate::error::{CliError, CliResult};

/// Largest amount a money field accepts, in minor units.
///
/// With [`MAX_COUNT`] this keeps `cost × stock` far below the `i64` range.
pub const MAX_MONEY_UNITS: i64 = 1_000_000_000_000;

/// Largest value a count field (stock, threshold, quantity) accepts.
pub const MAX_COUNT: u32 = 1_000_000;

/// Parses a money field into minor units of a currency with `decimals`
/// fraction digits.
pub fn parse_money(input: &str, decimals: u8) -> Money {
    let value = numeric_prefix(input.trim(), true)
        .parse::<f64>()
        .unwrap_or(0.0);

    if !value.is_finite() || value <= 0.0 {
        return Money::zero();
    }

    let scaled = (value * 10_f64.powi(i32::from(decimals))).round();
    Money::from_cents((scaled as i64).min(MAX_MONEY_UNITS))
}

/// Parses a count field (stock, threshold).
pub fn parse_count(input: &str) -> u32 {
    let digits = numeric_prefix(input.trim(), false);
    if digits.starts_with('-') {
        return 0;
    }
    let digits = digits.trim_start_matches('+');
    if digits.is_empty() {
        return 0;
    }
    // Only ASCII digits remain, so a parse failure is an overflow.
    digits
        .parse::<u32>()
        .map_or(MAX_COUNT, |count| count.min(MAX_COUNT))
}

/// Parses a sale quantity: a count of at least 1.
pub fn parse_quantity(input: &str) -> u32 {
    parse_count(input).max(1)
}

/// Returns the longest leading slice that looks like a number.
///
/// `[+-]digits` and, with `fraction`, `[.digits][e[+-]digits]`.
fn numeric_prefix(input: &str, fraction: bool) -> &str {
    let bytes = input.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if fraction {
        if bytes.get(end) == Some(&b'.') {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
                frac_end += 1;
            }
            if has_digits || frac_end > frac_start {
                end = frac_end;
                has_digits = true;
            }
        }

        if has_digits && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exp_digits = exp_end;
            while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
                exp_end += 1;
            }
            if exp_end > exp_digits {
                end = exp_end;
            }
        }
    }

    if has_digits {
        &input[..end]
    } else {
        ""
    }
}

// =============================================================================
// Product Form
// =============================================================================

/// Raw product form fields, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
    pub cost: String,
    pub price: String,
    pub stock: String,
    pub threshold: String,
}

impl ProductForm {
    /// Prefills the form from a stored product, the way an edit dialog does.
    pub fn from_product(product: &Product, decimals: u8) -> Self {
        ProductForm {
            name: product.name.clone(),
            sku: product.sku.clone(),
            cost: format_plain(product.cost, decimals),
            price: format_plain(product.price, decimals),
            stock: product.stock.to_string(),
            threshold: product.stock_alert_threshold.to_string(),
        }
    }

    /// Coerces the form into a product record.
    ///
    /// Rejected only when the trimmed name is blank.
    pub fn into_product(
        self,
        id: ProductId,
        store_id: StoreId,
        decimals: u8,
    ) -> CliResult<Product> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CliError::Validation("Product name is required".to_string()));
        }

        Ok(Product {
            id,
            store_id,
            name: name.to_string(),
            sku: self.sku.trim().to_string(),
            cost: parse_money(&self.cost, decimals),
            price: parse_money(&self.price, decimals),
            stock: parse_count(&self.stock),
            stock_alert_threshold: parse_count(&self.threshold),
        })
    }
}

/// Renders minor units as a bare decimal string (`1234` → `"12.34"`).
fn format_plain(amount: Money, decimals: u8) -> String {
    let units = amount.cents();
    let divisor = 10_i64.pow(u32::from(decimals));
    let sign = if units < 0 { "-" } else { "" };
    let whole = (units / divisor).unsigned_abs();
    let frac = (units % divisor).unsigned_abs();

    if decimals == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac:0width$}", width = usize::from(decimals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_plain_values() {
        assert_eq!(parse_money("12.34", 2), Money::from_cents(1234));
        assert_eq!(parse_money("  5 ", 2), Money::from_cents(500));
        assert_eq!(parse_money(".5", 2), Money::from_cents(50));
        assert_eq!(parse_money("1e2", 2), Money::from_cents(10_000));
    }

    #[test]
    fn test_parse_money_rounds_to_minor_unit() {
        assert_eq!(parse_money("0.125", 2), Money::from_cents(13));
        assert_eq!(parse_money("19.999", 2), Money::from_cents(2000));
        assert_eq!(parse_money("7.6", 0), Money::from_cents(8));
        assert_eq!(parse_money("1.2346", 3), Money::from_cents(1235));
    }

    #[test]
    fn test_parse_money_falls_back_to_zero() {
        assert_eq!(parse_money("", 2), Money::zero());
        assert_eq!(parse_money("abc", 2), Money::zero());
        assert_eq!(parse_money("-4.50", 2), Money::zero());
        assert_eq!(parse_money("NaN", 2), Money::zero());
        assert_eq!(parse_money("Infinity", 2), Money::zero());
        assert_eq!(parse_money(".", 2), Money::zero());
    }

    #[test]
    fn test_parse_money_ignores_trailing_text() {
        assert_eq!(parse_money("3.5kg", 2), Money::from_cents(350));
        assert_eq!(parse_money("2e", 2), Money::from_cents(200));
    }

    #[test]
    fn test_parse_money_is_capped() {
        let cap = Money::from_cents(MAX_MONEY_UNITS);

        assert_eq!(parse_money("1e17", 2), cap);
        assert_eq!(parse_money("1e300", 2), cap);
        assert_eq!(parse_money("10000000000", 2), cap);
        assert_eq!(parse_money("9999999999.99", 2), Money::from_cents(999_999_999_999));
    }

    #[test]
    fn test_capped_fields_cannot_overflow_inventory_value() {
        let form = ProductForm {
            name: "Gold".into(),
            cost: "1e17".into(),
            stock: "4294967295".into(),
            ..ProductForm::default()
        };

        let product = form
            .into_product(ProductId::new("p1"), StoreId::new("s1"), 4)
            .unwrap();

        assert_eq!(product.stock, MAX_COUNT);
        assert_eq!(
            product.inventory_value().cents(),
            MAX_MONEY_UNITS * i64::from(MAX_COUNT)
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("12.7"), 12);
        assert_eq!(parse_count("+3"), 3);
        assert_eq!(parse_count("7 boxes"), 7);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("many"), 0);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("1000000"), MAX_COUNT);
        assert_eq!(parse_count("1000001"), MAX_COUNT);
        assert_eq!(parse_count("99999999999"), MAX_COUNT);
    }

    #[test]
    fn test_parse_quantity_is_at_least_one() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("-2"), 1);
    }

    #[test]
    fn test_form_coercion() {
        let form = ProductForm {
            name: "  Mug ".into(),
            sku: " M-1 ".into(),
            cost: "2.5".into(),
            price: "abc".into(),
            stock: "-1".into(),
            threshold: "4".into(),
        };

        let product = form
            .into_product(ProductId::new("p1"), StoreId::new("s1"), 2)
            .unwrap();

        assert_eq!(product.name, "Mug");
        assert_eq!(product.sku, "M-1");
        assert_eq!(product.cost, Money::from_cents(250));
        assert_eq!(product.price, Money::zero());
        assert_eq!(product.stock, 0);
        assert_eq!(product.stock_alert_threshold, 4);
    }

    #[test]
    fn test_blank_name_rejects_form() {
        let form = ProductForm {
            name: "   ".into(),
            price: "10".into(),
            ..ProductForm::default()
        };

        let result = form.into_product(ProductId::new("p1"), StoreId::new("s1"), 2);

        assert!(matches!(result, Err(CliError::Validation(_))));
    }

    #[test]
    fn test_prefill_round_trips_values() {
        let product = Product {
            id: ProductId::new("p1"),
            store_id: StoreId::new("s1"),
            name: "Mug".into(),
            sku: "M-1".into(),
            cost: Money::from_cents(205),
            price: Money::from_cents(1000),
            stock: 8,
            stock_alert_threshold: 2,
        };

        let form = ProductForm::from_product(&product, 2);
        assert_eq!(form.cost, "2.05");
        assert_eq!(form.price, "10.00");

        let again = form
            .into_product(product.id.clone(), product.store_id.clone(), 2)
            .unwrap();
        assert_eq!(again, product);
    }
}
