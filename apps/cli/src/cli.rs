//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "stocktally",
    version,
    about = "Track inventory and sales across stores",
    long_about = "Track inventory and sales across one or more stores.\n\n\
                  Data is kept in a local SQLite database. Product and sale commands\n\
                  work on the selected store (see `stocktally stores select`)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log output (-v for info, -vv for debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of the platform default.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides config and STOCKTALLY_DB).
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage stores.
    #[command(subcommand)]
    Stores(StoresCommand),

    /// Manage the selected store's products.
    #[command(subcommand)]
    Products(ProductsCommand),

    /// Record and list the selected store's sales.
    #[command(subcommand)]
    Sales(SalesCommand),

    /// Show summary cards, low-stock products and recent sales.
    Dashboard,

    /// Print all data as JSON.
    Export,
}

#[derive(Debug, Subcommand)]
pub enum StoresCommand {
    /// List stores.
    List,

    /// Add a store.
    Add {
        /// Store name.
        name: String,
    },

    /// Rename a store.
    Rename {
        /// Store id.
        id: String,
        /// New name.
        name: String,
    },

    /// Delete a store with all of its products and sales.
    Delete {
        /// Store id.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Select the store that product and sale commands work on.
    Select {
        /// Store id.
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products with their sales totals.
    List,

    /// Add a product.
    Add(ProductArgs),

    /// Edit a product. Omitted fields keep their current values.
    Edit {
        /// Product id.
        id: String,
        #[command(flatten)]
        fields: ProductEditArgs,
    },

    /// Delete a product. Its sales are kept.
    Delete {
        /// Product id.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Product form fields. Values are taken as typed and coerced later.
#[derive(Debug, Clone, Args)]
pub struct ProductArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub sku: String,
    /// Unit cost.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub cost: String,
    /// Unit price.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub price: String,
    /// Units on hand.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub stock: String,
    /// Low-stock alert level.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub threshold: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProductEditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub sku: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub stock: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SalesCommand {
    /// Record a sale of a product in the selected store.
    Record {
        /// Product id.
        product_id: String,
        /// Units sold (at least 1).
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        qty: String,
        /// Price per unit. Defaults to the product's current price.
        #[arg(long, allow_hyphen_values = true)]
        unit_price: Option<String>,
    },

    /// List the selected store's sales, newest first.
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sale_record() {
        let cli = Cli::try_parse_from([
            "stocktally",
            "-vv",
            "sales",
            "record",
            "p1",
            "--qty",
            "-3",
            "--unit-price",
            "4.50",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Sales(SalesCommand::Record {
                product_id,
                qty,
                unit_price,
            }) => {
                assert_eq!(product_id, "p1");
                assert_eq!(qty, "-3");
                assert_eq!(unit_price.as_deref(), Some("4.50"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_db_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["stocktally", "dashboard", "--db", "/tmp/x.db"]).unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    }
}
