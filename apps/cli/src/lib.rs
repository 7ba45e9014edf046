//! # stocktally-cli
//!
//! Command-line front end for Stock Tally.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs      parse args, init tracing, run, map errors to exit codes   │
//! │  commands/    one handler per subcommand (sync, console in/out)         │
//! │  forms        text → typed fields, the only place numbers are parsed    │
//! │  render       comfy-table output                                        │
//! │  session      database + snapshot writer + TrackerState                 │
//! │  config       TOML file, STOCKTALLY_* env, currency formatting          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod forms;
pub mod logging;
pub mod render;
pub mod session;

use tracing::debug;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::console::Console;
use crate::error::CliResult;
use crate::session::Session;

/// Runs a parsed invocation against the configured database.
pub async fn run(cli: Cli) -> CliResult<()> {
    let mut config = AppConfig::load(cli.config)?;
    if let Some(path) = cli.db {
        config.database.path = Some(path);
    }

    let mut session = Session::open(config).await?;
    let result = {
        let mut console = Console::stdio();
        commands::execute(cli.command, &mut session, &mut console)
    };

    // Flush the writer even when the command failed.
    let stats = session.close().await?;
    debug!(saved = stats.saved, failed = stats.failed, "Session closed");

    result
}
