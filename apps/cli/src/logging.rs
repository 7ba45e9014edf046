//! Tracing subscriber setup.
//!
//! ## Log Levels
//! - Default: `warn`
//! - `-v`: `info` for the stocktally crates
//! - `-vv`: `debug` for the stocktally crates, `info` for sqlx
//! - `RUST_LOG` replaces all of the above
//!
//! Logs go to stderr; stdout carries command output only.

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Filter directives for a `-v` count.
pub fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,stocktally_core=info,stocktally_db=info,stocktally_cli=info",
        _ => "warn,stocktally_core=debug,stocktally_db=debug,stocktally_cli=debug,sqlx=info",
    }
}

/// Installs the global subscriber.
pub fn init_tracing(verbose: u8) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_parse() {
        for verbose in 0..4 {
            assert!(EnvFilter::try_new(default_directives(verbose)).is_ok());
        }
    }

    #[test]
    fn test_more_verbosity_means_more_output() {
        assert_eq!(default_directives(0), "warn");
        assert!(default_directives(1).contains("stocktally_db=info"));
        assert!(default_directives(2).contains("stocktally_db=debug"));
        assert_eq!(default_directives(7), default_directives(2));
    }
}
