//! # CLI Error Types
//!
//! Errors a command can end with.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in stocktally                             │
//! │                                                                         │
//! │  ConfigError ──────────┐                                                │
//! │  DbError ──────────────┤                                                │
//! │  form validation ──────┼──► CliError ──► main: "error: ..." on stderr   │
//! │  unknown id ───────────┤                  exit code 1 or 2              │
//! │  no store selected ────┘                                                │
//! │                                                                         │
//! │  State store rejections never show up here: commands check ids before   │
//! │  calling a mutator, so a rejected mutation is a no-op, not a failure.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use stocktally_db::DbError;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`](crate::config::AppConfig).
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    /// A value is outside its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No platform data directory and no explicit database path.
    #[error("No data directory available on this platform; pass --db <PATH>")]
    NoDataDir,
}

/// Errors returned by commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// The named record does not exist (in the selected store).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Form input was rejected.
    #[error("{0}")]
    Validation(String),

    /// A store-scoped command ran without a selected store.
    #[error("Please create a store to get started.")]
    NoStoreSelected,

    #[error("Failed to serialize snapshot: {0}")]
    Export(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl CliError {
    /// Creates a NotFound error.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CliError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Process exit code: 2 for bad user input, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::NotFound { .. } | CliError::Validation(_) | CliError::NoStoreSelected => 2,
            _ => 1,
        }
    }
}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;
