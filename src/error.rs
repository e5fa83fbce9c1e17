// 🚨 Error taxonomy
// Every failure is recovered at the action that triggered it; none of these
// leave the session half-updated.

use rust_decimal::Decimal;
use std::path::PathBuf;

/// Bad user input on the manual movement form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("label cannot be empty")]
    EmptyLabel,
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("amount exceeds the allowed maximum, got {0}")]
    AmountTooLarge(Decimal),
}

/// Failure while reading or validating an imported table.
/// The previous import is kept untouched whenever one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("malformed numeric field at row {row}: {value:?}")]
    MalformedNumber { row: usize, value: String },

    #[error("could not read table: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while producing the printable report
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No hay movimientos para exportar")]
    NothingToExport,

    #[error("could not render PDF: {0}")]
    Render(String),

    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Error returned by [`crate::command::dispatch`]
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Import(#[from] ImportError),
}
