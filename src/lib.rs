// Corte de Caja - Core Library
// Session, import and export logic shared by the TUI and the batch command

pub mod record;
pub mod totals;
pub mod session;
pub mod import;
pub mod export;
pub mod command;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use record::{format_money, max_amount, parse_amount, MovementKind, Record};
pub use totals::{compute_totals, Totals};
pub use session::{Session, DEFAULT_OPENING_LABEL};
pub use import::{
    parse_table, read_table, read_table_from_path,
    ImportSummary, RawTable, NAME_COLUMN, PRICE_COLUMN,
};
pub use export::{
    export_report, render_pdf, report_filename, write_report,
    PageLayout, PlacedLine, Report, ReportLine,
};
pub use command::{dispatch, Command, Outcome};
pub use config::{CorteConfig, ResolvedConfig};
pub use error::{CommandError, ConfigError, ExportError, ImportError, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
