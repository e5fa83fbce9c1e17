// 📂 Import Adapter
// CSV file → RawTable → validated income records
//
// Reading and validating are separate steps: `read_table` only knows about
// CSV, `parse_table` only knows about the `Nombre` / `Precio` columns.

use crate::error::ImportError;
use crate::record::{parse_amount, MovementKind, Record};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Column holding the label of each imported row
pub const NAME_COLUMN: &str = "Nombre";
/// Column holding the price of each imported row
pub const PRICE_COLUMN: &str = "Precio";

/// Spreadsheet markers for a missing value. A `Precio` cell holding one of
/// these skips the row instead of failing the import.
const MISSING_MARKERS: [&str; 6] = ["", "NaN", "nan", "NA", "N/A", "null"];

// ============================================================================
// RAW TABLE
// ============================================================================

/// RawTable - cells exactly as read from the file, no typing applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawTable { headers, rows }
    }

    /// Index of a header, matched literally
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows present in the file
    pub rows_read: usize,
    /// Rows that became records
    pub imported: usize,
    /// Rows dropped for an empty label or a missing / non-positive price
    pub skipped: usize,
}

// ============================================================================
// READING
// ============================================================================

/// Read a delimited table from any reader. The first line is the header.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<RawTable, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Read a delimited table from disk
pub fn read_table_from_path(path: &Path, delimiter: u8) -> Result<RawTable, ImportError> {
    let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_table(file, delimiter)?;
    info!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Turn a raw table into income records dated `today`.
///
/// Fails on a missing column or a price that is not a number; a single bad
/// price rejects the whole table. Rows with an empty name or a missing,
/// zero or negative price are dropped without error.
pub fn parse_table(
    table: &RawTable,
    today: NaiveDate,
) -> Result<(Vec<Record>, ImportSummary), ImportError> {
    let (name_idx, price_idx) = required_columns(table)?;

    let mut records = Vec::with_capacity(table.len());
    let mut skipped = 0;

    for (i, row) in table.rows.iter().enumerate() {
        // Row numbers as a spreadsheet user sees them: header is row 1
        let row_number = i + 2;
        let name = row.get(name_idx).map(|s| s.trim()).unwrap_or("");
        let raw_price = row.get(price_idx).map(|s| s.trim()).unwrap_or("");

        let price = match parse_price(raw_price) {
            Ok(Some(price)) => price,
            Ok(None) => {
                debug!("Row {}: missing price, skipped", row_number);
                skipped += 1;
                continue;
            }
            Err(()) => {
                return Err(ImportError::MalformedNumber {
                    row: row_number,
                    value: raw_price.to_string(),
                });
            }
        };

        match Record::new(MovementKind::Income, name, price, today) {
            Ok(record) => records.push(record),
            Err(reason) => {
                debug!("Row {}: {}, skipped", row_number, reason);
                skipped += 1;
            }
        }
    }

    let summary = ImportSummary {
        rows_read: table.len(),
        imported: records.len(),
        skipped,
    };

    Ok((records, summary))
}

fn required_columns(table: &RawTable) -> Result<(usize, usize), ImportError> {
    match (table.column(NAME_COLUMN), table.column(PRICE_COLUMN)) {
        (Some(name), Some(price)) => Ok((name, price)),
        (name, price) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push(NAME_COLUMN.to_string());
            }
            if price.is_none() {
                missing.push(PRICE_COLUMN.to_string());
            }
            Err(ImportError::MissingColumns { missing })
        }
    }
}

/// `Ok(None)` for a missing value, `Err(())` for text that is not a number
fn parse_price(raw: &str) -> Result<Option<Decimal>, ()> {
    if MISSING_MARKERS.contains(&raw) {
        return Ok(None);
    }
    parse_amount(raw).map(Some).ok_or(())
}
