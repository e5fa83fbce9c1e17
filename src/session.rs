// 💼 Session Store
// One cash-drawer session: the two record lists and the drawer flags.
//
// Every user action is a method here. A method that fails returns before
// touching any field, so a rejected action leaves the session as it was.

use crate::error::{ExportError, ImportError, ValidationError};
use crate::export;
use crate::import::{self, ImportSummary, RawTable};
use crate::record::{MovementKind, Record};
use crate::totals::{compute_totals, Totals};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Label of the opening-balance record unless configured otherwise
pub const DEFAULT_OPENING_LABEL: &str = "Caja inicial";

#[derive(Debug, Clone)]
pub struct Session {
    manual_records: Vec<Record>,
    imported_records: Vec<Record>,
    drawer_initialized: bool,
    drawer_active: bool,
    opening_label: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_opening_label(DEFAULT_OPENING_LABEL)
    }

    pub fn with_opening_label(label: impl Into<String>) -> Self {
        Session {
            manual_records: Vec::new(),
            imported_records: Vec::new(),
            drawer_initialized: false,
            drawer_active: false,
            opening_label: label.into(),
        }
    }

    // ========================================================================
    // READ-ONLY VIEWS
    // ========================================================================

    pub fn manual_records(&self) -> &[Record] {
        &self.manual_records
    }

    pub fn imported_records(&self) -> &[Record] {
        &self.imported_records
    }

    pub fn drawer_initialized(&self) -> bool {
        self.drawer_initialized
    }

    pub fn drawer_active(&self) -> bool {
        self.drawer_active
    }

    pub fn is_empty(&self) -> bool {
        self.manual_records.is_empty() && self.imported_records.is_empty()
    }

    /// Current totals, computed from scratch
    pub fn totals(&self) -> Totals {
        compute_totals(&self.manual_records, &self.imported_records)
    }

    // ========================================================================
    // DRAWER
    // ========================================================================

    pub fn set_drawer_active(&mut self, active: bool) {
        self.drawer_active = active;
        debug!("Drawer input {}", if active { "shown" } else { "hidden" });
    }

    pub fn toggle_drawer(&mut self) -> bool {
        self.set_drawer_active(!self.drawer_active);
        self.drawer_active
    }

    /// Register the opening cash amount as an income record.
    ///
    /// Only the first call with a positive amount while the drawer input is
    /// active does anything; returns whether a record was appended.
    pub fn register_opening_balance(&mut self, amount: Decimal, today: NaiveDate) -> bool {
        if !self.drawer_active || self.drawer_initialized || amount <= Decimal::ZERO {
            debug!(
                active = self.drawer_active,
                initialized = self.drawer_initialized,
                %amount,
                "Opening balance ignored"
            );
            return false;
        }

        let record = match Record::new(MovementKind::Income, self.opening_label.clone(), amount, today) {
            Ok(record) => record,
            Err(e) => {
                warn!("Opening balance rejected: {}", e);
                return false;
            }
        };

        self.manual_records.push(record);
        self.drawer_initialized = true;
        info!(%amount, "Opening balance registered");
        true
    }

    // ========================================================================
    // MOVEMENTS
    // ========================================================================

    /// Append a manual income or expense. Identical submissions are kept as
    /// separate records.
    pub fn register_movement(
        &mut self,
        kind: MovementKind,
        label: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<&Record, ValidationError> {
        let record = Record::new(kind, label, amount, date)?;
        info!(kind = %kind, label, %amount, %date, "Movement registered");
        self.manual_records.push(record);
        Ok(&self.manual_records[self.manual_records.len() - 1])
    }

    // ========================================================================
    // IMPORT
    // ========================================================================

    /// Replace the imported records with the rows of `table`.
    ///
    /// The previous import survives any error: the new rows are swapped in
    /// only after the whole table parsed.
    pub fn import_table(
        &mut self,
        table: &RawTable,
        today: NaiveDate,
    ) -> Result<ImportSummary, ImportError> {
        let (records, summary) = import::parse_table(table, today)?;
        self.imported_records = records;
        info!(
            rows = summary.rows_read,
            imported = summary.imported,
            skipped = summary.skipped,
            "Import replaced previous table"
        );
        Ok(summary)
    }

    /// Read a CSV file and import it
    pub fn import_file(
        &mut self,
        path: &Path,
        delimiter: u8,
        today: NaiveDate,
    ) -> Result<ImportSummary, ImportError> {
        let table = import::read_table_from_path(path, delimiter)?;
        self.import_table(&table, today)
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    /// Render this session's report for `date` as PDF bytes
    pub fn export_report(&self, date: NaiveDate) -> Result<Vec<u8>, ExportError> {
        self.ensure_exportable()?;
        export::export_report(date, &self.totals(), &self.manual_records)
    }

    /// Write this session's report into `dir` as `corte_caja_<YYYYMMDD>.pdf`
    pub fn write_report(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf, ExportError> {
        self.ensure_exportable()?;
        export::write_report(dir, date, &self.totals(), &self.manual_records)
    }

    fn ensure_exportable(&self) -> Result<(), ExportError> {
        if self.is_empty() {
            warn!("Export requested with no movements");
            return Err(ExportError::NothingToExport);
        }
        Ok(())
    }

    // ========================================================================
    // RESET
    // ========================================================================

    /// Drop every record and allow a new opening balance.
    /// The drawer visibility toggle is a UI preference and is kept.
    pub fn clear_all(&mut self) {
        let dropped = self.manual_records.len() + self.imported_records.len();
        self.manual_records.clear();
        self.imported_records.clear();
        self.drawer_initialized = false;
        info!(dropped, "Session cleared");
    }
}
