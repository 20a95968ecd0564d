// src/export/logic.rs

use crate::core::ledger::AttendanceLedger;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::writers::{export_csv, export_json};
use crate::store::RowStore;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level logic for `export`.
pub struct ExportLogic;

impl ExportLogic {
    /// Dump every well-formed record of `segment` to `file` (absolute path).
    /// Returns how many records were written.
    pub fn export<S: RowStore + ?Sized>(
        ledger: &AttendanceLedger<S>,
        segment: &str,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let records = ledger.records(segment)?;
        if records.is_empty() {
            warning(format!("No records found in segment {segment}."));
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&records, path)?,
            ExportFormat::Json => export_json(&records, path)?,
        }

        Ok(records.len())
    }
}
