// src/export/writers.rs

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::{AttendanceRecord, HEADER};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Pretty-printed JSON array of records.
pub(crate) fn export_json(records: &[AttendanceRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(records)?;
    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with the same header as a ledger segment.
pub(crate) fn export_csv(records: &[AttendanceRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;
    for r in records {
        wtr.write_record(r.to_row())?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
