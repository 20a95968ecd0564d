use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;

/// Value held by `check_out` and `duration` while a session is still open.
pub const OPEN_SENTINEL: &str = "-";

/// Fixed header written as the first row of every ledger segment.
pub const HEADER: [&str; 5] = ["Date", "Name", "Check-In", "Check-Out", "Duration"];

/// Minimum number of columns a row needs to take part in open/closed matching.
const MIN_FIELDS: usize = 4;

/// One row of a ledger segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub date: String,      // ⇔ column A, "YYYY-MM-DD"
    pub person: String,    // ⇔ column B
    pub check_in: String,  // ⇔ column C, "HH:MM" or "HH:MM:SS"
    pub check_out: String, // ⇔ column D, time or OPEN_SENTINEL
    pub duration: String,  // ⇔ column E, "<H>h <M>m" or OPEN_SENTINEL
}

impl AttendanceRecord {
    /// A freshly opened session.
    pub fn open(date: NaiveDate, person: &str, check_in: String) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            person: person.to_string(),
            check_in,
            check_out: OPEN_SENTINEL.to_string(),
            duration: OPEN_SENTINEL.to_string(),
        }
    }

    /// Decode a raw store row. `index` is the 1-based data-row position,
    /// used only to describe the failure.
    pub fn from_row(index: usize, row: &[String]) -> AppResult<Self> {
        if row.len() < MIN_FIELDS {
            return Err(AppError::MalformedRecord {
                index,
                reason: format!("expected at least {MIN_FIELDS} fields, found {}", row.len()),
            });
        }

        Ok(Self {
            date: row[0].clone(),
            person: row[1].clone(),
            check_in: row[2].clone(),
            check_out: row[3].clone(),
            duration: row.get(4).cloned().unwrap_or_default(),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.person.clone(),
            self.check_in.clone(),
            self.check_out.clone(),
            self.duration.clone(),
        ]
    }

    pub fn is_open(&self) -> bool {
        self.check_out == OPEN_SENTINEL
    }

    pub fn header_row() -> Vec<String> {
        HEADER.iter().map(|h| h.to_string()).collect()
    }
}
