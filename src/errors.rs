//! Unified application error type.
//! Every module (store, core, roster, cli) returns AppError so that a failed
//! submission is reported the same way no matter where it broke.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Ledger outcomes
    // ---------------------------
    #[error("{person} is already checked in ({segment}). Please check out first.")]
    AlreadyOpen { person: String, segment: String },

    #[error("No check-in record found for {person} ({segment}).")]
    NoOpenSession { person: String, segment: String },

    #[error("Malformed record at row {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Row store unavailable: {0}")]
    StoreUnavailable(String),

    // ---------------------------
    // Store-level failures
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Segment '{0}' does not exist")]
    SegmentNotFound(String),

    #[error("Row {index} not found in segment '{segment}'")]
    RowNotFound { segment: String, index: usize },

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Invalid segment name: {0}")]
    InvalidSegment(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),

    #[error("Person name must not be empty")]
    EmptyPerson,

    #[error("'{0}' is not in the roster")]
    UnknownPerson(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// Failures worth retrying: the same call may succeed a moment later.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::Interrupted
                    | io::ErrorKind::TimedOut
                    | io::ErrorKind::WouldBlock
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
            ),
            AppError::Db(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            AppError::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(io_err) => matches!(
                    io_err.kind(),
                    io::ErrorKind::Interrupted | io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
                ),
                _ => false,
            },
            _ => false,
        }
    }

    /// Collapse a collaborator failure into `StoreUnavailable`.
    /// Errors that already carry ledger meaning pass through untouched.
    pub fn into_store_unavailable(self) -> AppError {
        match self {
            AppError::StoreUnavailable(_)
            | AppError::InvalidSegment(_)
            | AppError::AlreadyOpen { .. }
            | AppError::NoOpenSession { .. } => self,
            other => AppError::StoreUnavailable(other.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
