//! Row-store collaborators.
//!
//! A store keeps ordered rows of string fields per named segment (one sheet,
//! file or table partition per period). The ledger only relies on the
//! [`RowStore`] capability set, so the same logic runs against the in-memory
//! store in tests, a directory of CSV files, or the SQLite database.

pub mod csv_file;
pub mod memory;
pub mod retry;
pub mod sqlite;

use crate::config::{BackendKind, Config};
use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, LazyLock};

pub use csv_file::CsvStore;
pub use memory::MemoryStore;
pub use retry::{RetryPolicy, Retrying};
pub use sqlite::SqliteStore;

static SEGMENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,99}$").expect("static regex"));

/// Segment names end up as file names and SQL keys; keep them boring.
pub fn validate_segment(name: &str) -> AppResult<()> {
    if SEGMENT_NAME.is_match(name) {
        Ok(())
    } else {
        Err(AppError::InvalidSegment(name.to_string()))
    }
}

pub trait RowStore: Send + Sync {
    /// All data rows of `segment` in order, header excluded.
    /// A segment that does not exist yet reads as empty.
    fn read_all(&self, segment: &str) -> AppResult<Vec<Vec<String>>>;

    /// Append one row at the end of an existing segment.
    fn append_row(&self, segment: &str, row: &[String]) -> AppResult<()>;

    /// Replace the row at 1-based `index`, counted over the rows returned by
    /// [`RowStore::read_all`].
    fn update_row(&self, segment: &str, index: usize, row: &[String]) -> AppResult<()>;

    fn segment_exists(&self, segment: &str) -> AppResult<bool>;

    /// Create `segment` with `header` as its first row. Creating a segment
    /// that already exists leaves it untouched.
    fn create_segment(&self, segment: &str, header: &[String]) -> AppResult<()>;

    /// Names of every known segment, sorted.
    fn segments(&self) -> AppResult<Vec<String>>;
}

/// One line of the internal activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Internal audit trail kept next to the ledger data.
pub trait ActivityLog: Send + Sync {
    fn record(&self, operation: &str, target: &str, message: &str) -> AppResult<()>;

    fn entries(&self) -> AppResult<Vec<LogEntry>>;
}

/// Everything the CLI needs from one storage backend.
pub trait Backend: RowStore + ActivityLog {}

impl<T: RowStore + ActivityLog + ?Sized> Backend for T {}

/// Open the backend selected by the configuration, wrapped in the
/// configured retry policy.
pub fn open(cfg: &Config) -> AppResult<Arc<dyn Backend>> {
    let policy = RetryPolicy::from_config(cfg);

    let backend: Arc<dyn Backend> = match cfg.backend {
        BackendKind::Sqlite => {
            let store = SqliteStore::open(&cfg.database_path(), cfg.busy_timeout())
                .map_err(AppError::into_store_unavailable)?;
            Arc::new(Retrying::new(store, policy))
        }
        BackendKind::Csv => {
            let store =
                CsvStore::open(&cfg.data_dir_path()).map_err(AppError::into_store_unavailable)?;
            Arc::new(Retrying::new(store, policy))
        }
    };

    Ok(backend)
}

pub(crate) fn now_stamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
