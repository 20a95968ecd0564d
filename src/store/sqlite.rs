//! SQLite store: every segment is a logical sheet inside one database file.

use super::{ActivityLog, LogEntry, RowStore, validate_segment};
use crate::db::{log, migrate, pool::DbPool, queries};
use crate::errors::AppResult;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &Path, busy_timeout: Duration) -> AppResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Self::with_pool(DbPool::new(path, busy_timeout)?)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        Self::with_pool(DbPool::in_memory()?)
    }

    fn with_pool(pool: DbPool) -> AppResult<Self> {
        pool.with_conn(|conn| migrate::run_pending_migrations(conn).map(|_| ()))?;
        Ok(Self { pool })
    }

    pub fn header(&self, segment: &str) -> AppResult<Option<Vec<String>>> {
        self.pool
            .with_conn(|conn| queries::load_header(conn, segment))
    }

    pub fn schema_version(&self) -> AppResult<i64> {
        self.pool.with_conn(|conn| migrate::current_version(conn))
    }
}

impl RowStore for SqliteStore {
    fn read_all(&self, segment: &str) -> AppResult<Vec<Vec<String>>> {
        validate_segment(segment)?;
        self.pool.with_conn(|conn| queries::load_rows(conn, segment))
    }

    fn append_row(&self, segment: &str, row: &[String]) -> AppResult<()> {
        validate_segment(segment)?;
        self.pool
            .with_conn(|conn| queries::insert_row(conn, segment, row))
    }

    fn update_row(&self, segment: &str, index: usize, row: &[String]) -> AppResult<()> {
        validate_segment(segment)?;
        self.pool
            .with_conn(|conn| queries::update_row(conn, segment, index, row))
    }

    fn segment_exists(&self, segment: &str) -> AppResult<bool> {
        validate_segment(segment)?;
        self.pool
            .with_conn(|conn| queries::segment_exists(conn, segment))
    }

    fn create_segment(&self, segment: &str, header: &[String]) -> AppResult<()> {
        validate_segment(segment)?;
        self.pool.with_conn(|conn| {
            if queries::create_segment(conn, segment, header)? {
                log::ttlog(conn, "segment_created", segment, "Segment created")?;
            }
            Ok(())
        })
    }

    fn segments(&self) -> AppResult<Vec<String>> {
        self.pool.with_conn(|conn| queries::list_segments(conn))
    }
}

impl ActivityLog for SqliteStore {
    fn record(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.pool
            .with_conn(|conn| log::ttlog(conn, operation, target, message))
    }

    fn entries(&self) -> AppResult<Vec<LogEntry>> {
        self.pool.with_conn(|conn| log::load_log(conn))
    }
}
