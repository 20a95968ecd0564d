//! In-memory row store, used by tests and as a scratch backend.

use super::{ActivityLog, LogEntry, RowStore, now_stamp, validate_segment};
use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Sheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: Mutex<BTreeMap<String, Sheet>>,
    log: Mutex<Vec<LogEntry>>,
}

fn lock<T>(m: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| AppError::StoreUnavailable("memory store lock poisoned".into()))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header row of `segment`, if it exists.
    pub fn header(&self, segment: &str) -> AppResult<Option<Vec<String>>> {
        Ok(lock(&self.sheets)?.get(segment).map(|s| s.header.clone()))
    }

    /// Push a raw row without any shape check. Handy for seeding damaged data.
    pub fn push_raw(&self, segment: &str, row: Vec<String>) -> AppResult<()> {
        let mut sheets = lock(&self.sheets)?;
        let sheet = sheets
            .get_mut(segment)
            .ok_or_else(|| AppError::SegmentNotFound(segment.to_string()))?;
        sheet.rows.push(row);
        Ok(())
    }
}

impl RowStore for MemoryStore {
    fn read_all(&self, segment: &str) -> AppResult<Vec<Vec<String>>> {
        validate_segment(segment)?;
        Ok(lock(&self.sheets)?
            .get(segment)
            .map(|s| s.rows.clone())
            .unwrap_or_default())
    }

    fn append_row(&self, segment: &str, row: &[String]) -> AppResult<()> {
        validate_segment(segment)?;
        self.push_raw(segment, row.to_vec())
    }

    fn update_row(&self, segment: &str, index: usize, row: &[String]) -> AppResult<()> {
        validate_segment(segment)?;
        let mut sheets = lock(&self.sheets)?;
        let slot = sheets
            .get_mut(segment)
            .and_then(|s| index.checked_sub(1).and_then(|i| s.rows.get_mut(i)))
            .ok_or_else(|| AppError::RowNotFound {
                segment: segment.to_string(),
                index,
            })?;
        *slot = row.to_vec();
        Ok(())
    }

    fn segment_exists(&self, segment: &str) -> AppResult<bool> {
        validate_segment(segment)?;
        Ok(lock(&self.sheets)?.contains_key(segment))
    }

    fn create_segment(&self, segment: &str, header: &[String]) -> AppResult<()> {
        validate_segment(segment)?;
        lock(&self.sheets)?
            .entry(segment.to_string())
            .or_insert_with(|| Sheet {
                header: header.to_vec(),
                rows: Vec::new(),
            });
        Ok(())
    }

    fn segments(&self) -> AppResult<Vec<String>> {
        Ok(lock(&self.sheets)?.keys().cloned().collect())
    }
}

impl ActivityLog for MemoryStore {
    fn record(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let mut log = lock(&self.log)?;
        let id = log.len() as i64 + 1;
        log.push(LogEntry {
            id,
            date: now_stamp(),
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn entries(&self) -> AppResult<Vec<LogEntry>> {
        Ok(lock(&self.log)?.clone())
    }
}
