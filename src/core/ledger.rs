//! The attendance ledger: check-in appends, check-out scans and closes.
//!
//! Every public operation holds the segment's lock for its whole
//! read-modify-write, so two submissions for the same segment never observe
//! the same "not open" state.

use crate::config::Config;
use crate::core::period::ensure_segment;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceRecord, TimePrecision};
use crate::store::RowStore;
use crate::utils::formatting::format_duration;
use crate::utils::time::{self, Elapsed};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    pub precision: TimePrecision,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            precision: TimePrecision::Minutes,
        }
    }
}

impl LedgerConfig {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            precision: cfg.time_precision,
        }
    }
}

/// Result of a successful check-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOut {
    /// The record as written back.
    pub record: AttendanceRecord,
    /// 1-based row index inside the segment.
    pub index: usize,
    pub elapsed_minutes: i64,
    /// Check-out was earlier in the day than check-in; 24h were added.
    pub wrapped_midnight: bool,
}

/// An open session located by a scan.
struct OpenMatch {
    index: usize,
    row: Vec<String>,
    record: AttendanceRecord,
    check_in: chrono::NaiveTime,
}

pub struct AttendanceLedger<S: ?Sized> {
    store: Arc<S>,
    cfg: LedgerConfig,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

fn store_err(e: AppError) -> AppError {
    e.into_store_unavailable()
}

/// Names are compared as given; only a blank name is refused.
fn check_person(person: &str) -> AppResult<&str> {
    if person.trim().is_empty() {
        return Err(AppError::EmptyPerson);
    }
    Ok(person)
}

impl<S: RowStore + ?Sized> AttendanceLedger<S> {
    pub fn new(store: Arc<S>, cfg: LedgerConfig) -> Self {
        Self {
            store,
            cfg,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn precision(&self) -> TimePrecision {
        self.cfg.precision
    }

    fn segment_lock(&self, segment: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(segment.to_string()).or_default().clone()
    }

    fn hold(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_rows(&self, segment: &str) -> AppResult<Vec<Vec<String>>> {
        self.store.read_all(segment).map_err(store_err)
    }

    /// True when some row holds an open session for `person`: enough fields,
    /// exact name match and the open sentinel in check_out. The check-in
    /// time is not looked at, so an unreadable one still counts as open.
    fn has_open(&self, segment: &str, person: &str) -> AppResult<bool> {
        Ok(self.read_rows(segment)?.iter().enumerate().any(|(i, row)| {
            AttendanceRecord::from_row(i + 1, row)
                .is_ok_and(|r| r.person == person && r.is_open())
        }))
    }

    /// First open record for `person` that can actually be closed. Rows that
    /// are too short, or open rows whose check-in does not parse, are skipped.
    fn find_closable(&self, segment: &str, person: &str) -> AppResult<Option<OpenMatch>> {
        for (i, row) in self.read_rows(segment)?.into_iter().enumerate() {
            let index = i + 1;
            let Ok(record) = AttendanceRecord::from_row(index, &row) else {
                continue;
            };
            if record.person != person || !record.is_open() {
                continue;
            }
            let Some(check_in) = time::parse_time(&record.check_in) else {
                continue;
            };
            return Ok(Some(OpenMatch {
                index,
                row,
                record,
                check_in,
            }));
        }
        Ok(None)
    }

    /// True when `person` has an open session in `segment`.
    pub fn is_open(&self, segment: &str, person: &str) -> AppResult<bool> {
        let person = check_person(person)?;
        let lock = self.segment_lock(segment);
        let _guard = Self::hold(&lock);
        self.has_open(segment, person)
    }

    /// Open a session for `person` at `at`.
    pub fn check_in(
        &self,
        segment: &str,
        person: &str,
        at: NaiveDateTime,
    ) -> AppResult<AttendanceRecord> {
        let person = check_person(person)?;
        let lock = self.segment_lock(segment);
        let _guard = Self::hold(&lock);

        if self.has_open(segment, person)? {
            return Err(AppError::AlreadyOpen {
                person: person.to_string(),
                segment: segment.to_string(),
            });
        }

        ensure_segment(&*self.store, segment).map_err(store_err)?;

        let check_in = time::format_time(
            time::truncate(at.time(), self.cfg.precision),
            self.cfg.precision,
        );
        let record = AttendanceRecord::open(at.date(), person, check_in);
        self.store
            .append_row(segment, &record.to_row())
            .map_err(store_err)?;

        Ok(record)
    }

    /// Close the first open session of `person` at `at`.
    pub fn check_out(&self, segment: &str, person: &str, at: NaiveDateTime) -> AppResult<CheckOut> {
        let person = check_person(person)?;
        let lock = self.segment_lock(segment);
        let _guard = Self::hold(&lock);

        let OpenMatch {
            index,
            mut row,
            mut record,
            check_in,
        } = self
            .find_closable(segment, person)?
            .ok_or_else(|| AppError::NoOpenSession {
                person: person.to_string(),
                segment: segment.to_string(),
            })?;

        let precision = self.cfg.precision;
        let start = time::truncate(check_in, precision);
        let end = time::truncate(at.time(), precision);
        let Elapsed {
            minutes,
            wrapped_midnight,
        } = match NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d") {
            Ok(date) => time::elapsed_between(date.and_time(start), at.date().and_time(end)),
            Err(_) => time::elapsed(start, end),
        };

        record.check_out = time::format_time(end, precision);
        record.duration = format_duration(minutes);

        if row.len() < 5 {
            row.resize(5, String::new());
        }
        row[3] = record.check_out.clone();
        row[4] = record.duration.clone();

        self.store
            .update_row(segment, index, &row)
            .map_err(store_err)?;

        Ok(CheckOut {
            record,
            index,
            elapsed_minutes: minutes,
            wrapped_midnight,
        })
    }

    /// Every well-formed record of `segment`, in order.
    pub fn records(&self, segment: &str) -> AppResult<Vec<AttendanceRecord>> {
        let lock = self.segment_lock(segment);
        let _guard = Self::hold(&lock);

        Ok(self
            .read_rows(segment)?
            .iter()
            .enumerate()
            .filter_map(|(i, row)| AttendanceRecord::from_row(i + 1, row).ok())
            .collect())
    }

    /// Records still waiting for a check-out.
    pub fn open_sessions(&self, segment: &str) -> AppResult<Vec<AttendanceRecord>> {
        Ok(self
            .records(segment)?
            .into_iter()
            .filter(AttendanceRecord::is_open)
            .collect())
    }
}
