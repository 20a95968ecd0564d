//! Segment naming by calendar period.
//!
//! - daily   → `YYYY-MM-DD`
//! - weekly  → `Week-YYYY-MM-DD`, the first day of the 7-day window that opens
//!   on the configured weekday
//! - monthly → `YYYY-MM`
//!
//! "Now" always comes from a [`Clock`] in the configured fixed offset.

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{AttendanceRecord, Granularity};
use crate::store::RowStore;
use crate::utils::date::week_start_of;
use crate::utils::time::Clock;
use chrono::{NaiveDateTime, Weekday};

/// Create `name` with the ledger header unless it already exists.
/// Returns true when the segment was created by this call.
pub fn ensure_segment<S: RowStore + ?Sized>(store: &S, name: &str) -> AppResult<bool> {
    if store.segment_exists(name)? {
        return Ok(false);
    }
    store.create_segment(name, &AttendanceRecord::header_row())?;
    Ok(true)
}

#[derive(Debug, Clone)]
pub struct PeriodNamer {
    clock: Clock,
    granularity: Granularity,
    week_start: Weekday,
}

impl PeriodNamer {
    pub fn new(clock: Clock, granularity: Granularity, week_start: Weekday) -> Self {
        Self {
            clock,
            granularity,
            week_start,
        }
    }

    pub fn from_config(cfg: &Config, clock: Clock) -> Self {
        Self::new(clock, cfg.granularity, cfg.week_start)
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Segment name for `now` under `granularity`.
    pub fn active_segment_name(&self, now: NaiveDateTime, granularity: Granularity) -> String {
        let date = now.date();
        match granularity {
            Granularity::Daily => date.format("%Y-%m-%d").to_string(),
            Granularity::Weekly => format!(
                "Week-{}",
                week_start_of(date, self.week_start).format("%Y-%m-%d")
            ),
            Granularity::Monthly => date.format("%Y-%m").to_string(),
        }
    }

    /// Segment that covers the clock's current time.
    pub fn active_segment(&self) -> String {
        self.active_segment_name(self.clock.now(), self.granularity)
    }

    /// Idempotent; cheap once the segment exists.
    pub fn ensure_segment<S: RowStore + ?Sized>(&self, store: &S, name: &str) -> AppResult<bool> {
        ensure_segment(store, name)
    }

    /// Resolve the active segment and make sure it exists.
    pub fn ensure_active<S: RowStore + ?Sized>(&self, store: &S) -> AppResult<String> {
        let name = self.active_segment();
        ensure_segment(store, &name)?;
        Ok(name)
    }
}
