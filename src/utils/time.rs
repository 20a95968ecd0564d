//! Time utilities: the fixed-offset clock, HH:MM[:SS] parsing, elapsed time.

use crate::errors::{AppError, AppResult};
use crate::models::TimePrecision;
use chrono::{FixedOffset, NaiveDateTime, NaiveTime, Timelike, Utc};
use regex::Regex;
use std::sync::LazyLock;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

static OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])(\d{2}):?(\d{2})$").expect("static regex"));

/// Parse a UTC offset such as `+02:00`, `-0600`, `Z` or `UTC`.
pub fn parse_offset(s: &str) -> AppResult<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| AppError::InvalidOffset(s.to_string()));
    }

    let caps = OFFSET
        .captures(s)
        .ok_or_else(|| AppError::InvalidOffset(s.to_string()))?;

    let hours: i32 = caps[2].parse().map_err(|_| AppError::InvalidOffset(s.to_string()))?;
    let minutes: i32 = caps[3].parse().map_err(|_| AppError::InvalidOffset(s.to_string()))?;
    if hours > 23 || minutes > 59 {
        return Err(AppError::InvalidOffset(s.to_string()));
    }

    let secs = (hours * 3600 + minutes * 60) * if &caps[1] == "-" { -1 } else { 1 };
    FixedOffset::east_opt(secs).ok_or_else(|| AppError::InvalidOffset(s.to_string()))
}

/// Wall clock read in one fixed, configured offset, never the host's zone.
#[derive(Debug, Clone)]
pub struct Clock {
    offset: FixedOffset,
    pinned: Option<NaiveDateTime>,
}

impl Clock {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            pinned: None,
        }
    }

    /// A clock that always answers `at`.
    pub fn pinned(offset: FixedOffset, at: NaiveDateTime) -> Self {
        Self {
            offset,
            pinned: Some(at),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        match self.pinned {
            Some(at) => at,
            None => Utc::now().with_timezone(&self.offset).naive_local(),
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Parse a time of day. Both `HH:MM:SS` and `HH:MM` are accepted so that
/// rows written under either precision can still be read.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

pub fn parse_time_arg(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Parse `YYYY-MM-DD HH:MM[:SS]` (a `T` separator is accepted too).
pub fn parse_datetime(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Drop whatever the precision does not keep.
pub fn truncate(t: NaiveTime, precision: TimePrecision) -> NaiveTime {
    let t = t.with_nanosecond(0).unwrap_or(t);
    match precision {
        TimePrecision::Seconds => t,
        TimePrecision::Minutes => t.with_second(0).unwrap_or(t),
    }
}

pub fn format_time(t: NaiveTime, precision: TimePrecision) -> String {
    t.format(precision.format()).to_string()
}

/// Time elapsed between two times of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub minutes: i64,
    /// `end` was earlier than `start`, so a day boundary was assumed.
    pub wrapped_midnight: bool,
}

/// Whole minutes from `start` to `end`, seconds discarded. A negative gap is
/// read as a session crossing midnight and wrapped by 24h.
pub fn elapsed(start: NaiveTime, end: NaiveTime) -> Elapsed {
    let mut secs = (end - start).num_seconds();
    let wrapped_midnight = secs < 0;
    if wrapped_midnight {
        secs += SECONDS_PER_DAY;
    }

    Elapsed {
        minutes: secs / 60,
        wrapped_midnight,
    }
}

/// Minutes from `start` to `end` with both dates taken into account, so a
/// session left open for days in a weekly or monthly segment keeps its full
/// length. A check-out that lands before the check-in falls back to the
/// time-of-day wrap of [`elapsed`].
pub fn elapsed_between(start: NaiveDateTime, end: NaiveDateTime) -> Elapsed {
    let secs = (end - start).num_seconds();
    if secs < 0 {
        return elapsed(start.time(), end.time());
    }

    Elapsed {
        minutes: secs / 60,
        wrapped_midnight: false,
    }
}
