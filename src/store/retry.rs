//! Bounded retries around a store.

use super::{ActivityLog, LogEntry, RowStore};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries, the first one included. Zero behaves like one.
    pub attempts: u32,
    /// Wait before retry N is `backoff * N`.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            attempts: cfg.store_retries.max(1),
            backoff: Duration::from_millis(cfg.retry_backoff_ms),
        }
    }

    /// Run `op`, retrying while it fails with a transient error. Running out
    /// of attempts yields `StoreUnavailable`; any other error is returned as is.
    pub fn run<T, F>(&self, what: &str, mut op: F) -> AppResult<T>
    where
        F: FnMut() -> AppResult<T>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;

        loop {
            match op() {
                Ok(v) => return Ok(v),
                Err(e) if e.is_transient() && attempt < attempts => {
                    thread::sleep(self.backoff * attempt);
                    attempt += 1;
                }
                Err(e) if e.is_transient() => {
                    return Err(AppError::StoreUnavailable(format!(
                        "{what} failed after {attempts} attempt(s): {e}"
                    )));
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// A store whose every call goes through a [`RetryPolicy`].
pub struct Retrying<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S> Retrying<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: RowStore> RowStore for Retrying<S> {
    fn read_all(&self, segment: &str) -> AppResult<Vec<Vec<String>>> {
        self.policy.run("read_all", || self.inner.read_all(segment))
    }

    fn append_row(&self, segment: &str, row: &[String]) -> AppResult<()> {
        self.policy
            .run("append_row", || self.inner.append_row(segment, row))
    }

    fn update_row(&self, segment: &str, index: usize, row: &[String]) -> AppResult<()> {
        self.policy
            .run("update_row", || self.inner.update_row(segment, index, row))
    }

    fn segment_exists(&self, segment: &str) -> AppResult<bool> {
        self.policy
            .run("segment_exists", || self.inner.segment_exists(segment))
    }

    fn create_segment(&self, segment: &str, header: &[String]) -> AppResult<()> {
        self.policy
            .run("create_segment", || self.inner.create_segment(segment, header))
    }

    fn segments(&self) -> AppResult<Vec<String>> {
        self.policy.run("segments", || self.inner.segments())
    }
}

impl<S: ActivityLog> ActivityLog for Retrying<S> {
    fn record(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.policy
            .run("log", || self.inner.record(operation, target, message))
    }

    fn entries(&self) -> AppResult<Vec<LogEntry>> {
        self.policy.run("log", || self.inner.entries())
    }
}
