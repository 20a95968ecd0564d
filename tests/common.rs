#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use attendlog::errors::{AppError, AppResult};
use attendlog::store::RowStore;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

/// The CLI binary, with HOME pointed at `home` so no real config is touched.
pub fn attendlog(home: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("attendlog");
    cmd.env("HOME", home).env("APPDATA", home).env_remove("EDITOR");
    cmd
}

/// Fresh, empty directory inside the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("attendlog_test_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("date");
    let t = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .expect("time");
    d.and_time(t)
}

pub fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

/// Store whose calls all fail; `transient` decides the kind of failure.
pub struct BrokenStore {
    pub transient: bool,
    pub calls: AtomicU32,
}

impl BrokenStore {
    pub fn new(transient: bool) -> Self {
        Self {
            transient,
            calls: AtomicU32::new(0),
        }
    }

    fn fail<T>(&self) -> AppResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let kind = if self.transient {
            io::ErrorKind::TimedOut
        } else {
            io::ErrorKind::PermissionDenied
        };
        Err(AppError::Io(io::Error::new(kind, "store is down")))
    }
}

impl RowStore for BrokenStore {
    fn read_all(&self, _segment: &str) -> AppResult<Vec<Vec<String>>> {
        self.fail()
    }
    fn append_row(&self, _segment: &str, _row: &[String]) -> AppResult<()> {
        self.fail()
    }
    fn update_row(&self, _segment: &str, _index: usize, _row: &[String]) -> AppResult<()> {
        self.fail()
    }
    fn segment_exists(&self, _segment: &str) -> AppResult<bool> {
        self.fail()
    }
    fn create_segment(&self, _segment: &str, _header: &[String]) -> AppResult<()> {
        self.fail()
    }
    fn segments(&self) -> AppResult<Vec<String>> {
        self.fail()
    }
}
