use crate::errors::{AppError, AppResult};
use crate::models::{Granularity, TimePrecision};
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_offset;
use chrono::{FixedOffset, Weekday};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where ledger segments are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One SQLite database, one logical sheet per segment
    Sqlite,
    /// One CSV file per segment inside `data_dir`
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_granularity")]
    pub granularity: Granularity,
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    #[serde(default = "default_precision")]
    pub time_precision: TimePrecision,
    #[serde(default = "default_roster_file")]
    pub roster_file: String,
    #[serde(default)]
    pub roster_segment: Option<String>,
    #[serde(default = "default_store_retries")]
    pub store_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_backend() -> BackendKind {
    BackendKind::Sqlite
}
fn default_database() -> String {
    Config::config_dir()
        .join("attendlog.sqlite")
        .to_string_lossy()
        .to_string()
}
fn default_data_dir() -> String {
    Config::config_dir()
        .join("ledger")
        .to_string_lossy()
        .to_string()
}
fn default_granularity() -> Granularity {
    Granularity::Daily
}
fn default_week_start() -> Weekday {
    Weekday::Mon
}
fn default_utc_offset() -> String {
    "+00:00".to_string()
}
fn default_precision() -> TimePrecision {
    TimePrecision::Minutes
}
fn default_roster_file() -> String {
    Config::config_dir()
        .join("roster.txt")
        .to_string_lossy()
        .to_string()
}
fn default_store_retries() -> u32 {
    3
}
fn default_retry_backoff_ms() -> u64 {
    200
}
fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database: default_database(),
            data_dir: default_data_dir(),
            granularity: default_granularity(),
            week_start: default_week_start(),
            utc_offset: default_utc_offset(),
            time_precision: default_precision(),
            roster_file: default_roster_file(),
            roster_segment: None,
            store_retries: default_store_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("attendlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".attendlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("attendlog.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would only fail later, in the middle of a submission.
    pub fn validate(&self) -> AppResult<()> {
        parse_offset(&self.utc_offset)?;
        if let Some(seg) = &self.roster_segment {
            crate::store::validate_segment(seg)
                .map_err(|_| AppError::Config(format!("invalid roster_segment '{seg}'")))?;
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn data_dir_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    pub fn roster_path(&self) -> PathBuf {
        expand_tilde(&self.roster_file)
    }

    /// Location printed to the user for the active backend.
    pub fn store_location(&self) -> PathBuf {
        match self.backend {
            BackendKind::Sqlite => self.database_path(),
            BackendKind::Csv => self.data_dir_path(),
        }
    }

    pub fn offset(&self) -> AppResult<FixedOffset> {
        parse_offset(&self.utc_offset)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
