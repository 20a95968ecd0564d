use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How long one ledger segment lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

/// Resolution of every time-of-day written to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimePrecision {
    /// `HH:MM`
    Minutes,
    /// `HH:MM:SS`
    Seconds,
}

impl TimePrecision {
    pub fn format(&self) -> &'static str {
        match self {
            TimePrecision::Minutes => "%H:%M",
            TimePrecision::Seconds => "%H:%M:%S",
        }
    }
}
