//! Everything a command needs once the configuration is settled.

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::{AttendanceLedger, LedgerConfig, PeriodNamer};
use crate::errors::AppResult;
use crate::roster::{self, FileRoster, RosterSource, SegmentRoster};
use crate::store::{self, Backend};
use crate::utils::time::{Clock, parse_datetime, parse_time_arg};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct Context {
    pub cfg: Config,
    pub backend: Arc<dyn Backend>,
    pub ledger: AttendanceLedger<dyn Backend>,
    pub namer: PeriodNamer,
}

impl Context {
    pub fn open(cli: &Cli, cfg: &Config) -> AppResult<Self> {
        let offset = cfg.offset()?;
        let clock = match &cli.now {
            Some(s) => Clock::pinned(offset, parse_datetime(s)?),
            None => Clock::new(offset),
        };

        let backend = store::open(cfg)?;
        let ledger = AttendanceLedger::new(backend.clone(), LedgerConfig::from_config(cfg));
        let namer = PeriodNamer::from_config(cfg, clock);

        Ok(Self {
            cfg: cfg.clone(),
            backend,
            ledger,
            namer,
        })
    }

    /// People from the roster file and, when configured, the roster segment.
    pub fn roster(&self) -> AppResult<BTreeSet<String>> {
        let file = FileRoster::new(self.cfg.roster_path());
        match &self.cfg.roster_segment {
            Some(seg) => {
                let sheet = SegmentRoster::new(self.backend.clone(), seg.clone());
                roster::merged(&[&file as &dyn RosterSource, &sheet])
            }
            None => roster::merged(&[&file as &dyn RosterSource]),
        }
    }

    /// Explicit segment, or the one covering the clock's current time.
    pub fn segment_or_active(&self, segment: &Option<String>) -> String {
        segment
            .clone()
            .unwrap_or_else(|| self.namer.active_segment())
    }

    /// Today's date (per the clock) with either the given time or now.
    pub fn at(&self, time: &Option<String>) -> AppResult<NaiveDateTime> {
        let now = self.namer.clock().now();
        match time {
            Some(t) => Ok(now.date().and_time(parse_time_arg(t)?)),
            None => Ok(now),
        }
    }
}
