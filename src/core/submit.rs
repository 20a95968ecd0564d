use crate::core::ledger::{AttendanceLedger, CheckOut};
use crate::core::period::PeriodNamer;
use crate::errors::AppResult;
use crate::models::{Action, AttendanceRecord};
use crate::roster;
use crate::store::{ActivityLog, Backend};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// One `{person, action}` pair collected from the user.
#[derive(Debug, Clone)]
pub struct Submission {
    pub person: String,
    pub action: Action,
    pub at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    CheckedIn(AttendanceRecord),
    CheckedOut(CheckOut),
}

/// High-level flow behind `in` and `out`.
pub struct SubmitLogic;

impl SubmitLogic {
    /// Validate the person, resolve the segment covering `at`, run the
    /// ledger operation and write one activity-log line.
    /// Returns the segment name together with the outcome.
    pub fn apply<B: Backend + ?Sized>(
        ledger: &AttendanceLedger<B>,
        namer: &PeriodNamer,
        people: &BTreeSet<String>,
        sub: &Submission,
    ) -> AppResult<(String, Outcome)> {
        let person = roster::admit(people, &sub.person)?;
        let segment = namer.active_segment_name(sub.at, namer.granularity());

        let outcome = match sub.action {
            Action::CheckIn => Outcome::CheckedIn(ledger.check_in(&segment, &person, sub.at)?),
            Action::CheckOut => Outcome::CheckedOut(ledger.check_out(&segment, &person, sub.at)?),
        };

        let message = match &outcome {
            Outcome::CheckedIn(r) => format!("{} checked in at {}", r.person, r.check_in),
            Outcome::CheckedOut(c) => format!(
                "{} checked out at {} ({})",
                c.record.person, c.record.check_out, c.record.duration
            ),
        };

        // The ledger write already succeeded; a lost log line must not undo it.
        if let Err(e) = ledger
            .store()
            .record(sub.action.as_str(), &segment, &message)
        {
            crate::ui::messages::warning(format!("Failed to write internal log: {e}"));
        }

        Ok((segment, outcome))
    }
}
