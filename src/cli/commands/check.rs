use crate::cli::context::Context;
use crate::core::{Outcome, Submission, SubmitLogic};
use crate::errors::AppResult;
use crate::models::Action;
use crate::ui::messages::{success, warning};

/// Handle `in` and `out`.
pub fn handle(ctx: &Context, action: Action, name: &str, at: &Option<String>) -> AppResult<()> {
    let people = ctx.roster()?;
    if people.is_empty() {
        warning("The roster is empty: any name will be accepted.");
    }

    let sub = Submission {
        person: name.to_string(),
        action,
        at: ctx.at(at)?,
    };

    let (segment, outcome) = SubmitLogic::apply(&ctx.ledger, &ctx.namer, &people, &sub)?;

    match outcome {
        Outcome::CheckedIn(record) => {
            success(format!(
                "{} checked in at {} ({}).",
                record.person, record.check_in, segment
            ));
        }
        Outcome::CheckedOut(out) => {
            if out.wrapped_midnight {
                warning(format!(
                    "Check-out {} is earlier than check-in {}: counted as crossing midnight.",
                    out.record.check_out, out.record.check_in
                ));
            }
            success(format!(
                "{} checked out at {}. Time spent: {} ({}).",
                out.record.person, out.record.check_out, out.record.duration, segment
            ));
        }
    }

    Ok(())
}
