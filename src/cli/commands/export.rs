use crate::cli::context::Context;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::store::ActivityLog;
use crate::ui::messages::warning;

pub fn handle(
    ctx: &Context,
    format: ExportFormat,
    file: &str,
    segment: &Option<String>,
    force: bool,
) -> AppResult<()> {
    let segment = ctx.segment_or_active(segment);
    let written = ExportLogic::export(&ctx.ledger, &segment, format, file, force)?;

    if written > 0
        && let Err(e) = ctx.backend.record(
            "export",
            &segment,
            &format!("{written} record(s) exported as {} to {file}", format.as_str()),
        )
    {
        warning(format!("Failed to write internal log: {e}"));
    }
    Ok(())
}
