use crate::cli::context::Context;
use crate::errors::AppResult;
use crate::store::RowStore;
use crate::ui::messages::info;

pub fn handle(ctx: &Context, all: bool) -> AppResult<()> {
    if all {
        let segments = ctx.backend.segments()?;
        if segments.is_empty() {
            info("No segments yet.");
        }
        for s in segments {
            println!("{s}");
        }
        return Ok(());
    }

    let name = ctx.namer.ensure_active(&*ctx.backend)?;
    println!("{name}");
    Ok(())
}
