use crate::cli::context::Context;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(ctx: &Context, print: bool) -> AppResult<()> {
    if print {
        LogLogic::print_log(&*ctx.backend)?;
    }
    Ok(())
}
