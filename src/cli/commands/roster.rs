use crate::cli::context::Context;
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub fn handle(ctx: &Context) -> AppResult<()> {
    let people = ctx.roster()?;
    if people.is_empty() {
        warning(format!(
            "No people found. Add one name per line to {}.",
            ctx.cfg.roster_path().display()
        ));
        return Ok(());
    }

    for p in &people {
        println!("{p}");
    }
    Ok(())
}
