use crate::cli::context::Context;
use crate::errors::AppResult;
use crate::models::HEADER;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;

pub fn handle(ctx: &Context, name: &Option<String>, segment: &Option<String>) -> AppResult<()> {
    let segment = ctx.segment_or_active(segment);

    if let Some(person) = name {
        let person = person.trim();
        if ctx.ledger.is_open(&segment, person)? {
            let since = ctx
                .ledger
                .open_sessions(&segment)?
                .into_iter()
                .find(|r| r.person == person)
                .map(|r| r.check_in)
                .unwrap_or_default();
            info(format!("{person} is checked in since {since} ({segment})."));
        } else {
            info(format!("{person} is not checked in ({segment})."));
        }
        return Ok(());
    }

    let open = ctx.ledger.open_sessions(&segment)?;
    if open.is_empty() {
        info(format!("Nobody is checked in ({segment})."));
        return Ok(());
    }

    header(format!("Checked in ({segment})"));
    let mut table = Table::new(HEADER[..3].iter().copied());
    for r in open {
        table.add_row(vec![r.date, r.person, r.check_in]);
    }
    print!("{}", table.render());
    Ok(())
}
