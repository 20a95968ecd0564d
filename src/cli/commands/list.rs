use crate::cli::context::Context;
use crate::errors::AppResult;
use crate::models::HEADER;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;

pub fn handle(ctx: &Context, segment: &Option<String>) -> AppResult<()> {
    let segment = ctx.segment_or_active(segment);
    let records = ctx.ledger.records(&segment)?;

    if records.is_empty() {
        info(format!("No records in {segment}."));
        return Ok(());
    }

    header(&segment);
    let mut table = Table::new(HEADER);
    for r in &records {
        table.add_row(r.to_row());
    }
    print!("{}", table.render());

    let open = records.iter().filter(|r| r.is_open()).count();
    println!("\n{} record(s), {} still open.", records.len(), open);
    Ok(())
}
