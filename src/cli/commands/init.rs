use crate::cli::context::Context;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::ActivityLog;
use crate::ui::messages::{info, success, warning};
use std::fs;

/// Handle the `init` command
///
/// This prepares:
///  - the configuration file (skipped in test mode)
///  - the store (SQLite schema or CSV directory)
///  - an empty roster file, if none exists
///  - the active segment with its header row
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    info("Initializing attendlog…");

    if !cli.test {
        let path = Config::config_file();
        cfg.save(&path)?;
        success(format!("Config file : {}", path.display()));
    }

    let roster = cfg.roster_path();
    if !roster.exists() {
        if let Some(parent) = roster.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::File::create(&roster)?;
        info(format!(
            "Created empty roster {}; add one name per line.",
            roster.display()
        ));
    }

    let ctx = Context::open(cli, cfg)?;
    let segment = ctx.namer.ensure_active(&*ctx.backend)?;

    success(format!(
        "Store ({:?}) : {}",
        cfg.backend,
        cfg.store_location().display()
    ));
    success(format!(
        "Active segment: {segment} ({})",
        cfg.granularity.as_str()
    ));

    if let Err(e) = ctx.backend.record(
        "init",
        &cfg.store_location().to_string_lossy(),
        "Store initialized",
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success("attendlog initialization completed!");
    Ok(())
}
