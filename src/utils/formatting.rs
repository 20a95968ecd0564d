//! Formatting helpers shared by the ledger and the CLI output.

/// `"<H>h <M>m"`, the duration column of a closed record.
pub fn format_duration(minutes: i64) -> String {
    let m = minutes.max(0);
    format!("{}h {}m", m / 60, m % 60)
}
