//! Schema migrations, tracked with `PRAGMA user_version`.

use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Ordered list of (version, description, SQL). Never edit a shipped entry;
/// append a new one instead.
const MIGRATIONS: &[(i64, &str, &str)] = &[
    (
        1,
        "create segments, segment_rows and log tables",
        r#"
        CREATE TABLE IF NOT EXISTS segments (
            name        TEXT PRIMARY KEY,
            header      TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS segment_rows (
            segment     TEXT NOT NULL REFERENCES segments(name),
            position    INTEGER NOT NULL,
            fields      TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            PRIMARY KEY (segment, position)
        );

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    ),
    (
        2,
        "index segments by creation date",
        r#"
        CREATE INDEX IF NOT EXISTS idx_segments_created_at ON segments(created_at);
        "#,
    ),
];

pub fn current_version(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Apply every migration newer than the database's `user_version`.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &mut Connection) -> AppResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for (version, description, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql).map_err(|e| {
            AppError::Migration(format!("{version} ({description}) failed: {e}"))
        })?;
        tx.pragma_update(None, "user_version", version)?;
        ttlog(
            &tx,
            "migration_applied",
            &format!("v{version}"),
            description,
        )?;
        tx.commit()?;
        applied += 1;
    }

    Ok(applied)
}
