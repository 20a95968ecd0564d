use crate::errors::{AppError, AppResult};
use crate::store::now_stamp;
use rusqlite::{Connection, OptionalExtension, params};

fn encode_fields(row: &[String]) -> AppResult<String> {
    Ok(serde_json::to_string(row)?)
}

fn decode_fields(raw: &str) -> AppResult<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}

pub fn segment_exists(conn: &Connection, segment: &str) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM segments WHERE name = ?1",
            [segment],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Insert the segment unless it is already there.
pub fn create_segment(conn: &Connection, segment: &str, header: &[String]) -> AppResult<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO segments (name, header, created_at) VALUES (?1, ?2, ?3)",
        params![segment, encode_fields(header)?, now_stamp()],
    )?;
    Ok(inserted > 0)
}

pub fn load_header(conn: &Connection, segment: &str) -> AppResult<Option<Vec<String>>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT header FROM segments WHERE name = ?1",
            [segment],
            |row| row.get(0),
        )
        .optional()?;
    raw.as_deref().map(decode_fields).transpose()
}

pub fn list_segments(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached("SELECT name FROM segments ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Rows of a segment ordered by position. Rows are never deleted, so
/// positions run 1..=n and match the 1-based index used by updates.
pub fn load_rows(conn: &Connection, segment: &str) -> AppResult<Vec<Vec<String>>> {
    let mut stmt = conn.prepare_cached(
        "SELECT fields FROM segment_rows
         WHERE segment = ?1
         ORDER BY position ASC",
    )?;
    let raw = stmt.query_map([segment], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in raw {
        out.push(decode_fields(&r?)?);
    }
    Ok(out)
}

/// Append at the next free position in one statement.
pub fn insert_row(conn: &Connection, segment: &str, row: &[String]) -> AppResult<()> {
    if !segment_exists(conn, segment)? {
        return Err(AppError::SegmentNotFound(segment.to_string()));
    }

    conn.execute(
        "INSERT INTO segment_rows (segment, position, fields, updated_at)
         SELECT ?1, IFNULL(MAX(position), 0) + 1, ?2, ?3
         FROM segment_rows WHERE segment = ?1",
        params![segment, encode_fields(row)?, now_stamp()],
    )?;
    Ok(())
}

pub fn update_row(conn: &Connection, segment: &str, index: usize, row: &[String]) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE segment_rows SET fields = ?1, updated_at = ?2
         WHERE segment = ?3 AND position = ?4",
        params![encode_fields(row)?, now_stamp(), segment, index as i64],
    )?;

    if changed == 0 {
        return Err(AppError::RowNotFound {
            segment: segment.to_string(),
            index,
        });
    }
    Ok(())
}
