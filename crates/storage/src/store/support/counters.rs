#![forbid(unsafe_code)]

use super::super::StoreError;
use rusqlite::{Connection, OptionalExtension, params};

pub(in crate::store) fn next_counter_tx(conn: &Connection, name: &str) -> Result<i64, StoreError> {
    let current: i64 = conn
        .query_row(
            "SELECT value FROM counters WHERE name=?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);
    let next = current + 1;
    conn.execute(
        r#"
        INSERT INTO counters(name, value) VALUES (?1, ?2)
        ON CONFLICT(name) DO UPDATE SET value=excluded.value
        "#,
        params![name, next],
    )?;
    Ok(next)
}
