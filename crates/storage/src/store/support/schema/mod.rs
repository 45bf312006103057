#![forbid(unsafe_code)]

mod sql;

use super::super::StoreError;
use rusqlite::{Connection, params};

const SCHEMA_VERSION: &str = "v1";

pub(in crate::store) fn migrate_sqlite_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(&sql::full_schema_sql())?;

    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;

    ensure_sentinels(conn)?;
    Ok(())
}

fn ensure_sentinels(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        r#"
        INSERT INTO tree_nodes(type, parent, order_index, title, description)
        SELECT 'novel', NULL, 0, '', ''
        WHERE NOT EXISTS (SELECT 1 FROM tree_nodes WHERE parent IS NULL AND type='novel')
        "#,
        [],
    )?;
    conn.execute(
        r#"
        INSERT INTO table_defs(kind, parent, order_index, name, value_type, supply)
        SELECT 'root', NULL, 0, '', NULL, ''
        WHERE NOT EXISTS (SELECT 1 FROM table_defs WHERE parent IS NULL AND kind='root')
        "#,
        [],
    )?;
    Ok(())
}
