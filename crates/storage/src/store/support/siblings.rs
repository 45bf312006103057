#![forbid(unsafe_code)]

use super::super::{StoreError, to_index, to_sqlite_i64};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use sl_core::ids::{DefId, NodeId};
use sl_core::model::{DefKind, NodeKind};

/// A set of rows whose `order_index` values must stay exactly `0..n-1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::store) enum SiblingSet {
    TreeChildren { parent: NodeId, kind: NodeKind },
    DesplinePoints { despline: NodeId },
    DefChildren { parent: DefId, kind: DefKind },
}

impl SiblingSet {
    fn table(self) -> &'static str {
        match self {
            SiblingSet::TreeChildren { .. } => "tree_nodes",
            SiblingSet::DesplinePoints { .. } => "attach_points",
            SiblingSet::DefChildren { .. } => "table_defs",
        }
    }

    fn predicate(self) -> &'static str {
        match self {
            SiblingSet::TreeChildren { .. } => "parent = ? AND type = ?",
            SiblingSet::DesplinePoints { .. } => "despline_ref = ?",
            SiblingSet::DefChildren { .. } => "parent = ? AND kind = ?",
        }
    }

    fn scope_values(self) -> Vec<Value> {
        match self {
            SiblingSet::TreeChildren { parent, kind } => vec![
                Value::Integer(parent.get()),
                Value::Text(kind.as_str().to_string()),
            ],
            SiblingSet::DesplinePoints { despline } => vec![Value::Integer(despline.get())],
            SiblingSet::DefChildren { parent, kind } => vec![
                Value::Integer(parent.get()),
                Value::Text(kind.as_str().to_string()),
            ],
        }
    }
}

pub(in crate::store) fn sibling_count(conn: &Connection, set: SiblingSet) -> Result<usize, StoreError> {
    let sql = format!(
        "SELECT COUNT(1) FROM {} WHERE {}",
        set.table(),
        set.predicate()
    );
    let count: i64 = conn.query_row(&sql, params_from_iter(set.scope_values()), |row| {
        row.get(0)
    })?;
    to_index(count)
}

pub(in crate::store) fn sibling_at(
    conn: &Connection,
    set: SiblingSet,
    index: usize,
) -> Result<Option<i64>, StoreError> {
    let sql = format!(
        "SELECT id FROM {} WHERE order_index = ? AND {}",
        set.table(),
        set.predicate()
    );
    let mut values = vec![Value::Integer(to_sqlite_i64(index)?)];
    values.extend(set.scope_values());
    Ok(conn
        .query_row(&sql, params_from_iter(values), |row| row.get::<_, i64>(0))
        .optional()?)
}

pub(in crate::store) fn sibling_ids(conn: &Connection, set: SiblingSet) -> Result<Vec<i64>, StoreError> {
    let sql = format!(
        "SELECT id FROM {} WHERE {} ORDER BY order_index ASC, id ASC",
        set.table(),
        set.predicate()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(set.scope_values()), |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Adds `delta` to the order index of every sibling at or after `from`.
pub(in crate::store) fn shift_siblings(
    conn: &Connection,
    set: SiblingSet,
    from: usize,
    delta: i64,
) -> Result<usize, StoreError> {
    let sql = format!(
        "UPDATE {} SET order_index = order_index + ? WHERE order_index >= ? AND {}",
        set.table(),
        set.predicate()
    );
    let mut values = vec![Value::Integer(delta), Value::Integer(to_sqlite_i64(from)?)];
    values.extend(set.scope_values());
    Ok(conn.execute(&sql, params_from_iter(values))?)
}

/// Exchanges the order index of the siblings at `a` and `b` in one statement.
///
/// Returns `false` without touching anything when either position is empty.
pub(in crate::store) fn swap_siblings(
    conn: &Connection,
    set: SiblingSet,
    a: usize,
    b: usize,
) -> Result<bool, StoreError> {
    let (Some(id_a), Some(id_b)) = (sibling_at(conn, set, a)?, sibling_at(conn, set, b)?) else {
        return Ok(false);
    };
    let sql = format!(
        "UPDATE {} SET order_index = CASE id WHEN ?1 THEN ?2 WHEN ?3 THEN ?4 END WHERE id IN (?1, ?3)",
        set.table()
    );
    let changed = conn.execute(
        &sql,
        params![id_a, to_sqlite_i64(b)?, id_b, to_sqlite_i64(a)?],
    )?;
    Ok(changed == 2)
}

/// Rewrites the order index of the whole set to `0..n-1`, keeping relative order.
pub(in crate::store) fn renumber_siblings(conn: &Connection, set: SiblingSet) -> Result<(), StoreError> {
    let sql = format!("UPDATE {} SET order_index = ?1 WHERE id = ?2", set.table());
    let mut stmt = conn.prepare(&sql)?;
    for (index, id) in sibling_ids(conn, set)?.into_iter().enumerate() {
        stmt.execute(params![to_sqlite_i64(index)?, id])?;
    }
    Ok(())
}
