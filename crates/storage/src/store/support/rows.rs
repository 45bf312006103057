#![forbid(unsafe_code)]

use super::super::{
    AttachPointRow, KeywordFieldDef, KeywordTableDef, StoreError, TreeNodeRow,
};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use sl_core::ids::{DefId, NodeId, PointId};
use sl_core::keywords::{RelationName, ValueType};
use sl_core::model::{DefKind, NodeKind};

pub(in crate::store) const TREE_NODE_COLUMNS: &str =
    "id, type, parent, order_index, title, description";
pub(in crate::store) const ATTACH_POINT_COLUMNS: &str =
    "id, despline_ref, chapter_ref, storyblock_ref, order_index, title, description";
const DEF_COLUMNS: &str = "id, kind, parent, order_index, name, value_type, supply";

fn conversion_error(index: usize, ty: Type, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, ty, message.into())
}

fn order_index_at(row: &Row<'_>, index: usize) -> rusqlite::Result<usize> {
    let raw: i64 = row.get(index)?;
    usize::try_from(raw)
        .map_err(|_| conversion_error(index, Type::Integer, format!("negative order index {raw}")))
}

fn node_kind_at(row: &Row<'_>, index: usize) -> rusqlite::Result<NodeKind> {
    let raw: String = row.get(index)?;
    NodeKind::parse(&raw).ok_or_else(|| conversion_error(index, Type::Text, format!("unknown node type {raw}")))
}

pub(in crate::store) fn tree_node_from_row(row: &Row<'_>) -> rusqlite::Result<TreeNodeRow> {
    Ok(TreeNodeRow {
        id: NodeId::new(row.get(0)?),
        kind: node_kind_at(row, 1)?,
        parent: row.get::<_, Option<i64>>(2)?.map(NodeId::new),
        order_index: order_index_at(row, 3)?,
        title: row.get(4)?,
        description: row.get(5)?,
    })
}

pub(in crate::store) fn attach_point_from_row(row: &Row<'_>) -> rusqlite::Result<AttachPointRow> {
    Ok(AttachPointRow {
        id: PointId::new(row.get(0)?),
        despline: NodeId::new(row.get(1)?),
        chapter: row.get::<_, Option<i64>>(2)?.map(NodeId::new),
        storyblock: row.get::<_, Option<i64>>(3)?.map(NodeId::new),
        order_index: order_index_at(row, 4)?,
        title: row.get(5)?,
        description: row.get(6)?,
    })
}

#[derive(Clone, Debug)]
pub(in crate::store) struct DefRow {
    pub(in crate::store) id: DefId,
    pub(in crate::store) kind: DefKind,
    pub(in crate::store) parent: Option<DefId>,
    pub(in crate::store) order_index: usize,
    pub(in crate::store) name: String,
    pub(in crate::store) value_type: Option<ValueType>,
    pub(in crate::store) supply: String,
}

fn def_from_row(row: &Row<'_>) -> rusqlite::Result<DefRow> {
    let kind_raw: String = row.get(1)?;
    let kind = DefKind::parse(&kind_raw)
        .ok_or_else(|| conversion_error(1, Type::Text, format!("unknown def kind {kind_raw}")))?;
    let value_type = match row.get::<_, Option<String>>(5)? {
        Some(raw) => Some(
            ValueType::parse(&raw)
                .ok_or_else(|| conversion_error(5, Type::Text, format!("unknown value type {raw}")))?,
        ),
        None => None,
    };
    Ok(DefRow {
        id: DefId::new(row.get(0)?),
        kind,
        parent: row.get::<_, Option<i64>>(2)?.map(DefId::new),
        order_index: order_index_at(row, 3)?,
        name: row.get(4)?,
        value_type,
        supply: row.get(6)?,
    })
}

impl DefRow {
    pub(in crate::store) fn into_table(self) -> Result<KeywordTableDef, StoreError> {
        if self.kind != DefKind::Table {
            return Err(StoreError::type_mismatch("table", self.kind.as_str()));
        }
        let relation = RelationName::try_new(self.supply)
            .map_err(|_| StoreError::InvalidInput("stored relation name is malformed"))?;
        Ok(KeywordTableDef {
            id: self.id,
            name: self.name,
            relation,
            order_index: self.order_index,
        })
    }

    pub(in crate::store) fn into_field(self) -> Result<KeywordFieldDef, StoreError> {
        if self.kind != DefKind::Field {
            return Err(StoreError::type_mismatch("field", self.kind.as_str()));
        }
        let (Some(table), Some(value_type)) = (self.parent, self.value_type) else {
            return Err(StoreError::InvalidInput("stored field definition is incomplete"));
        };
        Ok(KeywordFieldDef {
            id: self.id,
            table,
            name: self.name,
            value_type,
            supply: self.supply,
            order_index: self.order_index,
        })
    }
}

pub(in crate::store) fn novel_root(conn: &Connection) -> Result<NodeId, StoreError> {
    let id: i64 = conn.query_row(
        "SELECT id FROM tree_nodes WHERE parent IS NULL AND type='novel' ORDER BY id LIMIT 1",
        [],
        |row| row.get(0),
    )?;
    Ok(NodeId::new(id))
}

pub(in crate::store) fn load_tree_node(conn: &Connection, node: NodeId) -> Result<TreeNodeRow, StoreError> {
    let sql = format!("SELECT {TREE_NODE_COLUMNS} FROM tree_nodes WHERE id=?1");
    conn.query_row(&sql, params![node.get()], tree_node_from_row)
        .optional()?
        .ok_or_else(|| StoreError::not_found("tree node", node.get()))
}

pub(in crate::store) fn expect_node_kind(
    conn: &Connection,
    node: NodeId,
    expected: NodeKind,
) -> Result<TreeNodeRow, StoreError> {
    let row = load_tree_node(conn, node)?;
    if row.kind != expected {
        return Err(StoreError::type_mismatch(expected.as_str(), row.kind));
    }
    Ok(row)
}

pub(in crate::store) fn load_attach_point(
    conn: &Connection,
    point: PointId,
) -> Result<AttachPointRow, StoreError> {
    let sql = format!("SELECT {ATTACH_POINT_COLUMNS} FROM attach_points WHERE id=?1");
    conn.query_row(&sql, params![point.get()], attach_point_from_row)
        .optional()?
        .ok_or_else(|| StoreError::not_found("attach point", point.get()))
}

pub(in crate::store) fn def_root(conn: &Connection) -> Result<DefId, StoreError> {
    let id: i64 = conn.query_row(
        "SELECT id FROM table_defs WHERE parent IS NULL AND kind='root' ORDER BY id LIMIT 1",
        [],
        |row| row.get(0),
    )?;
    Ok(DefId::new(id))
}

pub(in crate::store) fn load_def(conn: &Connection, def: DefId) -> Result<DefRow, StoreError> {
    let sql = format!("SELECT {DEF_COLUMNS} FROM table_defs WHERE id=?1");
    conn.query_row(&sql, params![def.get()], def_from_row)
        .optional()?
        .ok_or_else(|| StoreError::not_found("keyword definition", def.get()))
}

pub(in crate::store) fn load_table_def(
    conn: &Connection,
    table: DefId,
) -> Result<KeywordTableDef, StoreError> {
    load_def(conn, table)?.into_table()
}

pub(in crate::store) fn load_field_def(
    conn: &Connection,
    field: DefId,
) -> Result<KeywordFieldDef, StoreError> {
    load_def(conn, field)?.into_field()
}

pub(in crate::store) fn load_table_defs(conn: &Connection) -> Result<Vec<KeywordTableDef>, StoreError> {
    let root = def_root(conn)?;
    load_child_defs(conn, root, DefKind::Table)?
        .into_iter()
        .map(DefRow::into_table)
        .collect()
}

pub(in crate::store) fn load_table_fields(
    conn: &Connection,
    table: DefId,
) -> Result<Vec<KeywordFieldDef>, StoreError> {
    load_child_defs(conn, table, DefKind::Field)?
        .into_iter()
        .map(DefRow::into_field)
        .collect()
}

fn load_child_defs(conn: &Connection, parent: DefId, kind: DefKind) -> Result<Vec<DefRow>, StoreError> {
    let sql = format!(
        "SELECT {DEF_COLUMNS} FROM table_defs WHERE parent=?1 AND kind=?2 ORDER BY order_index ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![parent.get(), kind.as_str()], def_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub(in crate::store) fn table_def_by_relation(
    conn: &Connection,
    relation: &str,
) -> Result<Option<KeywordTableDef>, StoreError> {
    let sql = format!("SELECT {DEF_COLUMNS} FROM table_defs WHERE kind='table' AND supply=?1");
    conn.query_row(&sql, params![relation], def_from_row)
        .optional()?
        .map(DefRow::into_table)
        .transpose()
}

pub(in crate::store) fn table_def_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<KeywordTableDef>, StoreError> {
    let sql = format!("SELECT {DEF_COLUMNS} FROM table_defs WHERE kind='table' AND name=?1");
    conn.query_row(&sql, params![name], def_from_row)
        .optional()?
        .map(DefRow::into_table)
        .transpose()
}
