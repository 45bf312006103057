#![forbid(unsafe_code)]

use super::*;
use rusqlite::types::Value;
use sl_core::keywords::{enum_label, field_column};

const MAX_RESOLVE_DEPTH: usize = 16;

impl SqliteStore {
    /// Rows of `table` whose name matches the SQL `LIKE` pattern, with enum ordinals
    /// turned into labels and references into the referenced row's name.
    pub fn keyword_query_like(
        &self,
        table: DefId,
        pattern: &str,
    ) -> Result<Vec<KeywordRecord>, StoreError> {
        Resolver::new(&self.conn, false).query_like(table, pattern)
    }

    /// Like `keyword_query_like`, but references expand into the full referenced record,
    /// following chains until a row repeats on the current path.
    pub fn keyword_query_like_recursive(
        &self,
        table: DefId,
        pattern: &str,
    ) -> Result<Vec<KeywordRecord>, StoreError> {
        Resolver::new(&self.conn, true).query_like(table, pattern)
    }
}

struct RawRow {
    id: i64,
    name: String,
    values: Vec<Value>,
}

fn select_rows(
    conn: &Connection,
    relation: &RelationName,
    field_count: usize,
    filter: &str,
    param: Value,
) -> Result<Vec<RawRow>, StoreError> {
    let mut columns = vec!["id".to_string(), "name".to_string()];
    columns.extend((0..field_count).map(field_column));
    let sql = format!(
        "SELECT {} FROM {} WHERE {filter} ORDER BY id ASC",
        columns.join(", "),
        relation.quoted()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![param], |row| {
        let mut values = Vec::with_capacity(field_count);
        for position in 0..field_count {
            values.push(row.get::<_, Value>(position + 2)?);
        }
        Ok(RawRow {
            id: row.get(0)?,
            name: row.get(1)?,
            values,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

struct Resolver<'c> {
    conn: &'c Connection,
    recursive: bool,
}

impl<'c> Resolver<'c> {
    fn new(conn: &'c Connection, recursive: bool) -> Self {
        Self { conn, recursive }
    }

    fn query_like(&self, table: DefId, pattern: &str) -> Result<Vec<KeywordRecord>, StoreError> {
        let def = load_table_def(self.conn, table)?;
        let fields = load_table_fields(self.conn, table)?;
        let rows = select_rows(
            self.conn,
            &def.relation,
            fields.len(),
            "name LIKE ?1",
            Value::Text(pattern.to_string()),
        )?;

        let mut path = Vec::new();
        rows.into_iter()
            .map(|raw| {
                path.push((def.relation.clone(), raw.id));
                let record = self.record(&fields, raw, &mut path);
                path.pop();
                record
            })
            .collect()
    }

    fn record(
        &self,
        fields: &[KeywordFieldDef],
        raw: RawRow,
        path: &mut Vec<(RelationName, i64)>,
    ) -> Result<KeywordRecord, StoreError> {
        let mut values = Vec::with_capacity(fields.len());
        for (field, value) in fields.iter().zip(raw.values) {
            values.push(self.resolve(field, value, path)?);
        }
        Ok(KeywordRecord {
            id: RowId::new(raw.id),
            name: raw.name,
            values,
        })
    }

    fn resolve(
        &self,
        field: &KeywordFieldDef,
        value: Value,
        path: &mut Vec<(RelationName, i64)>,
    ) -> Result<ResolvedValue, StoreError> {
        let resolved = match (field.value_type, value) {
            (ValueType::TableRef, Value::Null) => ResolvedValue::Dangling,
            (_, Value::Null) => ResolvedValue::Empty,
            (ValueType::Enum, Value::Integer(ordinal)) => match enum_label(&field.supply, ordinal) {
                Some(label) => ResolvedValue::Label(label),
                None => ResolvedValue::Dangling,
            },
            (ValueType::TableRef, Value::Integer(id)) => self.reference(field, id, path)?,
            (ValueType::Enum | ValueType::TableRef, _) => ResolvedValue::Dangling,
            (_, Value::Integer(number)) if field.value_type == ValueType::Number => {
                ResolvedValue::Number(number as f64)
            }
            (_, Value::Real(number)) if field.value_type == ValueType::Number => {
                ResolvedValue::Number(number)
            }
            (_, Value::Integer(number)) => ResolvedValue::Text(number.to_string()),
            (_, Value::Real(number)) => ResolvedValue::Text(number.to_string()),
            (_, Value::Text(text)) => ResolvedValue::Text(text),
            (_, Value::Blob(_)) => ResolvedValue::Dangling,
        };
        Ok(resolved)
    }

    fn reference(
        &self,
        field: &KeywordFieldDef,
        id: i64,
        path: &mut Vec<(RelationName, i64)>,
    ) -> Result<ResolvedValue, StoreError> {
        let Some(target) = table_def_by_relation(self.conn, field.supply.trim())? else {
            tracing::warn!(field = %field.id, supply = %field.supply, "reference field targets an unknown relation");
            return Ok(ResolvedValue::Dangling);
        };
        let target_fields = load_table_fields(self.conn, target.id)?;
        let mut rows = select_rows(
            self.conn,
            &target.relation,
            target_fields.len(),
            "id = ?1",
            Value::Integer(id),
        )?;
        let Some(raw) = rows.pop() else {
            tracing::warn!(relation = %target.relation, id, "reference points at a missing row");
            return Ok(ResolvedValue::Dangling);
        };

        let revisited = path
            .iter()
            .any(|(relation, seen)| *relation == target.relation && *seen == id);
        if !self.recursive || revisited || path.len() >= MAX_RESOLVE_DEPTH {
            return Ok(ResolvedValue::Reference {
                id: RowId::new(raw.id),
                name: raw.name,
            });
        }

        path.push((target.relation.clone(), id));
        let record = self.record(&target_fields, raw, path);
        path.pop();
        Ok(ResolvedValue::Record(Box::new(record?)))
    }
}
