#![forbid(unsafe_code)]

use super::*;
use rusqlite::types::Value;
use sl_core::keywords::{field_column, parse_enum_labels};

impl SqliteStore {
    pub fn keyword_append_empty_item(&mut self, table: DefId, name: &str) -> Result<RowId, StoreError> {
        let def = load_table_def(&self.conn, table)?;
        self.conn.execute(
            &format!("INSERT INTO {}(name) VALUES (?1)", def.relation.quoted()),
            params![name],
        )?;
        let row = RowId::new(self.conn.last_insert_rowid());
        tracing::debug!(%table, %row, "keyword item appended");
        Ok(row)
    }

    pub fn keyword_remove_item(&mut self, table: DefId, row: RowId) -> Result<(), StoreError> {
        let def = load_table_def(&self.conn, table)?;
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id=?1", def.relation.quoted()),
            params![row.get()],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("keyword row", row.get()));
        }
        tracing::debug!(%table, %row, "keyword item removed");
        Ok(())
    }

    pub fn keyword_item_rename(&mut self, table: DefId, row: RowId, name: &str) -> Result<(), StoreError> {
        let def = load_table_def(&self.conn, table)?;
        let changed = self.conn.execute(
            &format!("UPDATE {} SET name=?1 WHERE id=?2", def.relation.quoted()),
            params![name, row.get()],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("keyword row", row.get()));
        }
        Ok(())
    }

    pub fn keyword_item_set_value(
        &mut self,
        table: DefId,
        row: RowId,
        position: usize,
        value: KeywordValue,
    ) -> Result<(), StoreError> {
        let def = load_table_def(&self.conn, table)?;
        let fields = load_table_fields(&self.conn, table)?;
        let field = field_at(&fields, position)?;

        if let Some(actual) = value.value_type()
            && actual != field.value_type
        {
            return Err(StoreError::WrongValueType {
                expected: field.value_type,
                actual,
            });
        }

        let stored = match value {
            KeywordValue::Null => Value::Null,
            KeywordValue::Number(number) => Value::Real(number),
            KeywordValue::Text(text) => Value::Text(text),
            KeywordValue::Ordinal(ordinal) => {
                let labels = parse_enum_labels(&field.supply);
                if usize::try_from(ordinal).map_or(true, |index| index >= labels.len()) {
                    return Err(StoreError::InvalidInput("enum ordinal outside the label list"));
                }
                Value::Integer(ordinal)
            }
            KeywordValue::Row(target_row) => {
                let target = reference_target(&field.supply)?;
                let exists = self
                    .conn
                    .query_row(
                        &format!("SELECT 1 FROM {} WHERE id=?1", target.quoted()),
                        params![target_row.get()],
                        |_| Ok(()),
                    )
                    .optional()?
                    .is_some();
                if !exists {
                    return Err(StoreError::not_found("keyword row", target_row.get()));
                }
                Value::Integer(target_row.get())
            }
        };

        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET {}=?1 WHERE id=?2",
                def.relation.quoted(),
                field_column(position)
            ),
            params![stored, row.get()],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("keyword row", row.get()));
        }
        Ok(())
    }
}
