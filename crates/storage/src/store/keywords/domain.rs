#![forbid(unsafe_code)]

use super::*;
use sl_core::keywords::parse_enum_labels;

impl SqliteStore {
    /// Selectable labels of an `Enum` field, in ordinal order.
    pub fn keyword_available_enum_values(&self, field: DefId) -> Result<Vec<String>, StoreError> {
        let field = load_field_def(&self.conn, field)?;
        if field.value_type != ValueType::Enum {
            return Err(StoreError::WrongValueType {
                expected: ValueType::Enum,
                actual: field.value_type,
            });
        }
        Ok(parse_enum_labels(&field.supply))
    }

    /// Rows a `TableRef` field may point at.
    pub fn keyword_available_reference_candidates(
        &self,
        field: DefId,
    ) -> Result<Vec<ReferenceCandidate>, StoreError> {
        let field = load_field_def(&self.conn, field)?;
        if field.value_type != ValueType::TableRef {
            return Err(StoreError::WrongValueType {
                expected: ValueType::TableRef,
                actual: field.value_type,
            });
        }
        let target = reference_target(&field.supply)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, name FROM {} ORDER BY id ASC",
            target.quoted()
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(ReferenceCandidate {
                id: RowId::new(row.get(0)?),
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
