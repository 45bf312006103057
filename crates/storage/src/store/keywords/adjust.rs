#![forbid(unsafe_code)]

use super::*;
use sl_core::keywords::{join_enum_labels, parse_enum_labels};
use std::collections::BTreeSet;

impl SqliteStore {
    /// Replaces the field list of `table`, rebuilding its relation.
    ///
    /// Each spec either sources an old field position (its column data is copied over)
    /// or starts empty. The rebuild runs in one transaction with foreign keys suspended:
    /// stash rows, rewrite field definitions, drop and recreate the relation, refill it,
    /// drop the stash, then check foreign keys before committing. Row ids are carried
    /// over, so references held by other tables stay valid; reference values of this
    /// table that no longer resolve are nulled, and values that no longer fit their
    /// field's type are dropped.
    ///
    /// Returns the number of rows carried across.
    pub fn keyword_tablefields_adjust(
        &mut self,
        table: DefId,
        fields: Vec<FieldSpec>,
    ) -> Result<usize, StoreError> {
        let def = load_table_def(&self.conn, table)?;
        let old_count = load_table_fields(&self.conn, table)?.len();
        let fields = validate_field_specs(&self.conn, &def, old_count, fields)?;

        let copied = self.with_foreign_keys_suspended(|conn| {
            let tx = conn.transaction()?;
            let migrator = RelationMigrator::new(&tx);
            let holding = migrator.stash(&def.relation)?;

            tx.execute(
                "DELETE FROM table_defs WHERE parent=?1 AND kind='field'",
                params![table.get()],
            )?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO table_defs(kind, parent, order_index, name, value_type, supply) VALUES ('field', ?1, ?2, ?3, ?4, ?5)",
                )?;
                for (position, spec) in fields.iter().enumerate() {
                    stmt.execute(params![
                        table.get(),
                        to_sqlite_i64(position)?,
                        spec.name,
                        spec.value_type.as_str(),
                        spec.supply
                    ])?;
                }
            }

            let plans = fields
                .iter()
                .map(|spec| ColumnPlan {
                    value_type: spec.value_type,
                    supply: &spec.supply,
                })
                .collect::<Vec<_>>();
            let sources = fields.iter().map(|spec| spec.source).collect::<Vec<_>>();

            migrator.drop_relation(&def.relation)?;
            migrator.create_relation(&def.relation, &plans)?;
            let copied = migrator.repopulate(&def.relation, &holding, &plans, &sources)?;
            migrator.clear_dangling_refs(&def.relation, &plans)?;
            migrator.drop_relation(&holding)?;

            let broken = migrator.foreign_key_violations()?;
            if broken > 0 {
                return Err(StoreError::IntegrityViolation {
                    relation: def.relation.to_string(),
                    rows: broken,
                });
            }

            tx.commit()?;
            Ok(copied)
        })?;

        tracing::info!(
            %table,
            relation = %def.relation,
            fields = fields.len(),
            rows = copied,
            "keyword table fields adjusted"
        );
        Ok(copied)
    }
}

fn validate_field_specs(
    conn: &Connection,
    def: &KeywordTableDef,
    old_count: usize,
    fields: Vec<FieldSpec>,
) -> Result<Vec<FieldSpec>, StoreError> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(fields.len());
    for spec in fields {
        let name = normalize_name(&spec.name, "keyword field name must not be empty")?;
        if !seen.insert(name.clone()) {
            return Err(StoreError::DuplicateDefinition(name));
        }
        if let Some(source) = spec.source
            && source >= old_count
        {
            return Err(StoreError::IndexOutOfRange {
                index: source,
                count: old_count,
            });
        }

        let supply = match spec.value_type {
            ValueType::Enum => join_enum_labels(&parse_enum_labels(&spec.supply)),
            ValueType::TableRef => {
                let target = reference_target(&spec.supply)?;
                if target != def.relation && table_def_by_relation(conn, target.as_str())?.is_none() {
                    return Err(StoreError::InvalidInput(
                        "table_ref supply must name an existing keyword relation",
                    ));
                }
                target.as_str().to_string()
            }
            ValueType::Number | ValueType::String => String::new(),
        };

        out.push(FieldSpec {
            name,
            value_type: spec.value_type,
            supply,
            source: spec.source,
        });
    }
    Ok(out)
}
