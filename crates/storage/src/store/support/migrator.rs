#![forbid(unsafe_code)]

//! All DDL for keyword relations goes through `RelationMigrator`; nothing else in the
//! store formats `CREATE`/`DROP` statements for user-defined tables.

use super::super::StoreError;
use rusqlite::{Connection, OptionalExtension, params};
use sl_core::keywords::{RelationName, ValueType, field_column};

/// Storage class of a field column, by value type.
const COLUMN_AFFINITY: [(ValueType, &str); 4] = [
    (ValueType::Number, "REAL"),
    (ValueType::String, "TEXT"),
    (ValueType::Enum, "INTEGER"),
    (ValueType::TableRef, "INTEGER"),
];

#[derive(Clone, Copy, Debug)]
pub(in crate::store) struct ColumnPlan<'a> {
    pub(in crate::store) value_type: ValueType,
    pub(in crate::store) supply: &'a str,
}

fn column_affinity(value_type: ValueType) -> &'static str {
    COLUMN_AFFINITY
        .iter()
        .find(|(candidate, _)| *candidate == value_type)
        .map(|(_, affinity)| *affinity)
        .unwrap_or("TEXT")
}

pub(in crate::store) fn reference_target(supply: &str) -> Result<RelationName, StoreError> {
    RelationName::try_new(supply.trim())
        .map_err(|_| StoreError::InvalidInput("table_ref supply must name a keyword relation"))
}

fn column_decl(position: usize, plan: ColumnPlan<'_>) -> Result<String, StoreError> {
    let column = field_column(position);
    let affinity = column_affinity(plan.value_type);
    match plan.value_type {
        ValueType::TableRef => {
            let target = reference_target(plan.supply)?;
            Ok(format!(
                "{column} {affinity} REFERENCES {}(id) ON DELETE SET NULL",
                target.quoted()
            ))
        }
        ValueType::Number | ValueType::String | ValueType::Enum => {
            Ok(format!("{column} {affinity}"))
        }
    }
}

/// Select expression reading `column` as a value of `value_type`, null when it does not fit.
fn coerced_select(column: &str, value_type: ValueType) -> String {
    match value_type {
        ValueType::Enum | ValueType::TableRef => format!(
            "CASE WHEN typeof({column})='integer' THEN {column} \
             WHEN typeof({column})='real' AND {column}=CAST({column} AS INTEGER) THEN CAST({column} AS INTEGER) END"
        ),
        ValueType::Number => {
            format!("CASE WHEN typeof({column}) IN ('integer', 'real') THEN {column} END")
        }
        ValueType::String => column.to_string(),
    }
}

pub(in crate::store) struct RelationMigrator<'c> {
    conn: &'c Connection,
}

impl<'c> RelationMigrator<'c> {
    pub(in crate::store) fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub(in crate::store) fn relation_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?
            .is_some())
    }

    pub(in crate::store) fn create_relation(
        &self,
        relation: &RelationName,
        columns: &[ColumnPlan<'_>],
    ) -> Result<(), StoreError> {
        let mut decls = vec![
            "id INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
            "name TEXT NOT NULL DEFAULT ''".to_string(),
        ];
        for (position, plan) in columns.iter().enumerate() {
            decls.push(column_decl(position, *plan)?);
        }
        let sql = format!("CREATE TABLE {} ({})", relation.quoted(), decls.join(", "));
        self.conn.execute_batch(&sql)?;
        tracing::info!(relation = %relation, columns = columns.len(), "keyword relation created");
        Ok(())
    }

    pub(in crate::store) fn drop_relation(&self, relation: &RelationName) -> Result<(), StoreError> {
        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {}", relation.quoted()))?;
        tracing::info!(relation = %relation, "keyword relation dropped");
        Ok(())
    }

    /// Copies the full contents of `relation` into a fresh holding relation.
    pub(in crate::store) fn stash(&self, relation: &RelationName) -> Result<RelationName, StoreError> {
        let holding = relation.holding();
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {hold}; CREATE TABLE {hold} AS SELECT * FROM {rel};",
            hold = holding.quoted(),
            rel = relation.quoted()
        ))?;
        Ok(holding)
    }

    /// Refills `relation` from `holding`; `sources[i]` names the old field position feeding
    /// new column `i`, unmapped columns stay null. Row ids are carried over. Values that do
    /// not fit the new column's type are dropped.
    pub(in crate::store) fn repopulate(
        &self,
        relation: &RelationName,
        holding: &RelationName,
        columns: &[ColumnPlan<'_>],
        sources: &[Option<usize>],
    ) -> Result<usize, StoreError> {
        let mut targets = vec!["id".to_string(), "name".to_string()];
        let mut selects = vec!["id".to_string(), "name".to_string()];
        for (position, (plan, source)) in columns.iter().zip(sources).enumerate() {
            if let Some(old_position) = source {
                targets.push(field_column(position));
                selects.push(coerced_select(&field_column(*old_position), plan.value_type));
            }
        }
        let sql = format!(
            "INSERT INTO {}({}) SELECT {} FROM {} ORDER BY id",
            relation.quoted(),
            targets.join(", "),
            selects.join(", "),
            holding.quoted()
        );
        Ok(self.conn.execute(&sql, [])?)
    }

    /// Rows anywhere in the database whose foreign keys point at nothing.
    pub(in crate::store) fn foreign_key_violations(&self) -> Result<usize, StoreError> {
        let mut stmt = self.conn.prepare("PRAGMA foreign_key_check")?;
        let mut rows = stmt.query([])?;
        let mut count = 0;
        while let Some(row) = rows.next()? {
            let table: String = row.get(0)?;
            let parent: String = row.get(2)?;
            tracing::warn!(table = %table, parent = %parent, "foreign key violation");
            count += 1;
        }
        Ok(count)
    }

    /// Nulls every reference column value that no longer points at a row of its target.
    pub(in crate::store) fn clear_dangling_refs(
        &self,
        relation: &RelationName,
        columns: &[ColumnPlan<'_>],
    ) -> Result<usize, StoreError> {
        let mut cleared = 0;
        for (position, plan) in columns.iter().enumerate() {
            if plan.value_type != ValueType::TableRef {
                continue;
            }
            let target = reference_target(plan.supply)?;
            let column = field_column(position);
            cleared += self.conn.execute(
                &format!(
                    "UPDATE {rel} SET {column} = NULL WHERE {column} IS NOT NULL AND {column} NOT IN (SELECT id FROM {target})",
                    rel = relation.quoted(),
                    target = target.quoted()
                ),
                [],
            )?;
        }
        if cleared > 0 {
            tracing::warn!(relation = %relation, cleared, "dangling references nulled during rebuild");
        }
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_declarations_follow_value_type() {
        let number = ColumnPlan { value_type: ValueType::Number, supply: "" };
        let labels = ColumnPlan { value_type: ValueType::Enum, supply: "warrior;mage" };
        let reference = ColumnPlan { value_type: ValueType::TableRef, supply: "kw_000002" };

        assert_eq!(column_decl(0, number).expect("number"), "field_0 REAL");
        assert_eq!(column_decl(1, labels).expect("enum"), "field_1 INTEGER");
        assert_eq!(
            column_decl(2, reference).expect("table ref"),
            "field_2 INTEGER REFERENCES \"kw_000002\"(id) ON DELETE SET NULL"
        );
    }

    #[test]
    fn reference_columns_need_a_valid_target() {
        let broken = ColumnPlan { value_type: ValueType::TableRef, supply: "Robert'); DROP" };
        assert!(matches!(
            column_decl(0, broken),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn stash_and_repopulate_remap_columns() {
        let conn = Connection::open_in_memory().expect("open");
        let migrator = RelationMigrator::new(&conn);
        let relation = RelationName::generated(1);
        let plans = [
            ColumnPlan { value_type: ValueType::Number, supply: "" },
            ColumnPlan { value_type: ValueType::String, supply: "" },
        ];
        migrator.create_relation(&relation, &plans).expect("create");
        conn.execute(
            "INSERT INTO \"kw_000001\"(id, name, field_0, field_1) VALUES (7, 'Alice', 31, 'Al')",
            [],
        )
        .expect("insert");

        let holding = migrator.stash(&relation).expect("stash");
        migrator.drop_relation(&relation).expect("drop");
        let swapped = [
            ColumnPlan { value_type: ValueType::String, supply: "" },
            ColumnPlan { value_type: ValueType::String, supply: "" },
        ];
        migrator.create_relation(&relation, &swapped).expect("recreate");
        let copied = migrator
            .repopulate(&relation, &holding, &swapped, &[Some(1), None])
            .expect("repopulate");
        assert_eq!(copied, 1);

        let (id, name, first, second): (i64, String, Option<String>, Option<String>) = conn
            .query_row(
                "SELECT id, name, field_0, field_1 FROM \"kw_000001\"",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .expect("row");
        assert_eq!((id, name.as_str()), (7, "Alice"));
        assert_eq!(first.as_deref(), Some("Al"));
        assert_eq!(second, None);
        assert!(migrator.relation_exists("kw_000001__hold").expect("exists"));
    }

    #[test]
    fn repopulate_drops_values_that_do_not_fit_the_new_type() {
        let conn = Connection::open_in_memory().expect("open");
        let migrator = RelationMigrator::new(&conn);
        let relation = RelationName::generated(1);
        let plans = [
            ColumnPlan { value_type: ValueType::String, supply: "" },
            ColumnPlan { value_type: ValueType::Number, supply: "" },
            ColumnPlan { value_type: ValueType::Number, supply: "" },
        ];
        migrator.create_relation(&relation, &plans).expect("create");
        conn.execute(
            "INSERT INTO \"kw_000001\"(id, name, field_0, field_1, field_2) VALUES (1, 'Alice', 'mage', 2.5, 2)",
            [],
        )
        .expect("insert");

        let holding = migrator.stash(&relation).expect("stash");
        migrator.drop_relation(&relation).expect("drop");
        let labels = [
            ColumnPlan { value_type: ValueType::Enum, supply: "a;b;c" },
            ColumnPlan { value_type: ValueType::Enum, supply: "a;b;c" },
            ColumnPlan { value_type: ValueType::Enum, supply: "a;b;c" },
        ];
        migrator.create_relation(&relation, &labels).expect("recreate");
        migrator
            .repopulate(&relation, &holding, &labels, &[Some(0), Some(1), Some(2)])
            .expect("repopulate");

        let (text, fraction, whole): (Option<i64>, Option<i64>, Option<i64>) = conn
            .query_row(
                "SELECT field_0, field_1, field_2 FROM \"kw_000001\"",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .expect("row");
        assert_eq!((text, fraction, whole), (None, None, Some(2)));
    }

    #[test]
    fn foreign_key_check_counts_broken_references() {
        let conn = Connection::open_in_memory().expect("open");
        let migrator = RelationMigrator::new(&conn);
        let target = RelationName::generated(1);
        migrator.create_relation(&target, &[]).expect("target");
        let owner = RelationName::generated(2);
        let plans = [ColumnPlan { value_type: ValueType::TableRef, supply: "kw_000001" }];
        migrator.create_relation(&owner, &plans).expect("owner");
        assert_eq!(migrator.foreign_key_violations().expect("check"), 0);

        conn.execute_batch("PRAGMA foreign_keys = OFF;").expect("disable enforcement");
        conn.execute("INSERT INTO \"kw_000002\"(name, field_0) VALUES ('Alice', 41)", [])
            .expect("insert with enforcement off");
        assert_eq!(migrator.foreign_key_violations().expect("check"), 1);
    }
}
