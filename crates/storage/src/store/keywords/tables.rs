#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    pub fn keyword_new_table(&mut self, name: &str) -> Result<DefId, StoreError> {
        let name = normalize_name(name, "keyword table name must not be empty")?;

        let tx = self.conn.transaction()?;
        if table_def_by_name(&tx, &name)?.is_some() {
            return Err(StoreError::DuplicateDefinition(name));
        }

        let relation = allocate_relation_name(&tx)?;
        let root = def_root(&tx)?;
        let index = sibling_count(&tx, tables_of(root))?;
        tx.execute(
            "INSERT INTO table_defs(kind, parent, order_index, name, value_type, supply) VALUES ('table', ?1, ?2, ?3, NULL, ?4)",
            params![root.get(), to_sqlite_i64(index)?, name, relation.as_str()],
        )?;
        let table = DefId::new(tx.last_insert_rowid());

        RelationMigrator::new(&tx).create_relation(&relation, &[])?;

        tx.commit()?;
        tracing::info!(%table, name = %name, relation = %relation, "keyword table defined");
        Ok(table)
    }

    pub fn keyword_table_rename(&mut self, table: DefId, name: &str) -> Result<(), StoreError> {
        let name = normalize_name(name, "keyword table name must not be empty")?;

        let tx = self.conn.transaction()?;
        load_table_def(&tx, table)?;
        if let Some(existing) = table_def_by_name(&tx, &name)? {
            if existing.id == table {
                return Ok(());
            }
            return Err(StoreError::DuplicateDefinition(name));
        }
        tx.execute(
            "UPDATE table_defs SET name=?1 WHERE id=?2",
            params![name, table.get()],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Moves `table` one slot toward the front. `false` when it already leads.
    pub fn keyword_table_forward(&mut self, table: DefId) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let def = load_table_def(&tx, table)?;
        if def.order_index == 0 {
            return Ok(false);
        }
        let root = def_root(&tx)?;
        let moved = swap_siblings(&tx, tables_of(root), def.order_index, def.order_index - 1)?;
        tx.commit()?;
        Ok(moved)
    }

    /// Moves `table` one slot toward the back. `false` when it is already last.
    pub fn keyword_table_backward(&mut self, table: DefId) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let def = load_table_def(&tx, table)?;
        let set = tables_of(def_root(&tx)?);
        if def.order_index + 1 >= sibling_count(&tx, set)? {
            return Ok(false);
        }
        let moved = swap_siblings(&tx, set, def.order_index, def.order_index + 1)?;
        tx.commit()?;
        Ok(moved)
    }

    pub fn keyword_remove_table(&mut self, table: DefId) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let def = load_table_def(&tx, table)?;

        let referencing: i64 = tx.query_row(
            "SELECT COUNT(1) FROM table_defs WHERE kind='field' AND value_type=?1 AND supply=?2 AND parent<>?3",
            params![ValueType::TableRef.as_str(), def.relation.as_str(), table.get()],
            |row| row.get(0),
        )?;
        if referencing > 0 {
            return Err(StoreError::InvalidInput(
                "keyword table is still referenced by another table's field",
            ));
        }

        RelationMigrator::new(&tx).drop_relation(&def.relation)?;
        shift_siblings(&tx, tables_of(def_root(&tx)?), def.order_index + 1, -1)?;
        tx.execute("DELETE FROM table_defs WHERE id=?1", params![table.get()])?;

        tx.commit()?;
        tracing::info!(%table, name = %def.name, relation = %def.relation, "keyword table removed");
        Ok(())
    }
}

/// Next counter-backed relation name not yet used by any definition or physical table.
fn allocate_relation_name(conn: &Connection) -> Result<RelationName, StoreError> {
    let migrator = RelationMigrator::new(conn);
    loop {
        let candidate = RelationName::generated(next_counter_tx(conn, RELATION_COUNTER)?);
        let claimed = table_def_by_relation(conn, candidate.as_str())?.is_some()
            || migrator.relation_exists(candidate.as_str())?
            || migrator.relation_exists(candidate.holding().as_str())?;
        if !claimed {
            return Ok(candidate);
        }
        tracing::debug!(relation = %candidate, "generated relation name already taken");
    }
}
