#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    pub fn tree_insert_child_before(
        &mut self,
        request: InsertChildRequest,
    ) -> Result<NodeId, StoreError> {
        let InsertChildRequest {
            parent,
            kind,
            index,
            title,
            description,
        } = request;

        let tx = self.conn.transaction()?;
        let parent_row = load_tree_node(&tx, parent)?;
        let set = children_of(&parent_row, kind)?;

        let count = sibling_count(&tx, set)?;
        let index = index.min(count);
        shift_siblings(&tx, set, index, 1)?;

        tx.execute(
            "INSERT INTO tree_nodes(type, parent, order_index, title, description) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                kind.as_str(),
                parent.get(),
                to_sqlite_i64(index)?,
                title,
                description
            ],
        )?;
        let node = NodeId::new(tx.last_insert_rowid());

        tx.commit()?;
        tracing::debug!(%node, %parent, %kind, index, "tree node inserted");
        Ok(node)
    }
}
