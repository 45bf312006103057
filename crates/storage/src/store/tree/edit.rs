#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    pub fn tree_set_title(&mut self, node: NodeId, title: &str) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE tree_nodes SET title=?1 WHERE id=?2",
            params![title, node.get()],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("tree node", node.get()));
        }
        Ok(())
    }

    pub fn tree_set_description(&mut self, node: NodeId, description: &str) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE tree_nodes SET description=?1 WHERE id=?2",
            params![description, node.get()],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("tree node", node.get()));
        }
        Ok(())
    }
}
