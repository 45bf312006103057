#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    pub fn tree_root(&self) -> Result<NodeId, StoreError> {
        novel_root(&self.conn)
    }

    pub fn tree_node(&self, node: NodeId) -> Result<TreeNodeRow, StoreError> {
        load_tree_node(&self.conn, node)
    }

    pub fn tree_parent_of(&self, node: NodeId) -> Result<Option<NodeId>, StoreError> {
        Ok(load_tree_node(&self.conn, node)?.parent)
    }

    pub fn tree_index_of(&self, node: NodeId) -> Result<usize, StoreError> {
        let row = load_tree_node(&self.conn, node)?;
        let Some(set) = siblings_of(&row) else {
            return Ok(0);
        };
        let count = sibling_count(&self.conn, set)?;
        if row.order_index >= count {
            return Err(StoreError::IndexOutOfRange {
                index: row.order_index,
                count,
            });
        }
        Ok(row.order_index)
    }

    pub fn tree_child_count(&self, parent: NodeId, kind: NodeKind) -> Result<usize, StoreError> {
        let parent = load_tree_node(&self.conn, parent)?;
        sibling_count(&self.conn, children_of(&parent, kind)?)
    }

    pub fn tree_child_at(
        &self,
        parent: NodeId,
        kind: NodeKind,
        index: usize,
    ) -> Result<NodeId, StoreError> {
        let parent = load_tree_node(&self.conn, parent)?;
        let set = children_of(&parent, kind)?;
        match sibling_at(&self.conn, set, index)? {
            Some(id) => Ok(NodeId::new(id)),
            None => Err(StoreError::IndexOutOfRange {
                index,
                count: sibling_count(&self.conn, set)?,
            }),
        }
    }

    pub fn tree_children(
        &self,
        parent: NodeId,
        kind: NodeKind,
    ) -> Result<Vec<TreeNodeRow>, StoreError> {
        let parent = load_tree_node(&self.conn, parent)?;
        children_of(&parent, kind)?;

        let sql = format!(
            "SELECT {TREE_NODE_COLUMNS} FROM tree_nodes WHERE parent=?1 AND type=?2 ORDER BY order_index ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![parent.id.get(), kind.as_str()], tree_node_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
