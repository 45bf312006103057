#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    /// Attach points owned by a despline, or bound to a chapter or storyblock.
    ///
    /// Points of one despline come back in their own order; points gathered from several
    /// desplines are grouped by despline in outline order.
    pub fn attach_points_of(&self, node: NodeId) -> Result<Vec<AttachPointRow>, StoreError> {
        let row = load_tree_node(&self.conn, node)?;
        let axis = match row.kind {
            NodeKind::Despline => "p.despline_ref",
            NodeKind::Chapter => "p.chapter_ref",
            NodeKind::Storyblock => "p.storyblock_ref",
            other => return Err(StoreError::type_mismatch("despline|chapter|storyblock", other)),
        };

        let sql = format!(
            r#"
            SELECT p.id, p.despline_ref, p.chapter_ref, p.storyblock_ref, p.order_index, p.title, p.description
            FROM attach_points p
            JOIN tree_nodes d ON d.id = p.despline_ref
            JOIN tree_nodes v ON v.id = d.parent
            WHERE {axis} = ?1
            ORDER BY v.order_index ASC, d.order_index ASC, p.order_index ASC
            "#
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![node.get()], attach_point_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn attach_point(&self, point: PointId) -> Result<AttachPointRow, StoreError> {
        load_attach_point(&self.conn, point)
    }

    pub fn attach_point_count(&self, despline: NodeId) -> Result<usize, StoreError> {
        expect_node_kind(&self.conn, despline, NodeKind::Despline)?;
        sibling_count(&self.conn, points_of_despline(despline))
    }
}
