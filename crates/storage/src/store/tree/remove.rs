#![forbid(unsafe_code)]

use super::*;

const SUBTREE_CTE: &str = r#"
    WITH RECURSIVE subtree(id) AS (
      SELECT ?1
      UNION ALL
      SELECT t.id FROM tree_nodes t JOIN subtree s ON t.parent = s.id
    )
"#;

impl SqliteStore {
    /// Deletes `node` and its whole subtree, returning how many tree rows went away.
    ///
    /// Attach points bound to a removed chapter or storyblock cascade away with it; the
    /// desplines that owned them are renumbered in the same transaction.
    pub fn tree_remove_node(&mut self, node: NodeId) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let row = load_tree_node(&tx, node)?;
        let Some(set) = siblings_of(&row) else {
            return Err(StoreError::InvalidInput("the novel root cannot be removed"));
        };

        let removed: i64 = tx.query_row(
            &format!("{SUBTREE_CTE} SELECT COUNT(1) FROM subtree"),
            params![node.get()],
            |r| r.get(0),
        )?;

        let orphaned_desplines = {
            let mut stmt = tx.prepare(&format!(
                r#"{SUBTREE_CTE}
                SELECT DISTINCT despline_ref FROM attach_points
                WHERE (chapter_ref IN (SELECT id FROM subtree) OR storyblock_ref IN (SELECT id FROM subtree))
                  AND despline_ref NOT IN (SELECT id FROM subtree)"#
            ))?;
            let rows = stmt.query_map(params![node.get()], |r| r.get::<_, i64>(0))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        shift_siblings(&tx, set, row.order_index + 1, -1)?;
        tx.execute("DELETE FROM tree_nodes WHERE id=?1", params![node.get()])?;

        for despline in &orphaned_desplines {
            renumber_siblings(
                &tx,
                SiblingSet::DesplinePoints {
                    despline: NodeId::new(*despline),
                },
            )?;
        }

        tx.commit()?;
        tracing::debug!(
            %node,
            kind = %row.kind,
            removed,
            renumbered_desplines = orphaned_desplines.len(),
            "tree node removed"
        );
        to_index(removed)
    }
}
