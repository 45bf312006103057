#![forbid(unsafe_code)]

use super::*;

// Chapters in reading order: volume position first, then chapter position.
const CHAPTERS_IN_ORDER: &str = r#"
    SELECT c.id FROM tree_nodes c
    JOIN tree_nodes v ON c.parent = v.id
    WHERE c.type = 'chapter' AND v.type = 'volume'
"#;

impl SqliteStore {
    pub fn tree_first_chapter(&self) -> Result<Option<NodeId>, StoreError> {
        self.chapter_query(
            &format!("{CHAPTERS_IN_ORDER} ORDER BY v.order_index ASC, c.order_index ASC LIMIT 1"),
            None,
        )
    }

    pub fn tree_last_chapter(&self) -> Result<Option<NodeId>, StoreError> {
        self.chapter_query(
            &format!("{CHAPTERS_IN_ORDER} ORDER BY v.order_index DESC, c.order_index DESC LIMIT 1"),
            None,
        )
    }

    /// The chapter after `chapter` across volume boundaries; `None` past the last one.
    pub fn tree_next_chapter(&self, chapter: NodeId) -> Result<Option<NodeId>, StoreError> {
        let position = self.chapter_position(chapter)?;
        self.chapter_query(
            &format!(
                "{CHAPTERS_IN_ORDER} AND (v.order_index > ?1 OR (v.order_index = ?1 AND c.order_index > ?2)) \
                 ORDER BY v.order_index ASC, c.order_index ASC LIMIT 1"
            ),
            Some(position),
        )
    }

    pub fn tree_previous_chapter(&self, chapter: NodeId) -> Result<Option<NodeId>, StoreError> {
        let position = self.chapter_position(chapter)?;
        self.chapter_query(
            &format!(
                "{CHAPTERS_IN_ORDER} AND (v.order_index < ?1 OR (v.order_index = ?1 AND c.order_index < ?2)) \
                 ORDER BY v.order_index DESC, c.order_index DESC LIMIT 1"
            ),
            Some(position),
        )
    }

    fn chapter_position(&self, chapter: NodeId) -> Result<(i64, i64), StoreError> {
        let row = expect_node_kind(&self.conn, chapter, NodeKind::Chapter)?;
        let Some(volume) = row.parent else {
            return Err(StoreError::InvalidInput("chapter has no parent volume"));
        };
        let volume = expect_node_kind(&self.conn, volume, NodeKind::Volume)?;
        Ok((
            to_sqlite_i64(volume.order_index)?,
            to_sqlite_i64(row.order_index)?,
        ))
    }

    fn chapter_query(
        &self,
        sql: &str,
        position: Option<(i64, i64)>,
    ) -> Result<Option<NodeId>, StoreError> {
        let id = match position {
            Some((volume_index, chapter_index)) => self
                .conn
                .query_row(sql, params![volume_index, chapter_index], |row| {
                    row.get::<_, i64>(0)
                })
                .optional()?,
            None => self
                .conn
                .query_row(sql, [], |row| row.get::<_, i64>(0))
                .optional()?,
        };
        Ok(id.map(NodeId::new))
    }
}
