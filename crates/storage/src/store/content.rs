#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    /// Body text of `chapter`; empty when nothing was stored yet.
    pub fn chapter_content(&self, chapter: NodeId) -> Result<String, StoreError> {
        expect_node_kind(&self.conn, chapter, NodeKind::Chapter)?;
        Ok(self
            .conn
            .query_row(
                "SELECT content FROM chapter_content WHERE chapter_ref=?1",
                params![chapter.get()],
                |row| row.get::<_, String>(0),
            )
            .optional()?
            .unwrap_or_default())
    }

    pub fn chapter_content_set(&mut self, chapter: NodeId, content: &str) -> Result<(), StoreError> {
        expect_node_kind(&self.conn, chapter, NodeKind::Chapter)?;
        self.conn.execute(
            r#"
            INSERT INTO chapter_content(chapter_ref, content) VALUES (?1, ?2)
            ON CONFLICT(chapter_ref) DO UPDATE SET content=excluded.content
            "#,
            params![chapter.get(), content],
        )?;
        tracing::debug!(%chapter, bytes = content.len(), "chapter content stored");
        Ok(())
    }
}
