#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    /// Binds `point` to a chapter, or opens that axis again with `None`.
    pub fn attach_bind_chapter(
        &mut self,
        point: PointId,
        chapter: Option<NodeId>,
    ) -> Result<(), StoreError> {
        self.bind_axis(point, "chapter_ref", NodeKind::Chapter, chapter)
    }

    pub fn attach_bind_storyblock(
        &mut self,
        point: PointId,
        storyblock: Option<NodeId>,
    ) -> Result<(), StoreError> {
        self.bind_axis(point, "storyblock_ref", NodeKind::Storyblock, storyblock)
    }

    pub fn attach_set_title(&mut self, point: PointId, title: &str) -> Result<(), StoreError> {
        self.update_point_text(point, "title", title)
    }

    pub fn attach_set_description(
        &mut self,
        point: PointId,
        description: &str,
    ) -> Result<(), StoreError> {
        self.update_point_text(point, "description", description)
    }

    fn bind_axis(
        &mut self,
        point: PointId,
        column: &'static str,
        kind: NodeKind,
        target: Option<NodeId>,
    ) -> Result<(), StoreError> {
        if let Some(target) = target {
            expect_node_kind(&self.conn, target, kind)?;
        }
        let changed = self.conn.execute(
            &format!("UPDATE attach_points SET {column}=?1 WHERE id=?2"),
            params![target.map(NodeId::get), point.get()],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("attach point", point.get()));
        }
        tracing::debug!(%point, column, target = ?target, "attach point rebound");
        Ok(())
    }

    fn update_point_text(
        &mut self,
        point: PointId,
        column: &'static str,
        value: &str,
    ) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            &format!("UPDATE attach_points SET {column}=?1 WHERE id=?2"),
            params![value, point.get()],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("attach point", point.get()));
        }
        Ok(())
    }
}
