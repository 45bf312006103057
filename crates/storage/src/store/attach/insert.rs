#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    pub fn attach_insert_point_before(
        &mut self,
        request: InsertPointRequest,
    ) -> Result<PointId, StoreError> {
        let InsertPointRequest {
            despline,
            index,
            title,
            description,
        } = request;

        let tx = self.conn.transaction()?;
        expect_node_kind(&tx, despline, NodeKind::Despline)?;
        let set = points_of_despline(despline);

        let count = sibling_count(&tx, set)?;
        let index = index.min(count);
        shift_siblings(&tx, set, index, 1)?;

        tx.execute(
            "INSERT INTO attach_points(despline_ref, chapter_ref, storyblock_ref, order_index, title, description) \
             VALUES (?1, NULL, NULL, ?2, ?3, ?4)",
            params![despline.get(), to_sqlite_i64(index)?, title, description],
        )?;
        let point = PointId::new(tx.last_insert_rowid());

        tx.commit()?;
        tracing::debug!(%point, %despline, index, "attach point inserted");
        Ok(point)
    }
}
