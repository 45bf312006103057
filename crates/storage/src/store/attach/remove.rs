#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    pub fn attach_remove_point(&mut self, point: PointId) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let row = load_attach_point(&tx, point)?;

        shift_siblings(
            &tx,
            points_of_despline(row.despline),
            row.order_index + 1,
            -1,
        )?;
        tx.execute("DELETE FROM attach_points WHERE id=?1", params![point.get()])?;

        tx.commit()?;
        tracing::debug!(%point, despline = %row.despline, "attach point removed");
        Ok(())
    }
}
