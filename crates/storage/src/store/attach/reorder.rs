#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    /// Swaps `point` with its predecessor. `false` when it is already first.
    pub fn attach_move_up(&mut self, point: PointId) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let row = load_attach_point(&tx, point)?;
        if row.order_index == 0 {
            return Ok(false);
        }
        let moved = swap_siblings(
            &tx,
            points_of_despline(row.despline),
            row.order_index,
            row.order_index - 1,
        )?;
        tx.commit()?;
        Ok(moved)
    }

    /// Swaps `point` with its successor. `false` when it is already last.
    pub fn attach_move_down(&mut self, point: PointId) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let row = load_attach_point(&tx, point)?;
        let set = points_of_despline(row.despline);
        if row.order_index + 1 >= sibling_count(&tx, set)? {
            return Ok(false);
        }
        let moved = swap_siblings(&tx, set, row.order_index, row.order_index + 1)?;
        tx.commit()?;
        Ok(moved)
    }
}
