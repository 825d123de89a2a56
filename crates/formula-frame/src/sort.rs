#![forbid(unsafe_code)]

use crate::error::FrameResult;
use crate::table::Table;

impl Table {
    /// Reorder every row by the values of `column`.
    ///
    /// The permutation is computed once from the key column and applied to every column, so rows
    /// stay aligned. Rows with equal keys keep their relative order.
    pub fn sort_by(&mut self, column: &str, ascending: bool) -> FrameResult<()> {
        let order = self.column(column)?.sort_permutation(ascending);
        log::debug!(
            "sorting {} rows by {column} ({})",
            order.len(),
            if ascending { "ascending" } else { "descending" }
        );
        for col in self.columns_mut() {
            *col = col.take(&order);
        }
        Ok(())
    }

    /// Sorted copy; the receiver is left as is.
    pub fn sorted_by(&self, column: &str, ascending: bool) -> FrameResult<Table> {
        let order = self.column(column)?.sort_permutation(ascending);
        Ok(self.select_rows(&order))
    }
}
