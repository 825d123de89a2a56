#![forbid(unsafe_code)]

use crate::column::Column;
use crate::error::{FrameError, FrameResult};
use crate::stats::Aggregate;
use crate::types::Value;
use std::collections::HashMap;

/// Named columns that all share one row count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    columns: Vec<Column>,
    column_index: HashMap<String, usize>,
    rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Table::add_column`].
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column: impl Into<Column>,
    ) -> FrameResult<Self> {
        self.add_column(name, column.into())?;
        Ok(self)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.headers.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).copied()
    }

    pub fn column(&self, name: &str) -> FrameResult<&Column> {
        let idx = self
            .column_position(name)
            .ok_or_else(|| FrameError::UnknownColumn(name.to_string()))?;
        Ok(&self.columns[idx])
    }

    pub fn column_at(&self, position: usize) -> Option<&Column> {
        self.columns.get(position)
    }

    /// `(name, column)` pairs in header order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> + '_ {
        self.headers.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// Attach `column` under `name` and return its position.
    ///
    /// A column shorter than the table is zero-padded; a longer one widens every existing column
    /// (and the row count) to its length.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        mut column: Column,
    ) -> FrameResult<usize> {
        let name = name.into();
        if self.column_index.contains_key(&name) {
            return Err(FrameError::DuplicateColumn(name));
        }

        let len = column.len();
        if len > self.rows {
            if !self.columns.is_empty() {
                log::debug!(
                    "column {name} widens table from {} to {len} rows",
                    self.rows
                );
            }
            for existing in &mut self.columns {
                existing.extend_to(len);
            }
            self.rows = len;
        } else {
            column.extend_to(self.rows);
        }

        let idx = self.columns.len();
        self.headers.push(name.clone());
        self.columns.push(column);
        self.column_index.insert(name, idx);
        Ok(idx)
    }

    /// Remove a column, leaving the row count untouched.
    pub fn delete_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.column_index.remove(name)?;
        self.headers.remove(idx);
        let column = self.columns.remove(idx);
        for pos in self.column_index.values_mut() {
            if *pos > idx {
                *pos -= 1;
            }
        }
        log::trace!("deleted column {name} at position {idx}");
        Some(column)
    }

    /// Remove row `index` from every column and return its values in header order.
    pub fn delete_row_at(&mut self, index: usize) -> FrameResult<Vec<Value>> {
        if index >= self.rows {
            return Err(FrameError::out_of_range(index, self.rows));
        }
        let removed = self
            .columns
            .iter_mut()
            .map(|column| column.delete_row_at(index))
            .collect::<FrameResult<Vec<_>>>()?;
        self.rows -= 1;
        log::trace!("deleted row {index}; {} rows remain", self.rows);
        Ok(removed)
    }

    /// Relabel a column in place. Unknown `old` names are ignored.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> FrameResult<()> {
        let Some(idx) = self.column_position(old) else {
            return Ok(());
        };
        let new = new.into();
        if new == old {
            return Ok(());
        }
        if self.column_index.contains_key(&new) {
            return Err(FrameError::DuplicateColumn(new));
        }

        log::trace!("renamed column {old} to {new}");
        self.column_index.remove(old);
        self.column_index.insert(new.clone(), idx);
        self.headers[idx] = new;
        Ok(())
    }

    /// Values of row `index` in header order.
    pub fn row_at(&self, index: usize) -> Option<Vec<Value>> {
        if index >= self.rows {
            return None;
        }
        self.columns
            .iter()
            .map(|column| column.value_at(index).ok())
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.rows).filter_map(move |row| self.row_at(row))
    }

    pub fn value(&self, row: usize, column: &str) -> FrameResult<Value> {
        self.column(column)?.value_at(row)
    }

    pub fn set_value(&mut self, row: usize, column: &str, value: Value) -> FrameResult<()> {
        let idx = self
            .column_position(column)
            .ok_or_else(|| FrameError::UnknownColumn(column.to_string()))?;
        self.columns[idx].set(row, value)
    }

    /// Append one row.
    ///
    /// Values are matched to columns by position and extra values are dropped. `None` cells, and
    /// columns past the end of `values`, receive the column's zero value. Every supplied value is
    /// type-checked before the table is touched.
    pub fn append_row<I>(&mut self, values: I) -> FrameResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Option<Value>>,
    {
        let values: Vec<Option<Value>> = values
            .into_iter()
            .take(self.columns.len())
            .map(Into::into)
            .collect();

        for (column, value) in self.columns.iter().zip(&values) {
            if let Some(value) = value {
                if value.kind() != column.kind() {
                    return Err(FrameError::type_mismatch(column.kind(), value.kind()));
                }
            }
        }

        for (column, value) in self.columns.iter_mut().zip(values) {
            if let Some(value) = value {
                column.append(value)?;
            }
        }

        self.rows += 1;
        for column in &mut self.columns {
            column.extend_to(self.rows);
        }
        Ok(())
    }

    /// New table holding deep copies of the named columns, in the requested order.
    pub fn slice_columns<I, S>(&self, names: I) -> FrameResult<Table>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Table::new();
        for name in names {
            let name = name.as_ref();
            out.add_column(name, self.column(name)?.clone())?;
        }
        Ok(out)
    }

    pub fn aggregate(&self, column: &str, op: Aggregate) -> FrameResult<Value> {
        self.column(column)?.aggregate(op)
    }

    pub fn unique(&self, column: &str) -> FrameResult<Column> {
        Ok(self.column(column)?.unique())
    }

    /// New table with the same schema holding `rows` (in bounds) in the given order.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> Table {
        Table {
            headers: self.headers.clone(),
            columns: self.columns.iter().map(|column| column.take(rows)).collect(),
            column_index: self.column_index.clone(),
            rows: rows.len(),
        }
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }
}
