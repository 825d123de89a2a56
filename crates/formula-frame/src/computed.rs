#![forbid(unsafe_code)]

use crate::column::Column;
use crate::error::{FrameError, FrameResult};
use crate::table::Table;
use crate::types::{Timestamp, Value, ValueKind};
use std::collections::HashMap;
use std::fmt;

/// Snapshot of one row, keyed by column name.
pub type RowValues = HashMap<String, Value>;

type ComputeFn<'f> = Box<dyn Fn(&RowValues) -> Value + 'f>;

/// A derived column: a function evaluated once per row.
pub struct ComputedColumn<'f> {
    name: String,
    kind: ValueKind,
    func: Option<ComputeFn<'f>>,
}

impl fmt::Debug for ComputedColumn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedColumn")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("has_function", &self.func.is_some())
            .finish()
    }
}

impl<'f> ComputedColumn<'f> {
    /// Dynamically typed form; every result must be of `kind`.
    pub fn new(
        name: impl Into<String>,
        kind: ValueKind,
        func: impl Fn(&RowValues) -> Value + 'f,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            func: Some(Box::new(func)),
        }
    }

    /// Like [`ComputedColumn::new`] with the kind given by name (`"integer"`, `"float"`, ...).
    pub fn with_kind_name(
        name: impl Into<String>,
        kind: &str,
        func: impl Fn(&RowValues) -> Value + 'f,
    ) -> FrameResult<Self> {
        Ok(Self::new(name, kind.parse()?, func))
    }

    /// A definition with no function attached; computing it adds nothing.
    pub fn without_function(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            func: None,
        }
    }

    pub fn integer(name: impl Into<String>, func: impl Fn(&RowValues) -> i64 + 'f) -> Self {
        Self::new(name, ValueKind::Integer, move |row| Value::Integer(func(row)))
    }

    pub fn float(name: impl Into<String>, func: impl Fn(&RowValues) -> f64 + 'f) -> Self {
        Self::new(name, ValueKind::Float, move |row| Value::Float(func(row)))
    }

    pub fn string(name: impl Into<String>, func: impl Fn(&RowValues) -> String + 'f) -> Self {
        Self::new(name, ValueKind::String, move |row| Value::String(func(row)))
    }

    pub fn boolean(name: impl Into<String>, func: impl Fn(&RowValues) -> bool + 'f) -> Self {
        Self::new(name, ValueKind::Boolean, move |row| Value::Boolean(func(row)))
    }

    pub fn timestamp(
        name: impl Into<String>,
        func: impl Fn(&RowValues) -> Timestamp + 'f,
    ) -> Self {
        Self::new(name, ValueKind::Timestamp, move |row| {
            Value::Timestamp(func(row))
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComputeOutcome {
    /// The column was attached at `position`.
    Added { position: usize },
    /// The definition carried no function; the table is unchanged.
    NoFunction,
}

impl Table {
    /// Evaluate `computed` for every row and attach the result as a new column.
    ///
    /// The whole column is built before the table is touched, so a failing row leaves the table
    /// unchanged.
    pub fn computed(&mut self, computed: ComputedColumn<'_>) -> FrameResult<ComputeOutcome> {
        let ComputedColumn { name, kind, func } = computed;
        let Some(func) = func else {
            log::warn!("computed column {name} has no function; nothing was added");
            return Ok(ComputeOutcome::NoFunction);
        };
        if self.column_position(&name).is_some() {
            return Err(FrameError::DuplicateColumn(name));
        }

        let mut column = Column::new_of_kind(kind);
        let mut row_values = RowValues::with_capacity(self.column_count());
        for row in 0..self.row_count() {
            for (header, source) in self.columns() {
                let value = source.value_at(row)?;
                match row_values.get_mut(header) {
                    Some(slot) => *slot = value,
                    None => {
                        row_values.insert(header.to_string(), value);
                    }
                }
            }
            column.append(func(&row_values))?;
        }
        column.extend_to(self.row_count());

        log::debug!(
            "computed {kind} column {name} over {} rows",
            self.row_count()
        );
        let position = self.add_column(name, column)?;
        Ok(ComputeOutcome::Added { position })
    }
}
