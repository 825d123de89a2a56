//! Row predicates.
//!
//! A [`Predicate`] is a tree of column comparisons joined by `And`/`Or`. Before evaluation the
//! tree is bound to a [`Table`]: every referenced column is resolved once and every comparison
//! value is checked against the column's kind, so type errors surface even in branches that
//! short-circuiting would skip. Evaluation then walks the bound tree once per row.
#![forbid(unsafe_code)]

use crate::bitmap::RowMask;
use crate::column::Column;
use crate::error::{FrameError, FrameResult};
use crate::table::Table;
use crate::types::Value;
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
            CmpOp::Gt => ">",
            CmpOp::Gte => ">=",
        }
    }

    /// Unordered operands (NaN) only satisfy `Ne`.
    fn matches(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return self == CmpOp::Ne;
        };
        match self {
            CmpOp::Eq => ordering == Ordering::Equal,
            CmpOp::Ne => ordering != Ordering::Equal,
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Lte => ordering != Ordering::Greater,
            CmpOp::Gt => ordering == Ordering::Greater,
            CmpOp::Gte => ordering != Ordering::Less,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// `column <op> value`.
    Cmp {
        column: String,
        op: CmpOp,
        value: Value,
    },
    /// The cell equals one of `values`.
    In { column: String, values: Vec<Value> },
    /// Every child holds. Empty is true.
    And(Vec<Predicate>),
    /// At least one child holds. Empty is false.
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn compare(column: impl Into<String>, op: CmpOp, value: impl Into<Value>) -> Self {
        Predicate::Cmp {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CmpOp::Eq, value)
    }

    pub fn not_equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CmpOp::Ne, value)
    }

    pub fn less_than(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CmpOp::Lt, value)
    }

    pub fn less_or_equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CmpOp::Lte, value)
    }

    pub fn greater_than(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CmpOp::Gt, value)
    }

    pub fn greater_or_equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CmpOp::Gte, value)
    }

    pub fn one_of<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Predicate::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and(children: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Or(children.into_iter().collect())
    }

    fn bind<'a>(&'a self, table: &'a Table) -> FrameResult<Bound<'a>> {
        Ok(match self {
            Predicate::Cmp { column, op, value } => {
                let column = table.column(column)?;
                check_kind(column, value)?;
                Bound::Cmp {
                    column,
                    op: *op,
                    value,
                }
            }
            Predicate::In { column, values } => {
                let column = table.column(column)?;
                for value in values {
                    check_kind(column, value)?;
                }
                Bound::In { column, values }
            }
            Predicate::And(children) => Bound::And(
                children
                    .iter()
                    .map(|child| child.bind(table))
                    .collect::<FrameResult<_>>()?,
            ),
            Predicate::Or(children) => Bound::Or(
                children
                    .iter()
                    .map(|child| child.bind(table))
                    .collect::<FrameResult<_>>()?,
            ),
        })
    }
}

fn check_kind(column: &Column, value: &Value) -> FrameResult<()> {
    if column.kind() != value.kind() {
        return Err(FrameError::type_mismatch(column.kind(), value.kind()));
    }
    Ok(())
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, children: &[Predicate], sep: &str) -> fmt::Result {
            f.write_str("(")?;
            for (idx, child) in children.iter().enumerate() {
                if idx > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{child}")?;
            }
            f.write_str(")")
        }

        match self {
            Predicate::Cmp { column, op, value } => {
                write!(f, "[{column}] {} {value}", op.symbol())
            }
            Predicate::In { column, values } => {
                write!(f, "[{column}] IN {{")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("}")
            }
            Predicate::And(children) => join(f, children, " && "),
            Predicate::Or(children) => join(f, children, " || "),
        }
    }
}

/// A predicate resolved against one table.
enum Bound<'a> {
    Cmp {
        column: &'a Column,
        op: CmpOp,
        value: &'a Value,
    },
    In {
        column: &'a Column,
        values: &'a [Value],
    },
    And(Vec<Bound<'a>>),
    Or(Vec<Bound<'a>>),
}

impl Bound<'_> {
    fn test(&self, row: usize) -> bool {
        match self {
            Bound::Cmp { column, op, value } => op.matches(column.partial_cmp_value_at(row, value)),
            Bound::In { column, values } => values
                .iter()
                .any(|v| column.partial_cmp_value_at(row, v) == Some(Ordering::Equal)),
            Bound::And(children) => children.iter().all(|child| child.test(row)),
            Bound::Or(children) => children.iter().any(|child| child.test(row)),
        }
    }
}

impl Table {
    /// Evaluate `predicate` for every row.
    pub fn filter_mask(&self, predicate: &Predicate) -> FrameResult<RowMask> {
        let bound = predicate.bind(self)?;
        Ok((0..self.row_count()).map(|row| bound.test(row)).collect())
    }

    /// Positions of the rows matching `predicate`, in increasing order.
    pub fn matching_rows(&self, predicate: &Predicate) -> FrameResult<Vec<usize>> {
        Ok(self.filter_mask(predicate)?.to_rows())
    }

    /// New table with the same schema holding only the rows matching `predicate`.
    pub fn filtered(&self, predicate: &Predicate) -> FrameResult<Table> {
        let rows = self.matching_rows(predicate)?;
        log::debug!(
            "filter {predicate} kept {} of {} rows",
            rows.len(),
            self.row_count()
        );
        Ok(self.select_rows(&rows))
    }

    /// New table with the same schema holding only the rows for which `predicate` returns true.
    ///
    /// The predicate sees each row's values in header order.
    pub fn filter_func<F>(&self, mut predicate: F) -> Table
    where
        F: FnMut(&[Value]) -> bool,
    {
        let mut row_values = Vec::with_capacity(self.column_count());
        let mut rows = Vec::new();
        for row in 0..self.row_count() {
            row_values.clear();
            row_values.extend(self.columns().filter_map(|(_, column)| column.value_at(row).ok()));
            if predicate(&row_values) {
                rows.push(row);
            }
        }
        log::debug!(
            "filter_func kept {} of {} rows",
            rows.len(),
            self.row_count()
        );
        self.select_rows(&rows)
    }
}
