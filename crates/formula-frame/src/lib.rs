//! In-memory typed column tables for Formula.
//!
//! This crate focuses on:
//! - Homogeneous typed columns over five value kinds, with zero-value padding in place of nulls.
//! - Tables of named columns that always share one row count.
//! - Predicate filtering, stable multi-column-consistent sorting and per-row computed columns.
//! - Numeric aggregates and element-wise column arithmetic.

#![forbid(unsafe_code)]

mod arith;
mod bitmap;
mod column;
mod computed;
mod error;
mod filter;
mod format;
mod sort;
mod stats;
mod table;
mod types;

pub use crate::arith::ElementwiseOps;
pub use crate::bitmap::RowMask;
pub use crate::column::{
    BoolColumn, Column, ColumnElement, FloatColumn, IntColumn, StringColumn, TimestampColumn,
    TypedColumn,
};
pub use crate::computed::{ComputeOutcome, ComputedColumn, RowValues};
pub use crate::error::{FrameError, FrameResult};
pub use crate::filter::{CmpOp, Predicate};
pub use crate::format::FormatOptions;
pub use crate::stats::{Aggregate, NumericElement};
pub use crate::table::Table;
pub use crate::types::{Timestamp, Value, ValueKind};
