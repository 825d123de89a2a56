#![forbid(unsafe_code)]

use crate::column::{Column, ColumnElement, TypedColumn};
use crate::error::{FrameError, FrameResult};
use crate::types::Value;
use std::cmp::Ordering;
use std::fmt;

/// Element types that support statistical reductions and element-wise arithmetic.
pub trait NumericElement: ColumnElement + Copy + PartialOrd {
    fn to_f64(self) -> f64;

    fn is_zero(self) -> bool;

    fn add_elem(self, rhs: Self) -> Self;
    fn sub_elem(self, rhs: Self) -> Self;
    fn mul_elem(self, rhs: Self) -> Self;
    fn div_elem(self, rhs: Self) -> Self;
}

impl NumericElement for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn is_zero(self) -> bool {
        self == 0
    }

    fn add_elem(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    fn sub_elem(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    fn mul_elem(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    // i64::MIN / -1 wraps instead of panicking.
    fn div_elem(self, rhs: Self) -> Self {
        self.wrapping_div(rhs)
    }
}

impl NumericElement for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn is_zero(self) -> bool {
        self == 0.0
    }

    fn add_elem(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub_elem(self, rhs: Self) -> Self {
        self - rhs
    }

    fn mul_elem(self, rhs: Self) -> Self {
        self * rhs
    }

    fn div_elem(self, rhs: Self) -> Self {
        self / rhs
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Min,
    Max,
    Sum,
    Mean,
    Median,
}

impl Aggregate {
    pub fn name(self) -> &'static str {
        match self {
            Aggregate::Min => "min",
            Aggregate::Max => "max",
            Aggregate::Sum => "sum",
            Aggregate::Mean => "mean",
            Aggregate::Median => "median",
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<T: NumericElement> TypedColumn<T> {
    /// Smallest element under the sort order, so NaN is only returned when every element is NaN.
    pub fn min(&self) -> FrameResult<T> {
        let (first, rest) = self.split_first_or_empty(Aggregate::Min)?;
        Ok(rest.iter().fold(first, |acc, &v| {
            if v.sort_cmp(&acc) == Ordering::Less {
                v
            } else {
                acc
            }
        }))
    }

    /// Largest element under the sort order; any NaN wins.
    pub fn max(&self) -> FrameResult<T> {
        let (first, rest) = self.split_first_or_empty(Aggregate::Max)?;
        Ok(rest.iter().fold(first, |acc, &v| {
            if v.sort_cmp(&acc) == Ordering::Greater {
                v
            } else {
                acc
            }
        }))
    }

    /// Sum in the column's native type; zero for an empty column. Integer sums wrap.
    pub fn sum(&self) -> T {
        self.iter().fold(T::default(), |acc, &v| acc.add_elem(v))
    }

    pub fn mean(&self) -> FrameResult<f64> {
        if self.is_empty() {
            return Err(empty(Aggregate::Mean));
        }
        // Accumulated in f64 so integer columns don't wrap.
        let total: f64 = self.iter().map(|&v| v.to_f64()).sum();
        Ok(total / self.len() as f64)
    }

    /// Middle value of a sorted copy; the average of the two middle values for even lengths.
    pub fn median(&self) -> FrameResult<f64> {
        if self.is_empty() {
            return Err(empty(Aggregate::Median));
        }

        let mut sorted = self.data();
        sorted.sort_by(|a, b| a.sort_cmp(b));

        let n = sorted.len();
        if n % 2 == 0 {
            Ok((sorted[n / 2 - 1].to_f64() + sorted[n / 2].to_f64()) / 2.0)
        } else {
            Ok(sorted[n / 2].to_f64())
        }
    }

    pub fn aggregate(&self, op: Aggregate) -> FrameResult<Value> {
        Ok(match op {
            Aggregate::Min => self.min()?.into_value(),
            Aggregate::Max => self.max()?.into_value(),
            Aggregate::Sum => self.sum().into_value(),
            Aggregate::Mean => Value::Float(self.mean()?),
            Aggregate::Median => Value::Float(self.median()?),
        })
    }

    fn split_first_or_empty(&self, op: Aggregate) -> FrameResult<(T, &[T])> {
        self.as_slice()
            .split_first()
            .map(|(first, rest)| (*first, rest))
            .ok_or_else(|| empty(op))
    }
}

fn empty(op: Aggregate) -> FrameError {
    FrameError::EmptyColumn {
        operation: op.name(),
    }
}

impl Column {
    /// Reduce a numeric column.
    ///
    /// Min, Max and Sum keep the column's kind; Mean and Median are always floats.
    pub fn aggregate(&self, op: Aggregate) -> FrameResult<Value> {
        match self {
            Column::Integer(c) => c.aggregate(op),
            Column::Float(c) => c.aggregate(op),
            other => Err(FrameError::UnsupportedAggregate {
                aggregate: op,
                kind: other.kind(),
            }),
        }
    }
}
