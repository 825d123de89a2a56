#![forbid(unsafe_code)]

use crate::error::{FrameError, FrameResult};
use crate::types::{Timestamp, Value, ValueKind};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}

    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for bool {}
    impl Sealed for super::Timestamp {}
}

/// Native element type of one of the five column kinds.
///
/// The trait is sealed: the set of column kinds is closed.
pub trait ColumnElement:
    sealed::Sealed + Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static
{
    const KIND: ValueKind;

    /// Hashable identity used by [`TypedColumn::unique`].
    type Key: Eq + Hash;

    fn into_value(self) -> Value;

    /// Unwrap a [`Value`] of the matching kind, handing the value back otherwise.
    fn from_value(value: Value) -> Result<Self, Value>;

    /// Total order used for sorting.
    fn sort_cmp(&self, other: &Self) -> Ordering;

    /// Order against a [`Value`] of the same kind; `None` when unordered or mismatched.
    fn partial_cmp_value(&self, value: &Value) -> Option<Ordering>;

    fn unique_key(&self) -> Self::Key;
}

impl ColumnElement for i64 {
    const KIND: ValueKind = ValueKind::Integer;
    type Key = i64;

    fn into_value(self) -> Value {
        Value::Integer(self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Integer(v) => Ok(v),
            other => Err(other),
        }
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn partial_cmp_value(&self, value: &Value) -> Option<Ordering> {
        match value {
            Value::Integer(v) => Some(self.cmp(v)),
            _ => None,
        }
    }

    fn unique_key(&self) -> i64 {
        *self
    }
}

impl ColumnElement for f64 {
    const KIND: ValueKind = ValueKind::Float;
    type Key = OrderedFloat<f64>;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(other),
        }
    }

    // NaN sorts after every number.
    fn sort_cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(*self).cmp(&OrderedFloat(*other))
    }

    fn partial_cmp_value(&self, value: &Value) -> Option<Ordering> {
        match value {
            Value::Float(v) => self.partial_cmp(v),
            _ => None,
        }
    }

    fn unique_key(&self) -> OrderedFloat<f64> {
        OrderedFloat(*self)
    }
}

impl ColumnElement for String {
    const KIND: ValueKind = ValueKind::String;
    type Key = String;

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(other),
        }
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn partial_cmp_value(&self, value: &Value) -> Option<Ordering> {
        match value {
            Value::String(v) => Some(self.as_str().cmp(v.as_str())),
            _ => None,
        }
    }

    fn unique_key(&self) -> String {
        self.clone()
    }
}

impl ColumnElement for bool {
    const KIND: ValueKind = ValueKind::Boolean;
    type Key = bool;

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Boolean(v) => Ok(v),
            other => Err(other),
        }
    }

    // false < true
    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn partial_cmp_value(&self, value: &Value) -> Option<Ordering> {
        match value {
            Value::Boolean(v) => Some(self.cmp(v)),
            _ => None,
        }
    }

    fn unique_key(&self) -> bool {
        *self
    }
}

impl ColumnElement for Timestamp {
    const KIND: ValueKind = ValueKind::Timestamp;
    type Key = Timestamp;

    fn into_value(self) -> Value {
        Value::Timestamp(self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Timestamp(v) => Ok(v),
            other => Err(other),
        }
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn partial_cmp_value(&self, value: &Value) -> Option<Ordering> {
        match value {
            Value::Timestamp(v) => Some(self.cmp(v)),
            _ => None,
        }
    }

    fn unique_key(&self) -> Timestamp {
        *self
    }
}

/// Homogeneous storage for one column kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypedColumn<T> {
    data: Vec<T>,
}

pub type IntColumn = TypedColumn<i64>;
pub type FloatColumn = TypedColumn<f64>;
pub type StringColumn = TypedColumn<String>;
pub type BoolColumn = TypedColumn<bool>;
pub type TimestampColumn = TypedColumn<Timestamp>;

impl<T: ColumnElement> TypedColumn<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn kind(&self) -> ValueKind {
        T::KIND
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Owned copy of every element.
    pub fn data(&self) -> Vec<T> {
        self.data.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Pad with zero values up to `len`; never truncates.
    pub fn extend_to(&mut self, len: usize) {
        if len > self.data.len() {
            self.data.resize(len, T::default());
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn value_at(&self, index: usize) -> FrameResult<Value> {
        self.data
            .get(index)
            .map(|v| v.clone().into_value())
            .ok_or_else(|| FrameError::out_of_range(index, self.data.len()))
    }

    pub fn set(&mut self, index: usize, value: T) -> FrameResult<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or_else(|| FrameError::out_of_range(index, len))?;
        *slot = value;
        Ok(())
    }

    pub fn set_value(&mut self, index: usize, value: Value) -> FrameResult<()> {
        let value = Self::unwrap_value(value)?;
        self.set(index, value)
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    pub fn append_value(&mut self, value: Value) -> FrameResult<()> {
        let value = Self::unwrap_value(value)?;
        self.data.push(value);
        Ok(())
    }

    pub fn delete_row_at(&mut self, index: usize) -> FrameResult<T> {
        if index >= self.data.len() {
            return Err(FrameError::out_of_range(index, self.data.len()));
        }
        Ok(self.data.remove(index))
    }

    pub fn head(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    /// Everything after the first element; `None` when there is at most one element.
    pub fn tail(&self) -> Option<&[T]> {
        if self.data.len() <= 1 {
            return None;
        }
        Some(&self.data[1..])
    }

    /// Owned copy of `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> FrameResult<Vec<T>> {
        if end > self.data.len() {
            return Err(FrameError::out_of_range(end, self.data.len()));
        }
        if start > end {
            return Err(FrameError::out_of_range(start, end));
        }
        Ok(self.data[start..end].to_vec())
    }

    /// Stable in-place sort.
    pub fn sort(&mut self, ascending: bool) {
        if ascending {
            self.data.sort_by(|a, b| a.sort_cmp(b));
        } else {
            self.data.sort_by(|a, b| b.sort_cmp(a));
        }
    }

    /// Row positions in sorted order; equal elements keep their relative order.
    pub fn sort_permutation(&self, ascending: bool) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.data.len()).collect();
        if ascending {
            order.sort_by(|&a, &b| self.data[a].sort_cmp(&self.data[b]));
        } else {
            order.sort_by(|&a, &b| self.data[b].sort_cmp(&self.data[a]));
        }
        order
    }

    /// New column holding the elements at `rows`, in that order.
    ///
    /// Every position must be in bounds.
    pub(crate) fn take(&self, rows: &[usize]) -> Self {
        Self {
            data: rows.iter().map(|&row| self.data[row].clone()).collect(),
        }
    }

    /// Distinct elements in order of first occurrence.
    pub fn unique(&self) -> Self {
        let mut seen = HashSet::with_capacity(self.data.len());
        self.data
            .iter()
            .filter(|v| seen.insert(v.unique_key()))
            .cloned()
            .collect()
    }

    pub(crate) fn partial_cmp_value_at(&self, row: usize, value: &Value) -> Option<Ordering> {
        self.data.get(row)?.partial_cmp_value(value)
    }

    fn unwrap_value(value: Value) -> FrameResult<T> {
        T::from_value(value).map_err(|other| FrameError::type_mismatch(T::KIND, other.kind()))
    }
}

impl<T: ColumnElement> From<Vec<T>> for TypedColumn<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: ColumnElement> FromIterator<T> for TypedColumn<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a, T: ColumnElement> IntoIterator for &'a TypedColumn<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// A column of one of the five supported kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Integer(IntColumn),
    Float(FloatColumn),
    String(StringColumn),
    Boolean(BoolColumn),
    Timestamp(TimestampColumn),
}

macro_rules! with_column {
    ($column:expr, $c:ident => $body:expr) => {
        match $column {
            Column::Integer($c) => $body,
            Column::Float($c) => $body,
            Column::String($c) => $body,
            Column::Boolean($c) => $body,
            Column::Timestamp($c) => $body,
        }
    };
}

macro_rules! map_column {
    ($column:expr, $c:ident => $body:expr) => {
        match $column {
            Column::Integer($c) => Column::Integer($body),
            Column::Float($c) => Column::Float($body),
            Column::String($c) => Column::String($body),
            Column::Boolean($c) => Column::Boolean($body),
            Column::Timestamp($c) => Column::Timestamp($body),
        }
    };
}

impl Column {
    /// Empty column of the given kind.
    pub fn new_of_kind(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Integer => Column::Integer(IntColumn::new()),
            ValueKind::Float => Column::Float(FloatColumn::new()),
            ValueKind::String => Column::String(StringColumn::new()),
            ValueKind::Boolean => Column::Boolean(BoolColumn::new()),
            ValueKind::Timestamp => Column::Timestamp(TimestampColumn::new()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        with_column!(self, c => c.kind())
    }

    pub fn len(&self) -> usize {
        with_column!(self, c => c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn extend_to(&mut self, len: usize) {
        with_column!(self, c => c.extend_to(len))
    }

    pub fn value_at(&self, index: usize) -> FrameResult<Value> {
        with_column!(self, c => c.value_at(index))
    }

    pub fn set(&mut self, index: usize, value: Value) -> FrameResult<()> {
        with_column!(self, c => c.set_value(index, value))
    }

    pub fn append(&mut self, value: Value) -> FrameResult<()> {
        with_column!(self, c => c.append_value(value))
    }

    pub fn delete_row_at(&mut self, index: usize) -> FrameResult<Value> {
        with_column!(self, c => c.delete_row_at(index).map(ColumnElement::into_value))
    }

    /// Zero-length column of the same kind.
    pub fn empty(&self) -> Self {
        Column::new_of_kind(self.kind())
    }

    pub fn head(&self) -> Option<Value> {
        with_column!(self, c => c.head().cloned().map(ColumnElement::into_value))
    }

    pub fn last(&self) -> Option<Value> {
        with_column!(self, c => c.last().cloned().map(ColumnElement::into_value))
    }

    /// Everything after the first element; `None` when there is at most one element.
    pub fn tail(&self) -> Option<Column> {
        if self.len() <= 1 {
            return None;
        }
        Some(map_column!(self, c => TypedColumn::from_vec(c.as_slice()[1..].to_vec())))
    }

    pub fn slice(&self, start: usize, end: usize) -> FrameResult<Column> {
        Ok(map_column!(self, c => TypedColumn::from_vec(c.slice(start, end)?)))
    }

    /// Every element as a [`Value`].
    pub fn values(&self) -> Vec<Value> {
        with_column!(self, c => c.iter().cloned().map(ColumnElement::into_value).collect())
    }

    pub fn sort(&mut self, ascending: bool) {
        with_column!(self, c => c.sort(ascending))
    }

    pub fn sort_permutation(&self, ascending: bool) -> Vec<usize> {
        with_column!(self, c => c.sort_permutation(ascending))
    }

    pub(crate) fn take(&self, rows: &[usize]) -> Column {
        map_column!(self, c => c.take(rows))
    }

    pub fn unique(&self) -> Column {
        map_column!(self, c => c.unique())
    }

    pub(crate) fn partial_cmp_value_at(&self, row: usize, value: &Value) -> Option<Ordering> {
        with_column!(self, c => c.partial_cmp_value_at(row, value))
    }

    pub fn as_integer(&self) -> Option<&IntColumn> {
        match self {
            Column::Integer(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&FloatColumn> {
        match self {
            Column::Float(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringColumn> {
        match self {
            Column::String(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<&BoolColumn> {
        match self {
            Column::Boolean(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&TimestampColumn> {
        match self {
            Column::Timestamp(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_integer_mut(&mut self) -> Option<&mut IntColumn> {
        match self {
            Column::Integer(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_float_mut(&mut self) -> Option<&mut FloatColumn> {
        match self {
            Column::Float(c) => Some(c),
            _ => None,
        }
    }
}

macro_rules! impl_column_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<TypedColumn<$ty>> for Column {
                fn from(column: TypedColumn<$ty>) -> Self {
                    Column::$variant(column)
                }
            }

            impl From<Vec<$ty>> for Column {
                fn from(data: Vec<$ty>) -> Self {
                    Column::$variant(TypedColumn::from_vec(data))
                }
            }
        )*
    };
}

impl_column_from!(
    i64 => Integer,
    f64 => Float,
    String => String,
    bool => Boolean,
    Timestamp => Timestamp,
);

impl From<Vec<&str>> for Column {
    fn from(data: Vec<&str>) -> Self {
        Column::String(data.into_iter().map(str::to_string).collect())
    }
}
