#![forbid(unsafe_code)]

use crate::error::FrameError;
use chrono::{DateTime, FixedOffset, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Timestamp cells carry their UTC offset; comparisons are by instant.
pub type Timestamp = DateTime<FixedOffset>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Float,
    String,
    Boolean,
    Timestamp,
}

impl ValueKind {
    pub const ALL: [ValueKind; 5] = [
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::String,
        ValueKind::Boolean,
        ValueKind::Timestamp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Timestamp => "timestamp",
        }
    }

    /// The value used to pad cells that were never written.
    pub fn zero_value(self) -> Value {
        match self {
            ValueKind::Integer => Value::Integer(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::String => Value::String(String::new()),
            ValueKind::Boolean => Value::Boolean(false),
            ValueKind::Timestamp => Value::Timestamp(Timestamp::default()),
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Integer | ValueKind::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" | "i64" => Ok(ValueKind::Integer),
            "float" | "f64" => Ok(ValueKind::Float),
            "string" | "str" => Ok(ValueKind::String),
            "boolean" | "bool" => Ok(ValueKind::Boolean),
            "timestamp" | "time" | "datetime" => Ok(ValueKind::Timestamp),
            _ => Err(FrameError::UnsupportedComputedKind(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Timestamp(Timestamp),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Value::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric view of integer and float cells.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Compare two values of the same kind.
    ///
    /// Returns `None` for mismatched kinds and for unordered floats (NaN).
    pub fn partial_cmp_same_kind(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::FormatOptions::default().format_value(self))
    }
}

// Native integer-like and float-like inputs collapse onto the two canonical numeric kinds.
macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Integer(v as i64)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v.fixed_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_numbers_normalize_to_canonical_kinds() {
        assert_eq!(Value::from(7u8), Value::Integer(7));
        assert_eq!(Value::from(-3i32), Value::Integer(-3));
        assert_eq!(Value::from(9usize), Value::Integer(9));
        assert_eq!(Value::from(1.5f32), Value::Float(1.5));
        assert_eq!(Value::from("x").kind(), ValueKind::String);
    }

    #[test]
    fn kind_names_parse_case_insensitively() {
        assert_eq!("Float".parse::<ValueKind>(), Ok(ValueKind::Float));
        assert_eq!(" bool ".parse::<ValueKind>(), Ok(ValueKind::Boolean));
        assert_eq!(
            "decimal".parse::<ValueKind>(),
            Err(FrameError::UnsupportedComputedKind("decimal".to_string()))
        );
    }

    #[test]
    fn zero_values_match_their_kind() {
        for kind in ValueKind::ALL {
            assert_eq!(kind.zero_value().kind(), kind);
        }
    }

    #[test]
    fn numeric_view() {
        let numeric: Vec<ValueKind> = ValueKind::ALL
            .into_iter()
            .filter(|kind| kind.is_numeric())
            .collect();
        assert_eq!(numeric, vec![ValueKind::Integer, ValueKind::Float]);

        assert_eq!(Value::Integer(3).to_f64(), Some(3.0));
        assert_eq!(Value::Float(0.5).to_f64(), Some(0.5));
        assert_eq!(Value::Boolean(true).to_f64(), None);
    }
}
