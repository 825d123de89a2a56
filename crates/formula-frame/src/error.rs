use crate::stats::Aggregate;
use crate::types::ValueKind;

pub type FrameResult<T> = Result<T, FrameError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("{operation} requires a non-empty column")]
    EmptyColumn { operation: &'static str },

    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("cannot compute {aggregate} of a {kind} column")]
    UnsupportedAggregate {
        aggregate: Aggregate,
        kind: ValueKind,
    },

    #[error("column length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("division by zero at row {index}")]
    DivisionByZero { index: usize },

    #[error("unsupported computed column kind: {0}")]
    UnsupportedComputedKind(String),
}

impl FrameError {
    pub(crate) fn type_mismatch(expected: ValueKind, actual: ValueKind) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}
