#![forbid(unsafe_code)]

use crate::column::TypedColumn;
use crate::error::{FrameError, FrameResult};
use crate::stats::NumericElement;

/// Element-wise arithmetic that overwrites the receiver.
///
/// Both columns must have the same length. Integer overflow wraps; integer division truncates
/// toward zero.
pub trait ElementwiseOps: Sized {
    fn add_elementwise(&mut self, other: &Self) -> FrameResult<()>;
    fn sub_elementwise(&mut self, other: &Self) -> FrameResult<()>;
    fn mul_elementwise(&mut self, other: &Self) -> FrameResult<()>;

    /// Fails without modifying the receiver if any divisor is zero.
    fn div_elementwise(&mut self, other: &Self) -> FrameResult<()>;
}

impl<T: NumericElement> TypedColumn<T> {
    fn zip_apply(&mut self, other: &Self, op: impl Fn(T, T) -> T) -> FrameResult<()> {
        if self.len() != other.len() {
            return Err(FrameError::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        for (lhs, &rhs) in self.as_mut_slice().iter_mut().zip(other.iter()) {
            *lhs = op(*lhs, rhs);
        }
        Ok(())
    }
}

impl<T: NumericElement> ElementwiseOps for TypedColumn<T> {
    fn add_elementwise(&mut self, other: &Self) -> FrameResult<()> {
        self.zip_apply(other, T::add_elem)
    }

    fn sub_elementwise(&mut self, other: &Self) -> FrameResult<()> {
        self.zip_apply(other, T::sub_elem)
    }

    fn mul_elementwise(&mut self, other: &Self) -> FrameResult<()> {
        self.zip_apply(other, T::mul_elem)
    }

    fn div_elementwise(&mut self, other: &Self) -> FrameResult<()> {
        if self.len() == other.len() {
            if let Some(index) = other.iter().position(|v| v.is_zero()) {
                return Err(FrameError::DivisionByZero { index });
            }
        }
        self.zip_apply(other, T::div_elem)
    }
}
