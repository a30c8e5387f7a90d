//! Errors raised while building or combining matrices.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatrixError>;

/// A failed matrix construction or multiplication.
///
/// Validation always happens before any cell is written, so a returned
/// error never leaves a partially built or partially multiplied matrix
/// behind.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Matrix initializer has no length")]
    MissingLength,

    #[error("Matrix initializer element {index} is undefined")]
    MissingElement { index: usize },

    #[error("Matrix initializer has length {length}, expected 6 or 16")]
    InvalidLength { length: usize },

    #[error("Matrix initializer has length {length}, expected 6 or 16")]
    UnsupportedLength { length: String },

    #[error("Missing matrix operand")]
    MissingOperand,

    #[error("Matrix operand is not a matrix")]
    NotAMatrix,
}

/// The broad category of a [`MatrixError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required value was undefined (a `ReferenceError` on the web
    /// platform).
    MissingValue,
    /// A sequence had a length other than 6 or 16 (a `RangeError`).
    InvalidShape,
    /// An operand was defined but not a matrix (a `TypeError`).
    WrongType,
}

/// Returned when parsing a field name that does not name a matrix cell.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("Unknown matrix field `{name}`")]
pub struct UnknownCellError {
    pub name: String,
}

impl MatrixError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingLength | Self::MissingElement { .. } | Self::MissingOperand => {
                ErrorKind::MissingValue
            }
            Self::InvalidLength { .. } | Self::UnsupportedLength { .. } => {
                ErrorKind::InvalidShape
            }
            Self::NotAMatrix => ErrorKind::WrongType,
        }
    }
}
