//! 4x4 homogeneous transform matrices following the web platform's
//! `DOMMatrix` model.

#[macro_use]
mod macros;

pub mod cell;
pub mod error;
pub mod input;
pub mod matrix;
pub mod scalar;

mod storage;

pub use cell::Cell;
pub use error::{ErrorKind, MatrixError, Result};
pub use input::Input;
pub use matrix::{DomMatrix, DomMatrixReadOnly, ReadableMatrix, WritableMatrix};
pub use scalar::Scalar;

#[cfg(feature = "serde")]
pub use matrix::MatrixRecord;
