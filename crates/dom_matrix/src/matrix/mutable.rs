//! Mutable matrices.

use super::{DomMatrixReadOnly, WritableMatrix};
use crate::{cell::Cell, storage::MatrixStorage};

/// A 4x4 homogeneous transform matrix whose cells can be written.
///
/// Writes never change [`is_2d`](crate::ReadableMatrix::is_2d), while
/// [`is_identity`](crate::ReadableMatrix::is_identity) always reflects the
/// current cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "super::MatrixRecord", into = "super::MatrixRecord")
)]
pub struct DomMatrix {
    pub(crate) storage: MatrixStorage,
}

impl_matrix_variant!(DomMatrix);

impl WritableMatrix for DomMatrix {
    #[inline]
    fn set(&mut self, cell: Cell, value: f64) {
        self.storage.set(cell, value);
    }

    fn set_cells(&mut self, cells: [f64; 16]) {
        self.storage.set_cells(cells);
    }
}

impl From<DomMatrixReadOnly> for DomMatrix {
    fn from(matrix: DomMatrixReadOnly) -> Self {
        Self::wrap(matrix.storage)
    }
}

impl From<&DomMatrixReadOnly> for DomMatrix {
    fn from(matrix: &DomMatrixReadOnly) -> Self {
        Self::wrap(matrix.storage)
    }
}
