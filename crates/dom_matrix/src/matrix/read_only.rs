//! Read-only matrices.

use super::DomMatrix;
use crate::storage::MatrixStorage;

/// A 4x4 homogeneous transform matrix that cannot be modified after
/// construction.
///
/// Operations that produce a new matrix, such as
/// [`multiply`](crate::ReadableMatrix::multiply) and
/// [`flip_x`](crate::ReadableMatrix::flip_x), return a mutable [`DomMatrix`].
///
/// There is no write path, so the following does not compile:
///
/// ```compile_fail
/// use dom_matrix::{DomMatrixReadOnly, WritableMatrix};
///
/// let mut matrix = DomMatrixReadOnly::new();
/// matrix.set_m11(2.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "super::MatrixRecord", into = "super::MatrixRecord")
)]
pub struct DomMatrixReadOnly {
    pub(crate) storage: MatrixStorage,
}

impl_matrix_variant!(DomMatrixReadOnly);

impl From<DomMatrix> for DomMatrixReadOnly {
    fn from(matrix: DomMatrix) -> Self {
        Self::wrap(matrix.storage)
    }
}

impl From<&DomMatrix> for DomMatrixReadOnly {
    fn from(matrix: &DomMatrix) -> Self {
        Self::wrap(matrix.storage)
    }
}
