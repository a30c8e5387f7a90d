//! Matrices.

mod mutable;
mod read_only;

pub use mutable::DomMatrix;
pub use read_only::DomMatrixReadOnly;

use crate::{
    cell::Cell,
    error::{MatrixError, Result},
    input::Input,
    scalar::Scalar,
    storage::{self, MatrixStorage},
};
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;

/// Read access to a 4x4 homogeneous transform matrix.
///
/// The cells are stored in column-major order, so cell `Mij` (column `i`,
/// row `j`) is at index `(i - 1) * 4 + (j - 1)` of [`cells`](Self::cells).
/// The `Display` implementation gives the CSS transform function form,
/// `matrix(a, b, c, d, e, f)` for 2D matrices and `matrix3d(...)` with all
/// sixteen cells otherwise.
pub trait ReadableMatrix: fmt::Display {
    /// The sixteen cells in column-major order.
    fn cells(&self) -> &[f64; 16];

    /// Whether the matrix was created as a 2D matrix. This is decided at
    /// construction and not re-evaluated when cells change.
    fn is_2d(&self) -> bool;

    /// Whether every diagonal cell is exactly 1 and every other cell is
    /// exactly 0.
    fn is_identity(&self) -> bool;

    /// The value of the given cell.
    #[inline]
    fn get(&self, cell: Cell) -> f64 {
        self.cells()[cell.index()]
    }

    cell_getters! {
        m11 => M11, m12 => M12, m13 => M13, m14 => M14,
        m21 => M21, m22 => M22, m23 => M23, m24 => M24,
        m31 => M31, m32 => M32, m33 => M33, m34 => M34,
        m41 => M41, m42 => M42, m43 => M43, m44 => M44,
        a => A, b => B, c => C, d => D, e => E, f => F,
    }

    /// Returns a mutable copy of this matrix with the first column negated.
    fn flip_x(&self) -> DomMatrix {
        let storage = MatrixStorage::from_cells(*self.cells(), self.is_2d());
        DomMatrix::wrap(storage.with_negated_column(0))
    }

    /// Returns a mutable copy of this matrix with the second column negated.
    fn flip_y(&self) -> DomMatrix {
        let storage = MatrixStorage::from_cells(*self.cells(), self.is_2d());
        DomMatrix::wrap(storage.with_negated_column(1))
    }

    /// Computes `self * other` as a new mutable matrix carrying the 2D flag
    /// of `self`. Neither operand is modified.
    fn multiply(&self, other: &dyn ReadableMatrix) -> DomMatrix {
        DomMatrix::wrap(MatrixStorage::product(
            self.cells(),
            other.cells(),
            self.is_2d(),
        ))
    }

    /// Like [`multiply`](Self::multiply), but for an operand that may be
    /// missing or may not be a matrix.
    ///
    /// # Errors
    /// Returns [`MatrixError::MissingOperand`] if `other` is `None` and
    /// [`MatrixError::NotAMatrix`] if it is not a matrix input.
    fn try_multiply(&self, other: Option<&Input>) -> Result<DomMatrix> {
        let other = operand_matrix(other)?;
        Ok(self.multiply(other))
    }

    /// The cells in column-major order, narrowed to `f32`.
    fn to_float32_array(&self) -> [f32; 16] {
        self.cells().map(|value| value as f32)
    }

    /// A copy of the cells in column-major order.
    fn to_float64_array(&self) -> [f64; 16] {
        *self.cells()
    }
}

/// Read and write access to a 4x4 homogeneous transform matrix.
///
/// Every write re-evaluates [`is_identity`](ReadableMatrix::is_identity)
/// immediately. The 2D flag is never changed by writes.
pub trait WritableMatrix: ReadableMatrix {
    /// Writes the given cell.
    fn set(&mut self, cell: Cell, value: f64);

    /// Replaces all sixteen cells, given in column-major order.
    fn set_cells(&mut self, cells: [f64; 16]);

    cell_setters! {
        set_m11 => M11, set_m12 => M12, set_m13 => M13, set_m14 => M14,
        set_m21 => M21, set_m22 => M22, set_m23 => M23, set_m24 => M24,
        set_m31 => M31, set_m32 => M32, set_m33 => M33, set_m34 => M34,
        set_m41 => M41, set_m42 => M42, set_m43 => M43, set_m44 => M44,
        set_a => A, set_b => B, set_c => C, set_d => D, set_e => E, set_f => F,
    }

    /// Writes a loosely typed value to the given cell, coercing it to a
    /// number first.
    fn assign(&mut self, cell: Cell, value: &Scalar) {
        self.set(cell, value.to_number());
    }

    /// Replaces this matrix with `self * other` and returns it for
    /// chaining. `other` is not modified.
    fn multiply_self(&mut self, other: &dyn ReadableMatrix) -> &mut Self
    where
        Self: Sized,
    {
        let (product, _) = storage::multiply_cells(self.cells(), other.cells());
        self.set_cells(product);
        self
    }

    /// Like [`multiply_self`](Self::multiply_self), but for an operand
    /// that may be missing or may not be a matrix. On error the receiver
    /// is left unchanged.
    ///
    /// # Errors
    /// Returns [`MatrixError::MissingOperand`] if `other` is `None` and
    /// [`MatrixError::NotAMatrix`] if it is not a matrix input.
    fn try_multiply_self(&mut self, other: Option<&Input>) -> Result<&mut Self>
    where
        Self: Sized,
    {
        let other = operand_matrix(other)?;
        Ok(self.multiply_self(other))
    }
}

/// The serialized form of both matrix variants.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatrixRecord {
    pub is_2d: bool,
    /// Column-major cells.
    pub cells: [f64; 16],
}

fn operand_matrix(other: Option<&Input>) -> Result<&DomMatrixReadOnly> {
    other
        .ok_or(MatrixError::MissingOperand)
        .and_then(|other| other.as_matrix().ok_or(MatrixError::NotAMatrix))
        .inspect_err(|err| log::debug!("Rejected matrix operand: {err}"))
}

impl_binop!(
    Mul,
    mul,
    DomMatrixReadOnly,
    DomMatrixReadOnly,
    DomMatrix,
    |a, b| { a.multiply(b) }
);

impl_binop!(
    Mul,
    mul,
    DomMatrixReadOnly,
    DomMatrix,
    DomMatrix,
    |a, b| { a.multiply(b) }
);

impl_binop!(
    Mul,
    mul,
    DomMatrix,
    DomMatrixReadOnly,
    DomMatrix,
    |a, b| { a.multiply(b) }
);

impl_binop!(Mul, mul, DomMatrix, DomMatrix, DomMatrix, |a, b| {
    a.multiply(b)
});

impl_binop_assign!(MulAssign, mul_assign, DomMatrix, DomMatrix, |a, b| {
    a.multiply_self(b);
});

impl_binop_assign!(MulAssign, mul_assign, DomMatrix, DomMatrixReadOnly, |a, b| {
    a.multiply_self(b);
});

impl_abs_diff_eq!(DomMatrixReadOnly, |a, b, epsilon| {
    a.storage.cells()[..].abs_diff_eq(&b.storage.cells()[..], epsilon)
});

impl_relative_eq!(DomMatrixReadOnly, |a, b, epsilon, max_relative| {
    a.storage.cells()[..].relative_eq(&b.storage.cells()[..], epsilon, max_relative)
});

impl_abs_diff_eq!(DomMatrix, |a, b, epsilon| {
    a.storage.cells()[..].abs_diff_eq(&b.storage.cells()[..], epsilon)
});

impl_relative_eq!(DomMatrix, |a, b, epsilon, max_relative| {
    a.storage.cells()[..].relative_eq(&b.storage.cells()[..], epsilon, max_relative)
});

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn counting() -> Vec<f64> {
        (1..=16).map(f64::from).collect()
    }

    prop_compose! {
        fn cells_strategy()(
            cells in prop::array::uniform16(prop_oneof![
                3 => Just(0.0),
                3 => Just(1.0),
                4 => -10.0..10.0,
            ])
        ) -> [f64; 16] {
            cells
        }
    }

    fn cell_strategy() -> impl Strategy<Value = Cell> {
        (0..16_usize).prop_map(|index| Cell::ALL[index])
    }

    fn expected_identity(matrix: &dyn ReadableMatrix) -> bool {
        Cell::ALL
            .into_iter()
            .all(|cell| matrix.get(cell) == cell.identity_value())
    }

    fn assert_aliases_match(matrix: &dyn ReadableMatrix) {
        assert_eq!(matrix.a().to_bits(), matrix.m11().to_bits());
        assert_eq!(matrix.b().to_bits(), matrix.m12().to_bits());
        assert_eq!(matrix.c().to_bits(), matrix.m21().to_bits());
        assert_eq!(matrix.d().to_bits(), matrix.m22().to_bits());
        assert_eq!(matrix.e().to_bits(), matrix.m41().to_bits());
        assert_eq!(matrix.f().to_bits(), matrix.m42().to_bits());
    }

    #[test]
    fn numbered_getters_read_their_cells() {
        let matrix = DomMatrixReadOnly::from_values(&counting()).unwrap();
        let getters = [
            matrix.m11(),
            matrix.m12(),
            matrix.m13(),
            matrix.m14(),
            matrix.m21(),
            matrix.m22(),
            matrix.m23(),
            matrix.m24(),
            matrix.m31(),
            matrix.m32(),
            matrix.m33(),
            matrix.m34(),
            matrix.m41(),
            matrix.m42(),
            matrix.m43(),
            matrix.m44(),
        ];
        assert_eq!(getters.to_vec(), counting());
    }

    #[test]
    fn alias_getters_read_the_affine_cells() {
        let matrix = DomMatrixReadOnly::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(
            [matrix.a(), matrix.b(), matrix.c(), matrix.d(), matrix.e(), matrix.f()],
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
        assert_aliases_match(&matrix);
    }

    #[test]
    fn alias_setters_write_the_numbered_cells() {
        let mut matrix = DomMatrix::new();
        matrix.set_a(2.0);
        matrix.set_b(3.0);
        matrix.set_c(4.0);
        matrix.set_d(5.0);
        matrix.set_e(6.0);
        matrix.set_f(7.0);

        assert_eq!(matrix.m11(), 2.0);
        assert_eq!(matrix.m12(), 3.0);
        assert_eq!(matrix.m21(), 4.0);
        assert_eq!(matrix.m22(), 5.0);
        assert_eq!(matrix.m41(), 6.0);
        assert_eq!(matrix.m42(), 7.0);

        matrix.set_m11(1.0);
        matrix.set_m12(0.0);
        matrix.set_m21(0.0);
        matrix.set_m22(1.0);
        matrix.set_m41(0.0);
        matrix.set_m42(0.0);

        assert_eq!(matrix.a(), 1.0);
        assert_eq!(matrix.b(), 0.0);
        assert_eq!(matrix.c(), 0.0);
        assert_eq!(matrix.d(), 1.0);
        assert_eq!(matrix.e(), 0.0);
        assert_eq!(matrix.f(), 0.0);
        assert!(matrix.is_identity());
    }

    #[test]
    fn every_numbered_setter_writes_its_own_cell() {
        let mut matrix = DomMatrix::new();
        let setters: [fn(&mut DomMatrix, f64); 16] = [
            DomMatrix::set_m11,
            DomMatrix::set_m12,
            DomMatrix::set_m13,
            DomMatrix::set_m14,
            DomMatrix::set_m21,
            DomMatrix::set_m22,
            DomMatrix::set_m23,
            DomMatrix::set_m24,
            DomMatrix::set_m31,
            DomMatrix::set_m32,
            DomMatrix::set_m33,
            DomMatrix::set_m34,
            DomMatrix::set_m41,
            DomMatrix::set_m42,
            DomMatrix::set_m43,
            DomMatrix::set_m44,
        ];
        for (setter, value) in setters.into_iter().zip(counting()) {
            setter(&mut matrix, value);
        }
        assert_eq!(matrix.to_float64_array().to_vec(), counting());
    }

    #[test]
    fn assigning_coerces_loosely_typed_values_for_every_cell() {
        let mut matrix = DomMatrix::new();
        matrix.assign(Cell::A, &Scalar::from("3"));
        matrix.assign(Cell::M23, &Scalar::Bool(true));
        matrix.assign(Cell::M44, &Scalar::Null);
        matrix.assign(Cell::E, &Scalar::from("x"));

        assert_eq!(matrix.a(), 3.0);
        assert_eq!(matrix.m23(), 1.0);
        assert_eq!(matrix.m44(), 0.0);
        assert!(matrix.e().is_nan());
    }

    #[test]
    fn flipping_x_negates_first_column() {
        let matrix = DomMatrixReadOnly::from_values(&counting()).unwrap();
        let expected = DomMatrix::from_values(&[
            -1.0, -2.0, -3.0, -4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
            16.0,
        ])
        .unwrap();
        assert_eq!(matrix.flip_x(), expected);
        assert_eq!(matrix.to_float64_array().to_vec(), counting());
    }

    #[test]
    fn flipping_y_negates_second_column() {
        let matrix = DomMatrixReadOnly::from_values(&counting()).unwrap();
        let expected = DomMatrix::from_values(&[
            1.0, 2.0, 3.0, 4.0, -5.0, -6.0, -7.0, -8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
            16.0,
        ])
        .unwrap();
        assert_eq!(matrix.flip_y(), expected);
    }

    #[test]
    fn flipping_keeps_2d_flag_and_refreshes_identity() {
        let identity = DomMatrixReadOnly::new();
        let flipped = identity.flip_x();
        assert!(flipped.is_2d());
        assert!(!flipped.is_identity());
        assert!(flipped.flip_x().is_identity());
    }

    #[test]
    fn multiplying_counting_matrix_by_itself_gives_known_product() {
        let a = DomMatrixReadOnly::from_values(&counting()).unwrap();
        let b = DomMatrixReadOnly::from_values(&counting()).unwrap();
        let expected = DomMatrix::from_values(&[
            90.0, 100.0, 110.0, 120.0, 202.0, 228.0, 254.0, 280.0, 314.0, 356.0, 398.0, 440.0,
            426.0, 484.0, 542.0, 600.0,
        ])
        .unwrap();

        assert_eq!(a.multiply(&b), expected);
        assert_eq!(&a * &b, expected);
        assert_eq!(a.to_float64_array().to_vec(), counting());
        assert_eq!(b.to_float64_array().to_vec(), counting());
    }

    #[test]
    fn multiplying_self_mutates_and_returns_receiver() {
        let mut a = DomMatrix::from_values(&counting()).unwrap();
        let b = DomMatrix::from_values(&counting()).unwrap();
        let expected = DomMatrix::from_values(&[
            90.0, 100.0, 110.0, 120.0, 202.0, 228.0, 254.0, 280.0, 314.0, 356.0, 398.0, 440.0,
            426.0, 484.0, 542.0, 600.0,
        ])
        .unwrap();

        let receiver: *const DomMatrix = &a;
        let returned: *const DomMatrix = a.multiply_self(&b);
        assert_eq!(receiver, returned);
        assert_eq!(a, expected);
        assert_eq!(b.to_float64_array().to_vec(), counting());
    }

    #[test]
    fn multiplying_self_can_be_chained() {
        let mut translation = DomMatrix::new();
        translation.set_e(2.0);
        let mut inverse = DomMatrix::new();
        inverse.set_e(-2.0);

        let mut matrix = DomMatrix::new();
        matrix.multiply_self(&translation).multiply_self(&inverse);
        assert!(matrix.is_identity());

        matrix *= translation;
        assert_eq!(matrix.e(), 2.0);
        assert!(!matrix.is_identity());
    }

    #[test]
    fn product_of_a_matrix_and_its_inverse_is_identity() {
        let mut scale = DomMatrix::new();
        scale.set_a(2.0);
        scale.set_d(4.0);
        let mut inverse = DomMatrix::new();
        inverse.set_a(0.5);
        inverse.set_d(0.25);

        assert!(scale.multiply(&inverse).is_identity());
    }

    #[test]
    fn fallible_multiply_rejects_missing_and_non_matrix_operands() {
        let matrix = DomMatrixReadOnly::new();
        assert_eq!(matrix.try_multiply(None), Err(MatrixError::MissingOperand));
        assert_eq!(
            matrix.try_multiply(Some(&Input::from([1.0; 16]))),
            Err(MatrixError::NotAMatrix)
        );
        assert_eq!(
            matrix.try_multiply(Some(&Input::Shapeless)),
            Err(MatrixError::NotAMatrix)
        );
        assert_eq!(
            matrix.try_multiply(Some(&Input::Unsized {
                length: "3".to_string()
            })),
            Err(MatrixError::NotAMatrix)
        );

        let other = DomMatrix::from_values(&counting()).unwrap();
        assert_eq!(
            matrix
                .try_multiply(Some(&Input::from(&other)))
                .map(|product| product.to_float64_array()),
            Ok(other.to_float64_array())
        );
    }

    #[test]
    fn failed_multiply_self_leaves_receiver_unchanged() {
        let mut matrix = DomMatrix::from_values(&counting()).unwrap();
        let before = matrix;

        assert_eq!(
            matrix.try_multiply_self(None).map(|m| *m),
            Err(MatrixError::MissingOperand)
        );
        assert_eq!(
            matrix
                .try_multiply_self(Some(&Input::from(vec![2.0; 6])))
                .map(|m| *m),
            Err(MatrixError::NotAMatrix)
        );
        assert_eq!(matrix, before);
    }

    #[test]
    fn float_arrays_are_independent_copies() {
        let matrix = DomMatrix::from_values(&counting()).unwrap();

        let mut doubles = matrix.to_float64_array();
        doubles[0] = 100.0;
        let mut floats = matrix.to_float32_array();
        floats[0] = 100.0;

        assert_eq!(matrix.m11(), 1.0);
        assert_eq!(
            matrix.to_float32_array(),
            [
                1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0,
                15.0, 16.0,
            ]
        );
    }

    #[test]
    fn matrices_are_usable_through_trait_objects() {
        let read_only = DomMatrixReadOnly::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let mutable = DomMatrix::from_values(&counting()).unwrap();
        let matrices: [&dyn ReadableMatrix; 2] = [&read_only, &mutable];

        let strings: Vec<_> = matrices.iter().map(ToString::to_string).collect();
        assert_eq!(strings[0], "matrix(1, 2, 3, 4, 5, 6)");
        assert_eq!(
            strings[1],
            "matrix3d(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16)"
        );

        let mut boxed: Box<dyn WritableMatrix> = Box::new(DomMatrix::new());
        boxed.set(Cell::M33, 5.0);
        assert_eq!(boxed.m33(), 5.0);
        assert!(!boxed.is_identity());
    }

    #[test]
    fn approximate_equality_compares_cells() {
        let a = DomMatrixReadOnly::from_values(&[1.0, 0.0, 0.0, 1.0, 0.5, 0.0]).unwrap();
        let mut b = DomMatrix::from_matrix(&a);
        b.set_e(0.5 + 1e-12);
        assert_abs_diff_eq!(DomMatrixReadOnly::from(b), a, epsilon = 1e-9);
        approx::assert_relative_eq!(b, DomMatrix::from(a), max_relative = 1e-9);
    }

    proptest! {
        #[test]
        fn identity_flag_matches_cells_after_any_writes(
            initial in cells_strategy(),
            writes in prop::collection::vec((cell_strategy(), prop_oneof![Just(0.0), Just(1.0), -2.0..2.0]), 0..24),
        ) {
            let mut matrix = DomMatrix::from_values(&initial).unwrap();
            prop_assert_eq!(matrix.is_identity(), expected_identity(&matrix));

            for (cell, value) in writes {
                matrix.set(cell, value);
                prop_assert_eq!(matrix.is_identity(), expected_identity(&matrix));
                assert_aliases_match(&matrix);
            }
        }

        #[test]
        fn read_only_identity_flag_matches_cells(initial in cells_strategy()) {
            let matrix = DomMatrixReadOnly::from_values(&initial).unwrap();
            prop_assert_eq!(matrix.is_identity(), expected_identity(&matrix));
        }

        #[test]
        fn multiply_leaves_both_operands_unchanged(
            left in cells_strategy(),
            right in cells_strategy(),
        ) {
            let a = DomMatrix::from_values(&left).unwrap();
            let b = DomMatrixReadOnly::from_values(&right).unwrap();
            let product = a.multiply(&b);

            prop_assert_eq!(a.to_float64_array(), left);
            prop_assert_eq!(b.to_float64_array(), right);
            prop_assert_eq!(product.is_identity(), expected_identity(&product));
        }

        #[test]
        fn multiply_self_matches_multiply(
            left in cells_strategy(),
            right in cells_strategy(),
        ) {
            let mut a = DomMatrix::from_values(&left).unwrap();
            let b = DomMatrix::from_values(&right).unwrap();
            let product = a.multiply(&b);

            a.multiply_self(&b);

            prop_assert_eq!(a.to_float64_array(), product.to_float64_array());
            prop_assert_eq!(a.is_identity(), product.is_identity());
            prop_assert_eq!(b.to_float64_array(), right);
        }

        #[test]
        fn rebuilding_from_float64_array_gives_equal_matrix(initial in cells_strategy()) {
            let matrix = DomMatrixReadOnly::from_values(&initial).unwrap();
            let rebuilt = DomMatrixReadOnly::from_values(&matrix.to_float64_array()).unwrap();
            prop_assert_eq!(rebuilt, matrix);
        }
    }
}
