//! Utility macros.

macro_rules! impl_binop {
    ($op:ident, $method:ident, $tl:ty, $tr:ty, $to:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl<'a> ::std::ops::$op<&'a $tr> for &'a $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl ::std::ops::$op<$tr> for &$tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                self.$method(&rhs)
            }
        }

        impl<'a> ::std::ops::$op<&'a $tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl ::std::ops::$op<$tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

macro_rules! impl_binop_assign {
    ($op:ident, $method:ident, $tl:ty, $tr:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl ::std::ops::$op<&$tr> for $tl {
            #[inline]
            fn $method(&mut self, rhs: &$tr) {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl ::std::ops::$op<$tr> for $tl {
            #[inline]
            fn $method(&mut self, rhs: $tr) {
                self.$method(&rhs);
            }
        }
    };
}

macro_rules! impl_abs_diff_eq {
    ($t:ty, |$arg1:ident, $arg2:ident, $arg3:ident| $body:block) => {
        impl ::approx::AbsDiffEq for $t {
            type Epsilon = f64;

            fn default_epsilon() -> Self::Epsilon {
                <f64 as ::approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                $body
            }
        }
    };
}

macro_rules! impl_relative_eq {
    ($t:ty, |$arg1:ident, $arg2:ident, $arg3:ident, $arg4:ident| $body:block) => {
        impl ::approx::RelativeEq for $t {
            fn default_max_relative() -> Self::Epsilon {
                <f64 as ::approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                let $arg4 = max_relative;
                $body
            }
        }
    };
}

/// Expands to one provided getter per listed cell inside a trait that has a
/// `get(&self, Cell) -> f64` method.
macro_rules! cell_getters {
    ($($name:ident => $cell:ident),* $(,)?) => {
        $(
            #[doc = concat!("The value of the `", stringify!($name), "` cell.")]
            #[inline]
            fn $name(&self) -> f64 {
                self.get(crate::cell::Cell::$cell)
            }
        )*
    };
}

/// Expands to one provided setter per listed cell inside a trait that has a
/// `set(&mut self, Cell, f64)` method.
macro_rules! cell_setters {
    ($($name:ident => $cell:ident),* $(,)?) => {
        $(
            #[doc = concat!("Writes the cell behind `", stringify!($name), "`.")]
            #[inline]
            fn $name(&mut self, value: f64) {
                self.set(crate::cell::Cell::$cell, value);
            }
        )*
    };
}

/// Implements the constructors, read access, string form and serialized
/// form shared by both matrix variants. The type must wrap a
/// `MatrixStorage` in a field named `storage`.
macro_rules! impl_matrix_variant {
    ($t:ident) => {
        impl $t {
            /// Creates the 2D identity matrix.
            pub const fn new() -> Self {
                Self::wrap(crate::storage::MatrixStorage::identity())
            }

            /// Creates a matrix from a loosely typed initializer.
            ///
            /// A matrix input is copied. A sequence of 6 elements `[a, b, c,
            /// d, e, f]` gives a 2D matrix, while a sequence of 16 elements
            /// gives a 3D matrix with the elements in column-major order.
            /// Non-numeric elements are coerced with
            /// [`Scalar::to_number`](crate::Scalar::to_number).
            ///
            /// # Errors
            /// See [`MatrixError`](crate::MatrixError). Nothing is
            /// constructed if any check fails.
            pub fn from_input(input: impl Into<crate::input::Input>) -> crate::error::Result<Self> {
                crate::storage::MatrixStorage::from_input(&input.into()).map(Self::wrap)
            }

            /// Creates a matrix from 6 or 16 values.
            ///
            /// # Errors
            /// Returns
            /// [`MatrixError::InvalidLength`](crate::MatrixError::InvalidLength)
            /// for any other number of values.
            pub fn from_values<T>(values: &[T]) -> crate::error::Result<Self>
            where
                T: Copy + Into<crate::scalar::Scalar>,
            {
                Self::from_input(values)
            }

            /// Creates a copy of the given matrix of either variant,
            /// including its 2D flag.
            pub fn from_matrix(matrix: &dyn crate::matrix::ReadableMatrix) -> Self {
                Self::wrap(crate::storage::MatrixStorage::from_cells(
                    *matrix.cells(),
                    matrix.is_2d(),
                ))
            }

            /// The column-major `f64` cells as raw bytes.
            pub fn as_bytes(&self) -> &[u8] {
                ::bytemuck::bytes_of(self.storage.cells())
            }

            pub(crate) const fn wrap(storage: crate::storage::MatrixStorage) -> Self {
                Self { storage }
            }
        }

        impl crate::matrix::ReadableMatrix for $t {
            #[inline]
            fn cells(&self) -> &[f64; 16] {
                self.storage.cells()
            }

            #[inline]
            fn is_2d(&self) -> bool {
                self.storage.is_2d()
            }

            #[inline]
            fn is_identity(&self) -> bool {
                self.storage.is_identity()
            }
        }

        impl ::std::fmt::Display for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.storage.fmt_css(f)
            }
        }

        #[cfg(feature = "serde")]
        impl From<crate::matrix::MatrixRecord> for $t {
            fn from(record: crate::matrix::MatrixRecord) -> Self {
                Self::wrap(crate::storage::MatrixStorage::from_cells(
                    record.cells,
                    record.is_2d,
                ))
            }
        }

        #[cfg(feature = "serde")]
        impl From<$t> for crate::matrix::MatrixRecord {
            fn from(matrix: $t) -> Self {
                Self {
                    is_2d: matrix.storage.is_2d(),
                    cells: *matrix.storage.cells(),
                }
            }
        }
    };
}
