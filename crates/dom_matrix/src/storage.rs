//! Cell storage shared by the read-only and mutable matrix variants.

use crate::{
    cell::Cell,
    error::{MatrixError, Result},
    input::Input,
};
use std::fmt;

/// Column-major cells of the identity matrix.
pub(crate) const IDENTITY_CELLS: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// The sixteen cells of a matrix together with its two flags.
///
/// Every matrix owns exactly one of these, so copying a matrix copies its
/// storage and no two matrices ever share cells. The identity flag always
/// agrees with the cells; every write path goes through a method that
/// refreshes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MatrixStorage {
    cells: [f64; 16],
    is_2d: bool,
    is_identity: bool,
}

impl MatrixStorage {
    /// Creates storage for the identity matrix, flagged as 2D.
    pub(crate) const fn identity() -> Self {
        Self {
            cells: IDENTITY_CELLS,
            is_2d: true,
            is_identity: true,
        }
    }

    /// Creates storage for the given cells, computing the identity flag.
    pub(crate) fn from_cells(cells: [f64; 16], is_2d: bool) -> Self {
        Self {
            cells,
            is_2d,
            is_identity: is_identity(&cells),
        }
    }

    /// Validates the given initializer and builds storage from it.
    ///
    /// All elements are checked and coerced before any cell is populated.
    /// A 6-element sequence fills the 2D affine cells and leaves the rest
    /// at their identity values, while a 16-element sequence fills every
    /// cell in column-major order and clears the 2D flag.
    pub(crate) fn from_input(input: &Input) -> Result<Self> {
        let elements = match input {
            Input::Matrix(matrix) => return Ok(matrix.storage),
            Input::Sequence(elements) => elements,
            Input::Shapeless => return Err(rejected(MatrixError::MissingLength)),
            Input::Unsized { length } => return Err(rejected(unsized_error(length))),
        };

        let length = elements.len();
        if length != 6 && length != 16 {
            return Err(rejected(MatrixError::InvalidLength { length }));
        }

        let mut values = [0.0; 16];
        for (index, element) in elements.iter().enumerate() {
            let Some(element) = element else {
                return Err(rejected(MatrixError::MissingElement { index }));
            };
            values[index] = element.to_number();
        }

        if length == 6 {
            let mut cells = IDENTITY_CELLS;
            for (cell, value) in Cell::AFFINE_2D.into_iter().zip(values) {
                cells[cell.index()] = value;
            }
            Ok(Self::from_cells(cells, true))
        } else {
            Ok(Self::from_cells(values, false))
        }
    }

    #[inline]
    pub(crate) const fn cells(&self) -> &[f64; 16] {
        &self.cells
    }

    #[inline]
    pub(crate) const fn is_2d(&self) -> bool {
        self.is_2d
    }

    #[inline]
    pub(crate) const fn is_identity(&self) -> bool {
        self.is_identity
    }

    /// Writes a single cell and re-evaluates the identity flag.
    pub(crate) fn set(&mut self, cell: Cell, value: f64) {
        self.cells[cell.index()] = value;
        self.is_identity = is_identity(&self.cells);
    }

    /// Replaces all cells and re-evaluates the identity flag. The 2D flag
    /// is left untouched.
    pub(crate) fn set_cells(&mut self, cells: [f64; 16]) {
        self.cells = cells;
        self.is_identity = is_identity(&self.cells);
    }

    /// Returns a copy with every cell of the given zero-based column
    /// negated.
    pub(crate) fn with_negated_column(&self, column: usize) -> Self {
        let mut cells = self.cells;
        for value in &mut cells[column * 4..column * 4 + 4] {
            *value = -*value;
        }
        Self::from_cells(cells, self.is_2d)
    }

    /// Computes `left * right` into new storage with the given 2D flag. The
    /// identity flag is accumulated while the cells are produced.
    pub(crate) fn product(left: &[f64; 16], right: &[f64; 16], is_2d: bool) -> Self {
        let (cells, is_identity) = multiply_cells(left, right);
        Self {
            cells,
            is_2d,
            is_identity,
        }
    }

    /// Writes the CSS transform function form of the matrix: `matrix(...)`
    /// with the six affine cells when 2D, `matrix3d(...)` with all sixteen
    /// cells otherwise.
    pub(crate) fn fmt_css(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_2d {
            f.write_str("matrix(")?;
            write_number_list(f, Cell::AFFINE_2D.map(|cell| self.cells[cell.index()]))?;
        } else {
            f.write_str("matrix3d(")?;
            write_number_list(f, self.cells)?;
        }
        f.write_str(")")
    }
}

impl Default for MatrixStorage {
    fn default() -> Self {
        Self::identity()
    }
}

/// Whether the given cells are exactly those of the identity matrix.
pub(crate) fn is_identity(cells: &[f64; 16]) -> bool {
    cells
        .iter()
        .zip(IDENTITY_CELLS)
        .all(|(&value, expected)| value == expected)
}

/// Multiplies two column-major 4x4 matrices, returning the product and
/// whether it is the identity.
///
/// The output cell in column `j` and row `i` is the dot product of row `i`
/// of `left` with column `j` of `right`, summed in increasing `k`.
pub(crate) fn multiply_cells(left: &[f64; 16], right: &[f64; 16]) -> ([f64; 16], bool) {
    let mut result = [0.0; 16];
    let mut is_identity = true;

    for i in 0..4 {
        for j in 0..4 {
            let mut sum = 0.0;
            for k in 0..4 {
                sum += left[k * 4 + i] * right[j * 4 + k];
            }

            let index = j * 4 + i;
            result[index] = sum;
            is_identity &= sum == IDENTITY_CELLS[index];
        }
    }

    log::trace!("Multiplied matrices (identity product: {is_identity})");

    (result, is_identity)
}

fn unsized_error(length: &str) -> MatrixError {
    match length.parse() {
        Ok(length) => MatrixError::InvalidLength { length },
        Err(_) => MatrixError::UnsupportedLength {
            length: length.to_string(),
        },
    }
}

fn rejected(err: MatrixError) -> MatrixError {
    log::debug!("Rejected matrix initializer: {err}");
    err
}

fn write_number_list<const N: usize>(f: &mut fmt::Formatter<'_>, values: [f64; N]) -> fmt::Result {
    for (index, value) in values.into_iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write_number(f, value)?;
    }
    Ok(())
}

/// Writes a number the way the web platform converts numbers to strings.
///
/// Rust already prints the shortest round-tripping digits and omits the
/// fraction of integral values. The differences that remain are the
/// spelling of infinities, the sign of negative zero and the switch to
/// exponent notation outside `[1e-6, 1e21)`.
pub(crate) fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return f.write_str("0");
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{mantissa}e+{exponent}")
            }
            _ => f.write_str(&formatted),
        };
    }

    write!(f, "{value}")
}
