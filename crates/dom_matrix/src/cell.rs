//! Named addressing of matrix cells.

use crate::error::UnknownCellError;
use std::{fmt, str::FromStr};

/// One of the sixteen cells of a 4x4 matrix.
///
/// Cell `Mij` sits in column `i` and row `j`, which puts it at index
/// `(i - 1) * 4 + (j - 1)` of the column-major buffer. The six 2D affine
/// aliases `a` to `f` are available as associated constants.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    M11 = 0,
    M12 = 1,
    M13 = 2,
    M14 = 3,
    M21 = 4,
    M22 = 5,
    M23 = 6,
    M24 = 7,
    M31 = 8,
    M32 = 9,
    M33 = 10,
    M34 = 11,
    M41 = 12,
    M42 = 13,
    M43 = 14,
    M44 = 15,
}

impl Cell {
    pub const A: Self = Self::M11;
    pub const B: Self = Self::M12;
    pub const C: Self = Self::M21;
    pub const D: Self = Self::M22;
    pub const E: Self = Self::M41;
    pub const F: Self = Self::M42;

    /// All cells in column-major order.
    pub const ALL: [Self; 16] = [
        Self::M11,
        Self::M12,
        Self::M13,
        Self::M14,
        Self::M21,
        Self::M22,
        Self::M23,
        Self::M24,
        Self::M31,
        Self::M32,
        Self::M33,
        Self::M34,
        Self::M41,
        Self::M42,
        Self::M43,
        Self::M44,
    ];

    /// The cells of the 2D affine subset, in `a, b, c, d, e, f` order.
    pub const AFFINE_2D: [Self; 6] = [Self::A, Self::B, Self::C, Self::D, Self::E, Self::F];

    /// The position of the cell in the column-major buffer.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The cell at the given column-major index, if there is one.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The one-based column of the cell.
    #[inline]
    pub const fn column(self) -> usize {
        self.index() / 4 + 1
    }

    /// The one-based row of the cell.
    #[inline]
    pub const fn row(self) -> usize {
        self.index() % 4 + 1
    }

    /// Whether the cell lies on the main diagonal.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.index() % 5 == 0
    }

    /// The value the cell holds in the identity matrix.
    #[inline]
    pub const fn identity_value(self) -> f64 {
        if self.is_diagonal() { 1.0 } else { 0.0 }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}{}", self.column(), self.row())
    }
}

impl FromStr for Cell {
    type Err = UnknownCellError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lower = name.trim().to_ascii_lowercase();

        let cell = match lower.as_str() {
            "a" => Some(Self::A),
            "b" => Some(Self::B),
            "c" => Some(Self::C),
            "d" => Some(Self::D),
            "e" => Some(Self::E),
            "f" => Some(Self::F),
            numbered => match numbered.as_bytes() {
                [b'm', column @ b'1'..=b'4', row @ b'1'..=b'4'] => {
                    Self::from_index(usize::from(column - b'1') * 4 + usize::from(row - b'1'))
                }
                _ => None,
            },
        };

        cell.ok_or_else(|| UnknownCellError {
            name: name.to_string(),
        })
    }
}
