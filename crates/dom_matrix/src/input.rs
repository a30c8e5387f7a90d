//! Matrix initializers and multiplication operands.

use crate::{
    matrix::{DomMatrix, DomMatrixReadOnly},
    scalar::Scalar,
};

/// A loosely typed value handed to a matrix constructor or to one of the
/// fallible multiplication methods.
///
/// Strongly typed callers rarely need this type directly, since
/// matrices, slices, vectors and arrays of numbers all convert into it.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// An existing matrix of either variant. Constructing from it copies
    /// all sixteen cells and the 2D flag.
    Matrix(DomMatrixReadOnly),
    /// An ordered sequence of elements. `None` marks an undefined element.
    Sequence(Vec<Option<Scalar>>),
    /// A defined value that is neither a matrix nor a sequence and hence
    /// has no length.
    Shapeless,
    /// A defined value whose length is not 6 or 16. Only the length is
    /// kept, written the way the caller gave it, so a decimal count is
    /// reported as such and anything else as an unsupported length.
    Unsized { length: String },
}

impl Input {
    /// Creates a sequence input where every element is defined.
    pub fn sequence<T>(values: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Scalar>,
    {
        Self::Sequence(values.into_iter().map(|value| Some(value.into())).collect())
    }

    /// The matrix held by this input, if it is one.
    pub fn as_matrix(&self) -> Option<&DomMatrixReadOnly> {
        match self {
            Self::Matrix(matrix) => Some(matrix),
            Self::Sequence(_) | Self::Shapeless | Self::Unsized { .. } => None,
        }
    }

    /// Interprets a JSON value the way a loosely typed caller would pass it.
    ///
    /// Arrays are sequences. Strings are sequences of their UTF-16 code
    /// units. Objects with a `length` key are array-likes: a length equal
    /// to 6 or 16 looks the elements up by their decimal index, so a
    /// missing index is an undefined element, and any other length value
    /// gives [`Input::Unsized`] without reading elements. Objects without
    /// `length`, numbers, booleans and `null` are shapeless. Nested arrays
    /// or objects used as elements coerce to NaN.
    #[cfg(feature = "json")]
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Array(elements) => Self::Sequence(
                elements
                    .iter()
                    .map(|element| Some(json_element(element)))
                    .collect(),
            ),
            Value::String(text) => Self::Sequence(
                text.encode_utf16()
                    .map(|unit| {
                        let element = String::from_utf16(&[unit])
                            .map_or(Scalar::Number(f64::NAN), Scalar::Text);
                        Some(element)
                    })
                    .collect(),
            ),
            Value::Object(fields) => {
                let Some(length) = fields.get("length") else {
                    return Self::Shapeless;
                };
                let Some(length) = json_length(length) else {
                    return Self::Unsized {
                        length: length.to_string(),
                    };
                };
                Self::Sequence(
                    (0..length)
                        .map(|index| fields.get(&index.to_string()).map(json_element))
                        .collect(),
                )
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => Self::Shapeless,
        }
    }
}

#[cfg(feature = "json")]
fn json_element(element: &serde_json::Value) -> Scalar {
    use serde_json::Value;

    match element {
        Value::Null => Scalar::Null,
        Value::Bool(value) => Scalar::Bool(*value),
        Value::Number(number) => Scalar::Number(number.as_f64().unwrap_or(f64::NAN)),
        Value::String(text) => Scalar::Text(text.clone()),
        Value::Array(_) | Value::Object(_) => Scalar::Number(f64::NAN),
    }
}

/// The length of a JSON array-like if it is exactly 6 or 16.
#[cfg(feature = "json")]
fn json_length(length: &serde_json::Value) -> Option<usize> {
    let length = length.as_f64()?;
    if length == 6.0 {
        Some(6)
    } else if length == 16.0 {
        Some(16)
    } else {
        None
    }
}

impl From<DomMatrixReadOnly> for Input {
    fn from(matrix: DomMatrixReadOnly) -> Self {
        Self::Matrix(matrix)
    }
}

impl From<&DomMatrixReadOnly> for Input {
    fn from(matrix: &DomMatrixReadOnly) -> Self {
        Self::Matrix(*matrix)
    }
}

impl From<DomMatrix> for Input {
    fn from(matrix: DomMatrix) -> Self {
        Self::Matrix(matrix.into())
    }
}

impl From<&DomMatrix> for Input {
    fn from(matrix: &DomMatrix) -> Self {
        Self::Matrix((*matrix).into())
    }
}

impl<T> From<&[T]> for Input
where
    T: Copy + Into<Scalar>,
{
    fn from(values: &[T]) -> Self {
        Self::sequence(values.iter().copied())
    }
}

impl<T, const N: usize> From<[T; N]> for Input
where
    T: Into<Scalar>,
{
    fn from(values: [T; N]) -> Self {
        Self::sequence(values)
    }
}

impl<T> From<Vec<T>> for Input
where
    T: Into<Scalar>,
{
    fn from(values: Vec<T>) -> Self {
        Self::sequence(values)
    }
}
