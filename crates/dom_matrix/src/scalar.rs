//! Loosely typed matrix elements and their numeric coercion.

use num_traits::ToPrimitive;

/// A single matrix element as supplied by a loosely typed caller.
///
/// Anything that is not already a number is coerced with
/// [`Scalar::to_number`] rather than rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Converts the element to a number using the web platform's default
    /// numeric conversion.
    ///
    /// Text is trimmed first; empty text is `0`, `Infinity` may carry a
    /// sign, `0x`/`0o`/`0b` prefixes select a radix, and anything that is
    /// not a valid literal becomes `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(value) => f64::from(u8::from(*value)),
            Self::Number(value) => *value,
            Self::Text(text) => parse_number(text),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(value: $t) -> Self {
                    Self::Number(value.to_f64().unwrap_or(f64::NAN))
                }
            }
        )*
    };
}

impl_from_primitive!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<T> From<Option<T>> for Scalar
where
    T: Into<Scalar>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

fn parse_number(text: &str) -> f64 {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');

    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix_literal = text.get(..2).and_then(|prefix| {
        let radix = match prefix {
            "0x" | "0X" => 16,
            "0o" | "0O" => 8,
            "0b" | "0B" => 2,
            _ => return None,
        };
        Some((radix, &text[2..]))
    });

    if let Some((radix, digits)) = radix_literal {
        return parse_radix_digits(digits, radix);
    }

    // `f64::from_str` also accepts spellings such as `inf` and `nan`, which
    // must coerce to NaN here
    let is_decimal_literal = text
        .bytes()
        .all(|byte| byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E'));

    if is_decimal_literal {
        text.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0, |value: f64, c| {
        c.to_digit(radix)
            .map(|digit| value * f64::from(radix) + f64::from(digit))
    })
    .unwrap_or(f64::NAN)
}
