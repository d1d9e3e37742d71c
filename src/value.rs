//! Hyperparameter value types.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single hyperparameter value.
///
/// Categorical and ordinal domains hold a list of these; numeric
/// hyperparameters produce `Int` or `Float` values.
///
/// Integers and floats compare by number, so `Int(5) == Float(5.0)`.
/// Booleans only equal booleans.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// A boolean value, rendered as `True` / `False`.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    Str(String),
}

impl Value {
    /// Returns the value as `f64` if it is numeric (booleans count as 0/1).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(f64::from(u8::from(*b))),
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Str(_) => None,
        }
    }

    /// Returns the value as `i64` if it is an integer or an integral float.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `Str` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(i), Self::Float(x)) | (Self::Float(x), Self::Int(i)) => *i as f64 == *x,
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => f.write_str(&format_float(*x)),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Renders a float with the shortest representation that round-trips.
///
/// Integral values keep a trailing `.0` and very small or large magnitudes
/// switch to exponent notation (`3.0518e-5`).
pub(crate) fn format_float(x: f64) -> String {
    format!("{x:?}")
}

/// `|a - b| <= atol + rtol * |b|` with numpy's default tolerances.
pub(crate) fn is_close(a: f64, b: f64) -> bool {
    const RTOL: f64 = 1e-5;
    const ATOL: f64 = 1e-8;
    a == b || (a - b).abs() <= ATOL + RTOL * b.abs()
}

/// The common type of a choice list, decided once when a domain is built.
///
/// The kind drives the cast applied by `to_value`, so that a mixed list such
/// as `[true, 2]` hands out integers throughout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueKind {
    /// Every choice is a boolean.
    Bool,
    /// Integers, possibly mixed with booleans.
    Int,
    /// Numbers with at least one float.
    Float,
    /// Every choice is a string.
    String,
    /// Strings mixed with other types; values are handed out unchanged.
    Opaque,
}

impl ValueKind {
    /// Infers the kind of a choice list.
    #[must_use]
    pub fn infer(values: &[Value]) -> Self {
        let (mut bools, mut ints, mut floats, mut strs) = (0usize, 0usize, 0usize, 0usize);
        for value in values {
            match value {
                Value::Bool(_) => bools += 1,
                Value::Int(_) => ints += 1,
                Value::Float(_) => floats += 1,
                Value::Str(_) => strs += 1,
            }
        }
        let total = values.len();
        if strs == total && total > 0 {
            Self::String
        } else if strs > 0 {
            Self::Opaque
        } else if floats > 0 {
            Self::Float
        } else if ints > 0 {
            Self::Int
        } else if bools > 0 {
            Self::Bool
        } else {
            Self::Opaque
        }
    }

    /// Casts a value into this kind.
    #[must_use]
    pub fn cast(self, value: &Value) -> Value {
        match (self, value) {
            (Self::Int, Value::Bool(b)) => Value::Int(i64::from(*b)),
            (Self::Float, Value::Bool(_) | Value::Int(_)) => {
                Value::Float(value.as_f64().unwrap_or_default())
            }
            _ => value.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_grammar_tokens() {
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Bool(false).to_string(), "False");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Float(4_500_000.0).to_string(), "4500000.0");
        assert_eq!(Value::from("luke-warm").to_string(), "luke-warm");
    }

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert_eq!(Value::Int(5), Value::Float(5.0));
        assert_eq!(Value::Float(5.0), Value::Int(5));
        assert_ne!(Value::Int(5), Value::Float(5.5));
        assert_ne!(Value::Bool(true), Value::Int(1));
        assert_ne!(Value::from("5"), Value::Int(5));
    }

    #[test]
    fn small_floats_round_trip_through_text() {
        let text = format_float(0.000_030_518);
        assert_eq!(text.parse::<f64>().unwrap(), 0.000_030_518);
    }

    #[test]
    fn infer_kind_priority() {
        assert_eq!(
            ValueKind::infer(&[Value::Bool(true), Value::Bool(false)]),
            ValueKind::Bool
        );
        assert_eq!(
            ValueKind::infer(&[Value::Bool(true), Value::Int(2)]),
            ValueKind::Int
        );
        assert_eq!(
            ValueKind::infer(&[Value::Int(1), Value::Float(2.5)]),
            ValueKind::Float
        );
        assert_eq!(
            ValueKind::infer(&[Value::from("a"), Value::from("b")]),
            ValueKind::String
        );
        assert_eq!(
            ValueKind::infer(&[Value::from("a"), Value::Int(1)]),
            ValueKind::Opaque
        );
    }

    #[test]
    fn cast_widens_numbers() {
        assert_eq!(ValueKind::Int.cast(&Value::Bool(true)), Value::Int(1));
        assert_eq!(ValueKind::Float.cast(&Value::Int(2)), Value::Float(2.0));
        assert_eq!(ValueKind::Opaque.cast(&Value::Int(2)), Value::Int(2));
        assert_eq!(ValueKind::String.cast(&Value::from("x")), Value::from("x"));
    }

    #[test]
    fn closeness_tolerates_rounding() {
        assert!(is_close(2.61, (-1.23 + 6.45) / 2.0));
        assert!(is_close(1.606_237_840_4, (0.4_f64 * 6.45).sqrt()));
        assert!(!is_close(1.0, 1.1));
    }
}
