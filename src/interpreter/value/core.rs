use std::fmt;

use crate::util::num::format_number;

/// Represents the result of evaluating an expression.
///
/// Every expression evaluates to exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A text value.
    Str(String),
    /// A boolean value, produced only by comparisons.
    Bool(bool),
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&Scalar> for Value {
    fn from(scalar: &Scalar) -> Self {
        match scalar {
            Scalar::Number(n) => Self::Number(*n),
            Scalar::Str(s) => Self::Str(s.clone()),
        }
    }
}

impl Value {
    /// Name of the value's kind, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "a number",
            Self::Str(_) => "a string",
            Self::Bool(_) => "a boolean",
        }
    }

    /// Returns the number inside a `Value::Number`.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Truthiness used by conditions without a comparison operator.
    ///
    /// Non-zero numbers, `true` and non-empty strings are truthy.
    ///
    /// # Example
    /// ```
    /// use abapi::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(-1.0).is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::Str(String::new()).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(true) => write!(f, "TRUE"),
            Self::Bool(false) => write!(f, "FALSE"),
        }
    }
}

/// A stored value: the content of a scalar variable or of one table element.
///
/// The tag is kept so that reads produce the same kind that was written.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Content of `i`, `f` and `p` variables.
    Number(f64),
    /// Content of `string`, `c`, `n` and `d` variables.
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_write_output() {
        assert_eq!(Value::Number(8.0).to_string(), "8");
        assert_eq!(Value::Number(1.0 / 0.0).to_string(), "Infinity");
        assert_eq!(Value::Bool(true).to_string(), "TRUE");
        assert_eq!(Value::from("Hola").to_string(), "Hola");
        assert_eq!(Scalar::Number(-3.5).to_string(), "-3.5");
    }

    #[test]
    fn scalars_keep_their_kind() {
        assert_eq!(Value::from(&Scalar::Str("5".into())), Value::Str("5".into()));
        assert_eq!(Value::from(&Scalar::Number(5.0)), Value::Number(5.0));
    }

    #[test]
    fn nan_is_truthy() {
        assert!(Value::Number(f64::NAN).is_truthy());
        assert!(Value::Bool(true).is_truthy());
    }
}
