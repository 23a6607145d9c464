use crate::{
    ast::TypeSpec,
    error::RuntimeError,
    interpreter::{
        environment::SlotValue,
        executor::core::ExecResult,
        value::core::{Scalar, Value},
    },
    util::num::{round_to_decimals, truncate},
};

/// Largest `LENGTH` a declaration may give, the limit of ABAP `c` and `n`
/// fields.
pub const MAX_FIELD_LENGTH: u32 = 262_143;

/// Storage shape of a scalar variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarType {
    /// `i`: whole numbers, truncated toward zero on assignment.
    Integer,
    /// `f`: binary floating point.
    Float,
    /// `p`: packed decimal, rounded to `decimals` places when given.
    Packed {
        /// Declared `LENGTH`.
        length:   Option<u32>,
        /// Declared `DECIMALS`.
        decimals: Option<u32>,
    },
    /// `string`: text of any length.
    Str,
    /// `c`: fixed-length text, padded with blanks or cut to `length`.
    Char {
        /// Declared `LENGTH`, 1 when omitted.
        length: u32,
    },
    /// `n`: digits only, left-padded with zeros to `length` when given.
    Numeric {
        /// Declared `LENGTH`.
        length: Option<u32>,
    },
    /// `d`: a date written as eight digits, `YYYYMMDD`.
    Date,
}

/// Element kind of an internal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// `TABLE OF i`
    Integer,
    /// `TABLE OF string`
    Str,
}

/// Declared storage shape of a variable. Fixed for the variable's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// A single value.
    Scalar(ScalarType),
    /// An internal table.
    Table(ElementType),
}

impl ScalarType {
    /// Returns `true` for `i`, `f` and `p`, the types `ADD` and `SUBTRACT`
    /// accept.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Packed { .. })
    }

    /// The initial value, which is also what `CLEAR` restores.
    ///
    /// # Example
    /// ```
    /// use abapi::interpreter::{types::ScalarType, value::core::Scalar};
    ///
    /// assert_eq!(ScalarType::Integer.initial(), Scalar::Number(0.0));
    /// assert_eq!(ScalarType::Char { length: 3 }.initial(), Scalar::Str("   ".into()));
    /// assert_eq!(ScalarType::Date.initial(), Scalar::Str("00000000".into()));
    /// ```
    #[must_use]
    pub fn initial(&self) -> Scalar {
        match self {
            Self::Integer | Self::Float | Self::Packed { .. } => Scalar::Number(0.0),
            Self::Str => Scalar::Str(String::new()),
            Self::Char { length } => Scalar::Str(" ".repeat(to_usize(*length))),
            Self::Numeric { length: Some(length) } => Scalar::Str("0".repeat(to_usize(*length))),
            Self::Numeric { length: None } => Scalar::Str("0".to_string()),
            Self::Date => Scalar::Str("00000000".to_string()),
        }
    }

    /// Converts an evaluation result into this type's stored representation.
    ///
    /// `name` is the receiving variable and only appears in error messages.
    ///
    /// # Errors
    /// Returns `RuntimeError::InvalidValue` when the value cannot be stored:
    /// non-numeric or non-finite sources for numeric types, non-digits for
    /// `n`, values longer than an `n` field, and anything other than eight
    /// digits for `d`.
    ///
    /// # Example
    /// ```
    /// use abapi::interpreter::{
    ///     types::ScalarType,
    ///     value::core::{Scalar, Value},
    /// };
    ///
    /// let stored = ScalarType::Integer.coerce(&Value::Number(-7.9), "lv_x").unwrap();
    /// assert_eq!(stored, Scalar::Number(-7.0));
    ///
    /// let stored = ScalarType::Str.coerce(&Value::Bool(false), "lv_text").unwrap();
    /// assert_eq!(stored, Scalar::Str("FALSE".into()));
    /// ```
    pub fn coerce(&self, value: &Value, name: &str) -> ExecResult<Scalar> {
        match self {
            Self::Integer => Ok(Scalar::Number(truncate(numeric_source(value, name)?))),
            Self::Float => Ok(Scalar::Number(numeric_source(value, name)?)),
            Self::Packed { decimals, .. } => {
                let n = numeric_source(value, name)?;
                Ok(Scalar::Number(decimals.map_or(n, |d| round_to_decimals(n, d))))
            },
            Self::Str => Ok(Scalar::Str(value.to_string())),
            Self::Char { length } => {
                let length = to_usize(*length);
                let mut text: String = value.to_string().chars().take(length).collect();
                let missing = length - text.chars().count();
                text.extend(std::iter::repeat_n(' ', missing));
                Ok(Scalar::Str(text))
            },
            Self::Numeric { length } => {
                let text = value.to_string();
                if !text.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid(name, "must contain only digits"));
                }
                match length.map(to_usize) {
                    Some(length) if text.len() > length => {
                        Err(invalid(name, &format!("exceeds the declared length ({length})")))
                    },
                    Some(length) => Ok(Scalar::Str(format!("{text:0>length$}"))),
                    None => Ok(Scalar::Str(text)),
                }
            },
            Self::Date => {
                let text = value.to_string();
                if text.len() == 8 && text.chars().all(|c| c.is_ascii_digit()) {
                    Ok(Scalar::Str(text))
                } else {
                    Err(invalid(name, "must have the format YYYYMMDD"))
                }
            },
        }
    }
}

impl ElementType {
    /// The scalar type each element is coerced to.
    #[must_use]
    pub const fn scalar_type(self) -> ScalarType {
        match self {
            Self::Integer => ScalarType::Integer,
            Self::Str => ScalarType::Str,
        }
    }

    /// Returns `true` if a work area of type `work_area` can hold elements of
    /// this kind: numeric work areas for `i` tables, text work areas for
    /// `string` tables.
    #[must_use]
    pub const fn fits(self, work_area: &ScalarType) -> bool {
        match self {
            Self::Integer => work_area.is_numeric(),
            Self::Str => !work_area.is_numeric(),
        }
    }

    /// Name of the element kind, for error messages.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Str => "string",
        }
    }
}

impl TypeDescriptor {
    /// Validates the type part of a declaration and builds the descriptor.
    ///
    /// Type names are case-insensitive. Metadata rules per type:
    /// - `i`, `f`, `d`: neither `LENGTH` nor `DECIMALS`.
    /// - `string`: neither `LENGTH` nor `DECIMALS`.
    /// - `p`: `DECIMALS` may not exceed `LENGTH`.
    /// - `c`, `n`: no `DECIMALS`.
    ///
    /// `LENGTH` must lie between 1 and [`MAX_FIELD_LENGTH`] wherever it is
    /// allowed.
    ///
    /// # Errors
    /// - `RuntimeError::UnknownType` for type names outside the list above.
    /// - `RuntimeError::UnsupportedTableElement` for tables of anything but
    ///   `i` or `string`.
    /// - `RuntimeError::InvalidDeclaration` for metadata the type rejects.
    pub fn from_spec(spec: &TypeSpec, name: &str) -> ExecResult<Self> {
        match spec {
            TypeSpec::Table { element } => match element.to_ascii_lowercase().as_str() {
                "i" => Ok(Self::Table(ElementType::Integer)),
                "string" => Ok(Self::Table(ElementType::Str)),
                _ => Err(RuntimeError::UnsupportedTableElement { type_name: element.clone(),
                                                                 name:      name.to_string(), }),
            },
            TypeSpec::Scalar { type_name,
                               length,
                               decimals, } => {
                Ok(Self::Scalar(scalar_from_spec(type_name, *length, *decimals, name)?))
            },
        }
    }

    /// The initial value of a fresh or cleared variable.
    #[must_use]
    pub fn initial(&self) -> SlotValue {
        match self {
            Self::Scalar(ty) => SlotValue::Scalar(ty.initial()),
            Self::Table(_) => SlotValue::Table(Vec::new()),
        }
    }
}

fn scalar_from_spec(type_name: &str,
                    length: Option<u32>,
                    decimals: Option<u32>,
                    name: &str)
                    -> ExecResult<ScalarType> {
    let declaration_error = |details: &str| RuntimeError::InvalidDeclaration { name:    name.to_string(),
                                                                               details: details.to_string(), };

    let type_name = type_name.to_ascii_lowercase();
    if !matches!(type_name.as_str(), "i" | "f" | "p" | "string" | "c" | "n" | "d") {
        return Err(RuntimeError::UnknownType { type_name,
                                               name: name.to_string() });
    }
    if length == Some(0) {
        return Err(declaration_error("LENGTH must be a positive integer"));
    }
    if length.is_some_and(|length| length > MAX_FIELD_LENGTH) {
        return Err(declaration_error(&format!("LENGTH cannot exceed {MAX_FIELD_LENGTH}")));
    }

    let upper = type_name.to_ascii_uppercase();
    let rejects_length = matches!(type_name.as_str(), "i" | "f" | "d" | "string");
    let rejects_decimals = matches!(type_name.as_str(), "i" | "f" | "d" | "string" | "c" | "n");
    if rejects_length && length.is_some() {
        return Err(declaration_error(&format!("type {upper} does not accept LENGTH")));
    }
    if rejects_decimals && decimals.is_some() {
        return Err(declaration_error(&format!("type {upper} does not accept DECIMALS")));
    }

    Ok(match type_name.as_str() {
        "i" => ScalarType::Integer,
        "f" => ScalarType::Float,
        "p" => {
            if let (Some(length), Some(decimals)) = (length, decimals)
               && decimals > length
            {
                return Err(declaration_error("DECIMALS cannot exceed LENGTH"));
            }
            ScalarType::Packed { length, decimals }
        },
        "string" => ScalarType::Str,
        "c" => ScalarType::Char { length: length.unwrap_or(1) },
        "n" => ScalarType::Numeric { length },
        _ => ScalarType::Date,
    })
}

/// Reads a number out of a value for the numeric types.
///
/// Strings holding a decimal number are accepted, the way character fields
/// convert to numbers on assignment.
fn numeric_source(value: &Value, name: &str) -> ExecResult<f64> {
    let number = match value {
        Value::Number(n) => Some(*n),
        Value::Str(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        Value::Str(_) | Value::Bool(_) => None,
    };
    number.filter(|n| n.is_finite())
          .ok_or_else(|| invalid(name, "must be numeric"))
}

fn invalid(name: &str, details: &str) -> RuntimeError {
    RuntimeError::InvalidValue { name:    name.to_string(),
                                 details: details.to_string(), }
}

fn to_usize(n: u32) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}
