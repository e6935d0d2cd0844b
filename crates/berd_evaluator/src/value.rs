//! Runtime values and their primitive coercions.

use serde::Serialize;
use std::fmt;

/// A value produced by evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "typeName", content = "value")]
pub enum RuntimeValue {
    #[serde(rename = "NullValue")]
    Null,
    #[serde(rename = "UndefinedValue")]
    Undefined,
    #[serde(rename = "BooleanValue")]
    Boolean(bool),
    #[serde(rename = "NumberValue")]
    Number(f64),
    #[serde(rename = "StringValue")]
    String(String),
}

impl RuntimeValue {
    pub fn string(value: impl Into<String>) -> Self {
        RuntimeValue::String(value.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            RuntimeValue::Null => "NullValue",
            RuntimeValue::Undefined => "UndefinedValue",
            RuntimeValue::Boolean(_) => "BooleanValue",
            RuntimeValue::Number(_) => "NumberValue",
            RuntimeValue::String(_) => "StringValue",
        }
    }

    /// Null and undefined carry no scalar payload.
    pub fn is_nullish(&self) -> bool {
        matches!(self, RuntimeValue::Null | RuntimeValue::Undefined)
    }

    /// Truthiness as used by `if` tests and the logical operators.
    pub fn is_truthy(&self) -> bool {
        match self {
            RuntimeValue::Null | RuntimeValue::Undefined => false,
            RuntimeValue::Boolean(value) => *value,
            RuntimeValue::Number(value) => !(*value == 0.0 || value.is_nan()),
            RuntimeValue::String(value) => !value.is_empty(),
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            RuntimeValue::Null => 0.0,
            RuntimeValue::Undefined => f64::NAN,
            RuntimeValue::Boolean(value) => {
                if *value {
                    1.0
                } else {
                    0.0
                }
            }
            RuntimeValue::Number(value) => *value,
            RuntimeValue::String(value) => string_to_number(value),
        }
    }

    /// The number wrapped to a signed 32-bit integer.
    pub fn to_int32(&self) -> i32 {
        to_uint32(self.to_number()) as i32
    }

    /// The number wrapped to an unsigned 32-bit integer.
    pub fn to_uint32(&self) -> u32 {
        to_uint32(self.to_number())
    }

    /// `==`: null and undefined equal each other and nothing else; strings
    /// compare as text; everything else compares numerically.
    pub fn loose_equals(&self, other: &RuntimeValue) -> bool {
        match (self, other) {
            (a, b) if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
            (RuntimeValue::String(a), RuntimeValue::String(b)) => a == b,
            (a, b) => a.to_number() == b.to_number(),
        }
    }

    /// `===`: same type and same value. `NaN` equals nothing.
    pub fn strict_equals(&self, other: &RuntimeValue) -> bool {
        match (self, other) {
            (RuntimeValue::Null, RuntimeValue::Null) => true,
            (RuntimeValue::Undefined, RuntimeValue::Undefined) => true,
            (RuntimeValue::Boolean(a), RuntimeValue::Boolean(b)) => a == b,
            (RuntimeValue::Number(a), RuntimeValue::Number(b)) => a == b,
            (RuntimeValue::String(a), RuntimeValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Null => f.write_str("null"),
            RuntimeValue::Undefined => f.write_str("undefined"),
            RuntimeValue::Boolean(value) => write!(f, "{}", value),
            RuntimeValue::Number(value) => f.write_str(&format_number(*value)),
            RuntimeValue::String(value) => f.write_str(value),
        }
    }
}

impl From<f64> for RuntimeValue {
    fn from(value: f64) -> Self {
        RuntimeValue::Number(value)
    }
}

impl From<bool> for RuntimeValue {
    fn from(value: bool) -> Self {
        RuntimeValue::Boolean(value)
    }
}

impl From<&str> for RuntimeValue {
    fn from(value: &str) -> Self {
        RuntimeValue::String(value.to_string())
    }
}

/// Format a number the way scripts print it: `5`, `1.5`, `NaN`, `Infinity`,
/// `1e+21`.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{:e}", value);
        return if text.contains("e-") {
            text
        } else {
            text.replacen('e', "e+", 1)
        };
    }
    format!("{}", value)
}

fn string_to_number(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) =>
        {
            text.parse::<f64>().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}
