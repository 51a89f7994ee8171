use std::cmp::Ordering;
use std::fmt;

use crate::foundation::error::ErrorKind;
use crate::model::types::{BuiltinType, Type};

/// An immutable, typed literal value.
///
/// The variant fixes the value's type for good; `Value`s of different types are never equal.
#[derive(Clone, Debug)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Kept verbatim, including the quotes it was declared with.
    String(String),
}

impl Value {
    /// Build a value of `kind` from literal text.
    ///
    /// - `int` accepts decimal (optionally negative), `0x` hexadecimal, `0o` octal and `0b`
    ///   binary text.
    /// - `float` accepts any numeric text, integer forms included.
    /// - `bool` accepts exactly `true` or `false`.
    /// - `string` is taken verbatim.
    pub fn parse(kind: BuiltinType, text: &str) -> Result<Self, ErrorKind> {
        let invalid = || ErrorKind::InvalidLiteral {
            ty: kind.name().to_owned(),
            text: text.to_owned(),
        };
        match kind {
            BuiltinType::Int => parse_integer(text).map(Self::Integer).ok_or_else(invalid),
            BuiltinType::Float => parse_float(text).map(Self::Float).ok_or_else(invalid),
            BuiltinType::Bool => match text {
                "true" => Ok(Self::Bool(true)),
                "false" => Ok(Self::Bool(false)),
                _ => Err(invalid()),
            },
            BuiltinType::String => Ok(Self::String(text.to_owned())),
        }
    }

    pub fn kind(&self) -> BuiltinType {
        match self {
            Self::Integer(_) => BuiltinType::Int,
            Self::Float(_) => BuiltinType::Float,
            Self::Bool(_) => BuiltinType::Bool,
            Self::String(_) => BuiltinType::String,
        }
    }

    pub fn ty(&self) -> Type {
        Type::Builtin(self.kind())
    }

    /// Payload text as emitted into a macro definition.
    pub fn raw(&self) -> String {
        match self {
            Self::Integer(v) => v.to_string(),
            Self::Float(v) => format!("{v:?}"),
            Self::Bool(v) => v.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Ordering between two numeric values of the same type.
    pub fn compare(&self, other: &Value) -> Result<Ordering, ErrorKind> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Ok(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a
                .partial_cmp(b)
                .ok_or_else(|| ErrorKind::incompatible(self.ty(), other.ty())),
            _ => Err(ErrorKind::incompatible(self.ty(), other.ty())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind().name(), self.raw())
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (radix, digits) = match body.get(..2) {
        Some("0x" | "0X") => (16, &body[2..]),
        Some("0o" | "0O") => (8, &body[2..]),
        Some("0b" | "0B") => (2, &body[2..]),
        _ => (10, body),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    // Parse the magnitude as u64 so that i64::MIN round-trips.
    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn parse_float(text: &str) -> Option<f64> {
    if let Some(v) = parse_integer(text) {
        return Some(v as f64);
    }
    let numeric = !text.is_empty()
        && text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/model/value.rs"]
mod tests;
