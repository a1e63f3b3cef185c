//! Conversion of argument text into typed command fields.
//!
//! Every field type a command template may declare implements [`FieldValue`].
//! The trait carries the field's semantic [`ValueKind`], whether the type is
//! an optional wrapper (which makes the field a named option rather than a
//! positional argument), and the parser from a single token.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use cmdflag_core::{FieldValue, ValueKind};
//!
//! assert_eq!(<u16 as FieldValue>::from_token("8080").unwrap(), 8080);
//! assert_eq!(
//!     <Option<Duration> as FieldValue>::from_token("1m30s").unwrap(),
//!     Some(Duration::from_secs(90)),
//! );
//! assert!(<Option<bool> as FieldValue>::OPTIONAL);
//! assert_eq!(<f32 as FieldValue>::KIND, ValueKind::Float);
//! ```

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Semantic type of a command field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `true`/`false` and their canonical short forms.
    Bool,
    /// Signed integer of any width.
    Int,
    /// Unsigned integer of any width.
    Uint,
    /// Floating point of any width.
    Float,
    /// Time span written as a duration literal (`10s`, `5m`, `1h30m`).
    Duration,
    /// Plain text, stored as given.
    Text,
    /// Not convertible from text.
    Unsupported,
}

/// Failure to convert a token into a field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Token is not one of the accepted boolean spellings.
    #[error("invalid boolean \"{0}\"")]
    InvalidBool(String),
    /// Token is not a base-10 integer within the target range.
    #[error("invalid integer \"{token}\": {reason}")]
    InvalidInteger { token: String, reason: String },
    /// Token is not a floating point number.
    #[error("invalid float \"{token}\": {reason}")]
    InvalidFloat { token: String, reason: String },
    /// Token is not a duration literal.
    #[error("invalid duration \"{token}\": {reason}")]
    InvalidDuration { token: String, reason: String },
    /// The field's type cannot be set from text.
    #[error("unsupported field type {0}")]
    Unsupported(&'static str),
    /// The record has no field with this key.
    #[error("no field named {0}")]
    UnknownField(String),
}

/// A type that a command field may be declared with.
pub trait FieldValue: Sized {
    /// Semantic kind reported in schemas and help text.
    const KIND: ValueKind;
    /// Whether the type is an optional wrapper, making the field an option.
    const OPTIONAL: bool = false;

    /// Parses a single token into a value.
    fn from_token(token: &str) -> Result<Self, ConvertError>;
}

/// Marker type for the reserved header field of a command template.
///
/// The header field carries the command's `name|usage` annotation and holds
/// no data; it can never be set from input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header;

impl FieldValue for Header {
    const KIND: ValueKind = ValueKind::Unsupported;

    fn from_token(_token: &str) -> Result<Self, ConvertError> {
        Err(ConvertError::Unsupported("Header"))
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;
    const OPTIONAL: bool = true;

    fn from_token(token: &str) -> Result<Self, ConvertError> {
        T::from_token(token).map(Some)
    }
}

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_token(token: &str) -> Result<Self, ConvertError> {
        match token {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ConvertError::InvalidBool(token.to_string())),
        }
    }
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_token(token: &str) -> Result<Self, ConvertError> {
        Ok(token.to_string())
    }
}

impl FieldValue for Duration {
    const KIND: ValueKind = ValueKind::Duration;

    fn from_token(token: &str) -> Result<Self, ConvertError> {
        // A bare zero is the only unitless literal.
        if token == "0" {
            return Ok(Duration::ZERO);
        }
        humantime::parse_duration(token).map_err(|err| ConvertError::InvalidDuration {
            token: token.to_string(),
            reason: err.to_string(),
        })
    }
}

macro_rules! integer_field {
    ($kind:expr => $($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                const KIND: ValueKind = $kind;

                fn from_token(token: &str) -> Result<Self, ConvertError> {
                    token.parse::<$ty>().map_err(|err| ConvertError::InvalidInteger {
                        token: token.to_string(),
                        reason: err.to_string(),
                    })
                }
            }
        )+
    };
}

integer_field!(ValueKind::Int => i8, i16, i32, i64, i128, isize);
integer_field!(ValueKind::Uint => u8, u16, u32, u64, u128, usize);

macro_rules! float_field {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                const KIND: ValueKind = ValueKind::Float;

                fn from_token(token: &str) -> Result<Self, ConvertError> {
                    token.parse::<$ty>().map_err(|err| ConvertError::InvalidFloat {
                        token: token.to_string(),
                        reason: err.to_string(),
                    })
                }
            }
        )+
    };
}

float_field!(f32, f64);
