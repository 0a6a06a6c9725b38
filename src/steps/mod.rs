pub mod decode;
pub mod validate;

use crate::error::Error;
use crate::types::{Record, ValidationPolicy};

pub use decode::decode;
pub use validate::validate;

/// Turns raw input into a [`Record`].
///
/// Implementations report malformed input as [`Error::Decode`]. Any other
/// variant is treated as unrecognized by the reader and passed through.
pub trait Decoder {
    fn decode(&self, input: &str) -> Result<Record, Error>;
}

/// Checks a decoded [`Record`] and hands it back unchanged on success.
///
/// Implementations report incomplete records as [`Error::Validation`].
pub trait Validator {
    fn validate(&self, record: Record) -> Result<Record, Error>;
}

/// JSON text decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, input: &str) -> Result<Record, Error> {
        Ok(decode(input)?)
    }
}

/// Required-field validator driven by a [`ValidationPolicy`].
#[derive(Debug, Clone, Default)]
pub struct RequiredFields {
    policy: ValidationPolicy,
}

impl RequiredFields {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }
}

impl Validator for RequiredFields {
    fn validate(&self, record: Record) -> Result<Record, Error> {
        Ok(validate(record, &self.policy)?)
    }
}

/// JSON type name of a value, as used in validation messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
