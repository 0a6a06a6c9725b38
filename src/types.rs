use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A decoded document as produced by the decode step.
///
/// Validation returns the same value untouched, so a validated record is
/// structurally equal to what was decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(serde_json::Value);

impl Record {
    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }

    pub fn name(&self) -> Option<&str> {
        self.get(RequiredField::Name.as_str())
            .and_then(serde_json::Value::as_str)
    }

    pub fn age(&self) -> Option<f64> {
        self.get(RequiredField::Age.as_str())
            .and_then(serde_json::Value::as_f64)
    }
}

/// A field every valid record must carry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RequiredField {
    Name,
    Age,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// JSON type name the field's value must have.
    pub fn expected_type(self) -> &'static str {
        match self {
            Self::Name => "string",
            Self::Age => "number",
        }
    }

    pub fn accepts(self, value: &serde_json::Value) -> bool {
        match self {
            Self::Name => value.is_string(),
            Self::Age => value.is_number(),
        }
    }
}

/// Caller-supplied validation settings.
///
/// `order` fixes which missing field is reported when several are absent:
/// validation stops at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    order: Vec<RequiredField>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            order: vec![RequiredField::Age, RequiredField::Name],
        }
    }
}

impl ValidationPolicy {
    pub fn new(order: Vec<RequiredField>) -> Result<Self, Error> {
        if order.is_empty() {
            return Err(Error::Config {
                reason: "validation order must name at least one field".into(),
            });
        }
        Ok(Self { order })
    }

    /// Parse a comma-separated field list such as `"name,age"`.
    pub fn parse_order(list: &str) -> Result<Self, Error> {
        let order = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<RequiredField>().map_err(|_| Error::Config {
                    reason: format!("unknown required field: {s}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(order)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let policy: Self = serde_json::from_str(json).map_err(|e| Error::Config {
            reason: format!("invalid validation policy: {e}"),
        })?;
        Self::new(policy.order)
    }

    pub fn order(&self) -> &[RequiredField] {
        &self.order
    }
}
