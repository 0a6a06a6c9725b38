use crate::error::ValidationError;
use crate::steps::json_type_name;
use crate::types::{Record, RequiredField, ValidationPolicy};

/// Check `record` against the fields named by `policy`, in order.
///
/// Reports only the first failure. A field that is absent or blank is
/// missing; a field that is present with the wrong JSON type is invalid.
pub fn validate(record: Record, policy: &ValidationPolicy) -> Result<Record, ValidationError> {
    let Some(fields) = record.as_value().as_object() else {
        return Err(ValidationError::NotAnObject {
            found: json_type_name(record.as_value()),
        });
    };

    for field in policy.order() {
        check_field(fields.get(field.as_str()), *field)?;
    }

    Ok(record)
}

fn check_field(
    value: Option<&serde_json::Value>,
    field: RequiredField,
) -> Result<(), ValidationError> {
    let value = match value {
        Some(v) if !is_blank(v) => v,
        _ => return Err(ValidationError::missing_field(field.as_str())),
    };

    if !field.accepts(value) {
        return Err(ValidationError::InvalidField {
            property: field.to_string(),
            expected: field.expected_type(),
            found: json_type_name(value),
        });
    }

    Ok(())
}

/// `null`, `false`, zero and the empty string count as absent.
pub(crate) fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n
            .as_f64()
            .is_some_and(|f| f.classify() == std::num::FpCategory::Zero),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
    }
}
