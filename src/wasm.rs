use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::Error;
use crate::reader::RecordReader;
use crate::reader::report::{Detail, ReadOutcome, read_or_reject};
use crate::steps::{JsonDecoder, RequiredFields};
use crate::types::ValidationPolicy;

fn to_js(value: &serde_json::Value) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

fn outcome_to_json(outcome: Result<ReadOutcome, Error>) -> serde_json::Value {
    match outcome {
        Ok(ReadOutcome::Loaded(record)) => serde_json::json!({ "record": record }),
        Ok(ReadOutcome::Rejected(rejection)) => serde_json::json!({
            "error": rejection.summary,
            "kind": rejection.kind.as_str(),
            "tag": rejection.cause_tag,
            "cause": rejection.cause,
            "property": rejection.property,
        }),
        Err(err) => serde_json::json!({
            "error": err.to_string(),
            "tag": err.tag(),
        }),
    }
}

fn read_with(reader: &RecordReader<JsonDecoder, RequiredFields>, input: &str) -> JsValue {
    to_js(&outcome_to_json(read_or_reject(
        reader,
        input,
        Detail::WithCause,
    )))
}

/// Read a JSON record with the default `age, name` validation order.
///
/// Returns `{record}` on success, `{error, kind, tag, cause, property}` otherwise.
#[wasm_bindgen]
pub fn read(input: &str) -> JsValue {
    read_with(&RecordReader::new(), input)
}

/// Read a JSON record, checking required fields in the given comma-separated order.
#[wasm_bindgen]
pub fn read_with_order(input: &str, order: &str) -> JsValue {
    match ValidationPolicy::parse_order(order) {
        Ok(policy) => read_with(&RecordReader::with_policy(policy), input),
        Err(err) => to_js(&outcome_to_json(Err(err))),
    }
}

/// Summary message for a classification tag (`"syntax"` / `"validation"`), or null.
#[wasm_bindgen]
pub fn summary_for(kind: &str) -> Option<String> {
    kind.parse::<crate::error::ReadErrorKind>()
        .ok()
        .map(|k| k.summary().to_string())
}
