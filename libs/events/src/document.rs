//! Typed access to raw transport documents.

use serde_json::{Map, Value};

use crate::EventError;

/// A string-keyed transport document, exactly as received.
pub type Document = Map<String, Value>;

/// Field holding an event's wire type string.
pub const TYPE_FIELD: &str = "type";

/// Parses JSON text into a [`Document`]. The top level must be an object.
pub fn parse_document(text: &str) -> Result<Document, EventError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(EventError::UnrecognizedShape(format!(
            "expected a JSON object, got {}",
            value_kind(&other)
        ))),
    }
}

/// Returns the `type` field if it is a string.
pub fn wire_type(doc: &Document) -> Option<&str> {
    doc.get(TYPE_FIELD).and_then(Value::as_str)
}

/// Looks up an array field.
///
/// `Ok(None)` when the field is absent, an error when it is present but not
/// an array.
pub(crate) fn array_field<'a>(
    doc: &'a Document,
    field: &'static str,
) -> Result<Option<&'a Vec<Value>>, EventError> {
    match doc.get(field) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(EventError::invalid(
            field,
            format!("expected an array, got {}", value_kind(other)),
        )),
    }
}

/// Looks up a required string field.
pub(crate) fn str_field<'a>(doc: &'a Document, field: &'static str) -> Result<&'a str, EventError> {
    match doc.get(field) {
        None | Some(Value::Null) => Err(EventError::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(EventError::invalid(
            field,
            format!("expected a string, got {}", value_kind(other)),
        )),
    }
}

/// Short name of a JSON value's type, for log and error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
