//! Error payloads carried by a failed submission.
//!
//! A server either answers with a single message or with validation errors
//! keyed by form field. Both shapes are modelled as variants of
//! [`ErrorPayload`] so that flattening is exhaustive.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AsyncPostError, Result};

/// Error value held by an [`AsyncPost`](crate::AsyncPost) in the `Error` state.
///
/// Serializes untagged: a JSON string for [`ErrorPayload::Message`], a JSON
/// object of string arrays for [`ErrorPayload::Fields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// Free-form error message.
    Message(String),
    /// Validation messages keyed by field name, in insertion order.
    Fields(IndexMap<String, Vec<String>>),
}

impl ErrorPayload {
    /// Build a field-keyed payload from `(field, messages)` pairs.
    pub fn fields<I, K, M>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<M>)>,
        K: Into<String>,
        M: Into<String>,
    {
        ErrorPayload::Fields(
            entries
                .into_iter()
                .map(|(field, messages)| {
                    (
                        field.into(),
                        messages.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        )
    }

    /// Normalize into a flat, order-preserving list of messages.
    ///
    /// A message becomes a one-element list. Field errors are concatenated in
    /// key order.
    pub fn flatten(&self) -> Vec<String> {
        match self {
            ErrorPayload::Message(message) => vec![message.clone()],
            ErrorPayload::Fields(fields) => fields.values().flatten().cloned().collect(),
        }
    }

    /// Messages recorded against a single field, if any.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        match self {
            ErrorPayload::Message(_) => None,
            ErrorPayload::Fields(fields) => fields.get(name).map(Vec::as_slice),
        }
    }

    /// Interpret an untyped JSON error body.
    ///
    /// Accepts a string, or an object whose every value is an array of
    /// strings. Anything else is rejected with
    /// [`AsyncPostError::UnsupportedErrorShape`].
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(message) => Ok(ErrorPayload::Message(message)),
            Value::Object(map) => {
                let mut fields = IndexMap::with_capacity(map.len());
                for (field, messages) in map {
                    let items = match messages {
                        Value::Array(items) => items,
                        other => return Err(unsupported(&field, &other)),
                    };
                    let mut collected = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            Value::String(message) => collected.push(message),
                            other => return Err(unsupported(&field, &other)),
                        }
                    }
                    fields.insert(field, collected);
                }
                Ok(ErrorPayload::Fields(fields))
            }
            other => Err(AsyncPostError::UnsupportedErrorShape(format!(
                "expected a string or an object of string arrays, got {}",
                kind(&other)
            ))),
        }
    }
}

fn unsupported(field: &str, value: &Value) -> AsyncPostError {
    AsyncPostError::UnsupportedErrorShape(format!(
        "field '{}' holds {}, expected an array of strings",
        field,
        kind(value)
    ))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Flatten an error payload into display strings.
pub fn flatten_errors(payload: &ErrorPayload) -> Vec<String> {
    payload.flatten()
}

/// Flatten an untyped JSON error body, rejecting unsupported shapes.
pub fn flatten_error_value(value: &Value) -> Result<Vec<String>> {
    ErrorPayload::from_value(value.clone()).map(|payload| payload.flatten())
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flatten().join("; "))
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        ErrorPayload::Message(message)
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        ErrorPayload::Message(message.to_string())
    }
}

impl From<IndexMap<String, Vec<String>>> for ErrorPayload {
    fn from(fields: IndexMap<String, Vec<String>>) -> Self {
        ErrorPayload::Fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_message() {
        assert_eq!(
            flatten_errors(&"bad input".into()),
            vec!["bad input".to_string()]
        );
    }

    #[test]
    fn test_flatten_fields_follows_key_order() {
        let payload = ErrorPayload::fields([
            ("name", vec!["required"]),
            ("email", vec!["invalid", "required"]),
        ]);
        assert_eq!(payload.flatten(), vec!["required", "invalid", "required"]);
    }

    #[test]
    fn test_flatten_empty_fields() {
        let payload = ErrorPayload::Fields(IndexMap::new());
        assert!(payload.flatten().is_empty());
    }

    #[test]
    fn test_field_lookup() {
        let payload = ErrorPayload::fields([("email", vec!["invalid"])]);
        assert_eq!(payload.field("email"), Some(&["invalid".to_string()][..]));
        assert_eq!(payload.field("name"), None);
        assert_eq!(ErrorPayload::from("oops").field("email"), None);
    }

    #[test]
    fn test_from_value_preserves_document_order() {
        let value = json!({"zip": ["too short"], "city": ["required"]});
        let payload = ErrorPayload::from_value(value).unwrap();
        assert_eq!(payload.flatten(), vec!["too short", "required"]);
    }

    #[test]
    fn test_from_value_rejects_other_shapes() {
        for value in [
            json!(42),
            json!(null),
            json!(["required"]),
            json!({"name": "required"}),
            json!({"name": [1, 2]}),
        ] {
            let err = ErrorPayload::from_value(value).unwrap_err();
            assert!(matches!(err, AsyncPostError::UnsupportedErrorShape(_)));
        }
    }

    #[test]
    fn test_flatten_error_value() {
        assert_eq!(
            flatten_error_value(&json!("server down")).unwrap(),
            vec!["server down"]
        );
        assert!(flatten_error_value(&json!(true)).is_err());
    }

    #[test]
    fn test_untagged_deserialize() {
        let message: ErrorPayload = serde_json::from_str(r#""nope""#).unwrap();
        assert_eq!(message, ErrorPayload::from("nope"));

        let fields: ErrorPayload =
            serde_json::from_str(r#"{"name":["required"],"email":["invalid"]}"#).unwrap();
        assert_eq!(fields.flatten(), vec!["required", "invalid"]);
    }

    #[test]
    fn test_display_joins_messages() {
        let payload = ErrorPayload::fields([("a", vec!["one", "two"]), ("b", vec!["three"])]);
        assert_eq!(payload.to_string(), "one; two; three");
    }
}
