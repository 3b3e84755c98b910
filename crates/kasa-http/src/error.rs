//! Mapping of transport failures and error bodies onto kasa errors.

use serde_json::Value;

use kasa_core::{ApiError, Error, FieldErrors, TransportError};

/// Convert a reqwest failure into a transport error.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// Build an [`ApiError`] from a non-success status and its raw body.
///
/// Understands `{ "message": "...", "errors": { "field": ["..."] } }`;
/// anything else yields an error with only the status.
pub(crate) fn api_error(status: u16, body: &[u8]) -> ApiError {
    let Ok(Value::Object(body)) = serde_json::from_slice::<Value>(body) else {
        return ApiError::new(status, None, FieldErrors::new());
    };

    let message = body
        .get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let errors = match body.get("errors") {
        Some(Value::Object(fields)) => FieldErrors::from_server(
            fields
                .iter()
                .map(|(field, messages)| (field.clone(), messages_of(messages))),
        ),
        _ => FieldErrors::new(),
    };

    ApiError::new(status, message, errors)
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
