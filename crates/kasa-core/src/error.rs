//! Error types for kasa.
//!
//! A single error type with explicit variants for transport failures, API
//! rejections (including field-level validation maps), response decoding and
//! input validation.

use std::fmt;
use thiserror::Error;

use crate::types::FieldErrors;

/// The unified error type for kasa operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-success status.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input validation errors (bad URL, bad id).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Field errors carried by a validation-class API rejection, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Error::Api(api) if api.is_validation() => Some(&api.errors),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The request was abandoned before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Top-level message from the server.
    pub message: Option<String>,
    /// First message per field, from an `errors` map.
    pub errors: FieldErrors,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        if !self.errors.is_empty() {
            write!(f, " ({} field error(s))", self.errors.len())?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>, errors: FieldErrors) -> Self {
        Self {
            status,
            message,
            errors,
        }
    }

    /// Whether this is a validation-class rejection with field errors.
    pub fn is_validation(&self) -> bool {
        (self.status == 422 || self.status == 400) && !self.errors.is_empty()
    }

    /// Whether the request was rejected for missing or bad credentials.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// Whether the entity does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Invalid entity id.
    #[error("invalid id '{value}'")]
    Id { value: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_exposed() {
        let mut errors = FieldErrors::new();
        errors.insert("tax_number", "invalid");
        let err = Error::from(ApiError::new(422, Some("The given data was invalid.".into()), errors));

        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("tax_number"), Some("invalid"));
        assert!(err.to_string().contains("422"));
    }

    #[test]
    fn server_errors_carry_no_field_errors() {
        let err = Error::from(ApiError::new(500, None, FieldErrors::new()));
        assert!(err.field_errors().is_none());
        assert_eq!(err.to_string(), "api error: HTTP 500");
    }
}
