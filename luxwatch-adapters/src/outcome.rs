//! The result of one read, and the pure functions that classify responses.

use serde_json::Value;

use crate::AdapterError;

/// What a single fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The store returned data.
    Success(Value),
    /// The store answered with `null` or an empty container: no data yet.
    Empty,
    /// The read failed.
    Failure(AdapterError),
}

impl FetchOutcome {
    /// Wrap a decoded body, folding `null` and empty containers into [`FetchOutcome::Empty`].
    pub fn from_value(value: Value) -> Self {
        let empty = match &value {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        };
        if empty {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Success(value)
        }
    }

    /// Returns the error if this outcome is a failure.
    pub fn error(&self) -> Option<&AdapterError> {
        match self {
            FetchOutcome::Failure(e) => Some(e),
            _ => None,
        }
    }

    /// Short label used in logs and the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Success(_) => "success",
            FetchOutcome::Empty => "empty",
            FetchOutcome::Failure(_) => "failure",
        }
    }
}

impl From<Result<Value, AdapterError>> for FetchOutcome {
    fn from(result: Result<Value, AdapterError>) -> Self {
        match result {
            Ok(value) => FetchOutcome::from_value(value),
            Err(e) => FetchOutcome::Failure(e),
        }
    }
}

/// Map an HTTP status code to an error, or `None` for 2xx.
///
/// 401 and 403 are reported as [`AdapterError::Unauthorized`]; Firebase uses
/// them when database rules deny the read.
pub fn classify_status(status: u16) -> Option<AdapterError> {
    match status {
        200..=299 => None,
        401 | 403 => Some(AdapterError::Unauthorized(status)),
        _ => Some(AdapterError::Http(status)),
    }
}

/// Decode a response body into an outcome.
pub fn interpret_body(body: &str) -> FetchOutcome {
    serde_json::from_str::<Value>(body)
        .map_err(|e| AdapterError::Parse(e.to_string()))
        .into()
}
