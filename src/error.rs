/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Error types for the Dale client
//!
//! Every failure of the request layer is surfaced as an [`AppError`]. Non-2xx
//! responses are first classified into an [`ApiFailure`] so callers can match on
//! the shape of the server complaint instead of re-parsing message text.

use reqwest::StatusCode;
use serde_json::Value;

/// Message used when a server error body carries nothing more specific
pub const GENERIC_API_ERROR: &str = "API Error";
/// Message carried by [`AppError::Timeout`]
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Unified error type for the client
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request did not produce a response within the timeout budget
    #[error("Request timed out")]
    Timeout {
        /// Milliseconds spent before the call was abandoned
        elapsed_ms: u64,
    },

    /// The connection failed or the body could not be read
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not valid JSON, or not the expected shape
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server rejected individual fields or issues
    #[error("{message}")]
    Validation {
        /// Response status
        status: StatusCode,
        /// Assembled human-readable message
        message: String,
    },

    /// Any other server-side failure
    #[error("{message}")]
    Api {
        /// Response status
        status: StatusCode,
        /// Message taken from the body, or [`GENERIC_API_ERROR`]
        message: String,
    },

    /// A local requirement was not met, nothing was sent
    #[error("{0}")]
    Precondition(String),

    /// The key-value store failed
    #[error("storage error: {0}")]
    Storage(String),

    /// File system failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the request was abandoned because of the timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout { .. })
    }

    /// Whether the request failed at the transport level
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }

    /// Whether the server reported field or issue validation failures
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation { .. })
    }

    /// Whether the error was raised locally before any network activity
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, AppError::Precondition(_))
    }

    /// HTTP status of a server-reported failure
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Validation { status, .. } | AppError::Api { status, .. } => Some(*status),
            AppError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Single per-field validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as reported by the server
    pub field: String,
    /// Reasons, in server order
    pub errors: Vec<String>,
}

/// Single entry of an `issues` array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Dotted path, `field` when the server gave none
    pub path: String,
    /// Reason, `invalid` when the server gave none
    pub message: String,
}

/// Shape of a non-2xx response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// `{"data": {"<field>": {"_errors": [..]}}}`
    FieldValidation(Vec<FieldError>),
    /// `{"issues": [{"path": [..], "message": ".."}]}`
    Issues(Vec<Issue>),
    /// Anything else, with the best message found
    Server(String),
}

impl ApiFailure {
    /// Classifies an error body
    ///
    /// Field validation wins over issues, which win over the `message`/`error`
    /// fallback. A shape that is present but yields no entries falls through.
    #[must_use]
    pub fn classify(body: &Value) -> Self {
        let fields = field_errors(body);
        if !fields.is_empty() {
            return ApiFailure::FieldValidation(fields);
        }
        let issues = issues(body);
        if !issues.is_empty() {
            return ApiFailure::Issues(issues);
        }
        ApiFailure::Server(fallback_message(body))
    }

    /// Human-readable message for this failure
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ApiFailure::FieldValidation(fields) => fields
                .iter()
                .map(|f| format!("{}: {}", f.field, f.errors.join(", ")))
                .collect::<Vec<_>>()
                .join("; "),
            ApiFailure::Issues(issues) => issues
                .iter()
                .map(|i| format!("{}: {}", i.path, i.message))
                .collect::<Vec<_>>()
                .join("; "),
            ApiFailure::Server(message) => message.clone(),
        }
    }

    /// Converts the failure into the error returned to callers
    #[must_use]
    pub fn into_error(self, status: StatusCode) -> AppError {
        let message = self.message();
        match self {
            ApiFailure::FieldValidation(_) | ApiFailure::Issues(_) => {
                AppError::Validation { status, message }
            }
            ApiFailure::Server(_) => AppError::Api { status, message },
        }
    }
}

fn field_errors(body: &Value) -> Vec<FieldError> {
    let Some(data) = body.get("data").and_then(Value::as_object) else {
        return Vec::new();
    };
    data.iter()
        .filter(|(field, _)| field.as_str() != "_errors")
        .filter_map(|(field, value)| {
            let errors: Vec<String> = value
                .as_object()?
                .get("_errors")?
                .as_array()?
                .iter()
                .map(text_of)
                .collect();
            (!errors.is_empty()).then(|| FieldError {
                field: field.clone(),
                errors,
            })
        })
        .collect()
}

fn issues(body: &Value) -> Vec<Issue> {
    let Some(entries) = body.get("issues").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|issue| {
            let path = issue
                .get("path")
                .and_then(Value::as_array)
                .map(|parts| parts.iter().map(text_of).collect::<Vec<_>>().join("."))
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| "field".to_string());
            let message = issue
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("invalid")
                .to_string();
            Issue { path, message }
        })
        .collect()
}

fn fallback_message(body: &Value) -> String {
    ["message", "error"]
        .iter()
        .find_map(|key| {
            body.get(*key)
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
        })
        .unwrap_or(GENERIC_API_ERROR)
        .to_string()
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
