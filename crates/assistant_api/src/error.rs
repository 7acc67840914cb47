use std::fmt;

use reqwest::StatusCode;
use serde_json::Error as JsonError;
use serde_json::Value;

#[derive(Debug)]
pub enum AssistantApiError {
    InvalidBaseUrl(String),
    InvalidHeader(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
    MalformedStream(String),
    StreamFailed { message: String },
    RetryExhausted {
        status: Option<StatusCode>,
        last_error: Option<String>,
    },
}

impl fmt::Display for AssistantApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::InvalidHeader(value) => write!(f, "invalid header: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::MalformedStream(message) => write!(f, "malformed event stream: {message}"),
            Self::StreamFailed { message } => write!(f, "stream failed: {message}"),
            Self::RetryExhausted { status, last_error } => {
                let status = status
                    .map(|status| status.as_u16().to_string())
                    .unwrap_or_else(|| "n/a".to_owned());
                write!(
                    f,
                    "retry exhausted after max attempts (status: {status}, last_error: {last_error:?})"
                )
            }
        }
    }
}

impl std::error::Error for AssistantApiError {}

impl From<reqwest::Error> for AssistantApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for AssistantApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

/// Extract a human-readable message from an error response body.
///
/// Accepts both `{"error": "text"}` and `{"error": {"message": "text"}}`
/// shapes; anything else falls back to the raw body or the status reason.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = error_field_message(&value) {
            return message;
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

fn error_field_message(value: &Value) -> Option<String> {
    let error = value.get("error")?;

    if let Some(text) = error.as_str() {
        return non_empty(text);
    }

    error
        .get("message")
        .and_then(|message| message.as_str())
        .and_then(non_empty)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
