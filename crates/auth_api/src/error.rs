use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

#[derive(Debug)]
pub enum AuthApiError {
    InvalidBaseUrl(String),
    Request(reqwest::Error),
    /// The endpoint answered with a non-success status; `message` is the
    /// human-readable detail parsed from the body, suitable for display.
    Rejected {
        status: StatusCode,
        message: String,
    },
    Serde(serde_json::Error),
}

impl AuthApiError {
    /// Display-safe detail for surfacing in a transcript or banner.
    pub fn display_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Request(_) => "could not reach the sign-in service".to_string(),
            Self::InvalidBaseUrl(_) | Self::Serde(_) => {
                "the sign-in service returned an unexpected response".to_string()
            }
        }
    }
}

impl fmt::Display for AuthApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Rejected { status, message } => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for AuthApiError {}

impl From<reqwest::Error> for AuthApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<serde_json::Error> for AuthApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serde(error)
    }
}

/// Extract a human-readable message from an auth error body.
pub fn parse_rejection(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(|error| error.as_str())
            .map(str::trim)
            .filter(|message| !message.is_empty())
        {
            return message.to_string();
        }
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
