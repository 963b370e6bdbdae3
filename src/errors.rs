//! Error types and the closed error taxonomy returned to clients.
//!
//! Every failure that reaches the API boundary is classified into one of the
//! five `ErrorCode` values so presentation code has a single failure shape to
//! render. Variants carry an explicit code; foreign errors arriving without
//! one are classified by keyword via [`classify_message`].

use serde::Serialize;
use thiserror::Error;

/// Closed set of error codes surfaced in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "URL_ERROR")]
    UrlError,
    #[serde(rename = "CONNECTION_ERROR")]
    ConnectionError,
    #[serde(rename = "CONTENT_ERROR")]
    ContentError,
    #[serde(rename = "AI_SERVICE_ERROR")]
    AiServiceError,
    #[serde(rename = "PROCESSING_ERROR")]
    ProcessingError,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UrlError => "URL_ERROR",
            Self::ConnectionError => "CONNECTION_ERROR",
            Self::ContentError => "CONTENT_ERROR",
            Self::AiServiceError => "AI_SERVICE_ERROR",
            Self::ProcessingError => "PROCESSING_ERROR",
        }
    }
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid URL: {0}")]
    UrlError(String),

    #[error("Failed to fetch content: {0}")]
    ConnectionError(String),

    #[error("Content error: {0}")]
    ContentError(String),

    #[error("AI service error: {0}")]
    AiServiceError(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),
}

impl SummarizeError {
    /// The explicit code attached to this error. Explicit codes always win
    /// over message sniffing.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UrlError(_) => ErrorCode::UrlError,
            Self::ConnectionError(_) => ErrorCode::ConnectionError,
            Self::ContentError(_) => ErrorCode::ContentError,
            Self::AiServiceError(_) => ErrorCode::AiServiceError,
            Self::InvalidRequest(_) | Self::ProcessingError(_) => ErrorCode::ProcessingError,
        }
    }
}

impl From<reqwest::Error> for SummarizeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SummarizeError::ConnectionError(format!("request timed out: {error}"))
        } else if error.is_connect() {
            SummarizeError::ConnectionError(format!("network error: {error}"))
        } else {
            SummarizeError::ConnectionError(error.to_string())
        }
    }
}

impl From<anyhow::Error> for SummarizeError {
    fn from(error: anyhow::Error) -> Self {
        let message = error.to_string();
        match classify_message(&message) {
            ErrorCode::UrlError => SummarizeError::UrlError(message),
            ErrorCode::ConnectionError => SummarizeError::ConnectionError(message),
            ErrorCode::ContentError => SummarizeError::ContentError(message),
            ErrorCode::AiServiceError => SummarizeError::AiServiceError(message),
            ErrorCode::ProcessingError => SummarizeError::ProcessingError(message),
        }
    }
}

/// Keyword-driven classification for errors that arrive without an explicit
/// code. Ordering matters: the first matching rule wins.
#[must_use]
pub fn classify_message(message: &str) -> ErrorCode {
    let lowered = message.to_ascii_lowercase();

    let rules: &[(&[&str], ErrorCode)] = &[
        (
            &["invalid url", "malformed url", "url format", "domain"],
            ErrorCode::UrlError,
        ),
        (
            &[
                "timeout",
                "timed out",
                "network",
                "connection",
                "access denied",
                "forbidden",
                "not found",
                "unreachable",
                "fetch failed",
            ],
            ErrorCode::ConnectionError,
        ),
        (
            &["content", "empty body", "too short", "extraction"],
            ErrorCode::ContentError,
        ),
        (
            &[
                "quota",
                "rate limit",
                "capacity",
                "completion",
                "model",
                "ai service",
                "insufficient",
            ],
            ErrorCode::AiServiceError,
        ),
    ];

    for (needles, code) in rules {
        if needles.iter().any(|n| lowered.contains(n)) {
            return *code;
        }
    }

    ErrorCode::ProcessingError
}
