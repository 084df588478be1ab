//! Error types for roast-client

use thiserror::Error;

/// Result type alias using roast-client Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the chat endpoint
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was obtained
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint answered with a non-success status; `body` is an excerpt
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    /// Body decoded but did not carry a string `reply`
    #[error("Invalid response format: {0}")]
    InvalidReply(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Characters of an error body kept for diagnostics
pub const BODY_EXCERPT_CHARS: usize = 200;

/// Coarse classification of a failed exchange.
///
/// Non-success statuses and network-level errors share [`FailureKind::Transport`]
/// because the user is told the same thing in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No response before the deadline
    Timeout,
    /// Network failure or non-2xx status
    Transport,
    /// 2xx response whose body lacks a string `reply`
    MalformedPayload,
}

impl Error {
    /// Create a status error, keeping only the start of the body
    pub fn from_status(status: u16, body: &str) -> Self {
        let mut excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        if body.chars().nth(BODY_EXCERPT_CHARS).is_some() {
            excerpt.push_str("...");
        }
        Self::Status {
            status,
            body: excerpt,
        }
    }

    /// Create an invalid-reply error
    pub fn invalid_reply(message: impl Into<String>) -> Self {
        Self::InvalidReply(message.into())
    }

    /// Classify this error for the user-facing notice
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Http(e) if e.is_timeout() => FailureKind::Timeout,
            Error::InvalidReply(_) => FailureKind::MalformedPayload,
            // An unparsable body is treated like a broken connection, not a bad reply
            Error::Http(_) | Error::Json(_) | Error::Status { .. } => FailureKind::Transport,
            // Only raised while building a client; a client that cannot be built reaches nothing
            Error::InvalidConfig(_) => FailureKind::Transport,
        }
    }

    /// Excerpt of the error body, if the endpoint sent one
    pub fn body_excerpt(&self) -> Option<&str> {
        match self {
            Error::Status { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }

    /// HTTP status, if the endpoint answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_transport() {
        let e = Error::Status {
            status: 500,
            body: "oops".into(),
        };
        assert_eq!(e.kind(), FailureKind::Transport);
        assert_eq!(e.status(), Some(500));
    }

    #[test]
    fn test_status_body_is_truncated() {
        let page = "x".repeat(5_000);
        let e = Error::from_status(502, &page);
        let excerpt = e.body_excerpt().unwrap();
        assert_eq!(excerpt.chars().count(), BODY_EXCERPT_CHARS + 3);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_short_status_body_kept_whole() {
        let e = Error::from_status(500, "boom");
        assert_eq!(e.body_excerpt(), Some("boom"));
        assert_eq!(Error::from_status(500, "").body_excerpt(), None);
    }

    #[test]
    fn test_invalid_reply_is_malformed() {
        let e = Error::invalid_reply("`reply` is a number");
        assert_eq!(e.kind(), FailureKind::MalformedPayload);
        assert_eq!(e.status(), None);
    }

    #[test]
    fn test_json_error_is_transport() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert_eq!(Error::from(json_err).kind(), FailureKind::Transport);
    }

    #[test]
    fn test_display_mentions_status() {
        let e = Error::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(e.to_string(), "HTTP error! status: 503");
    }
}
