//! Signal source error types.

use crate::catalog::{LineCode, StopCode};

/// Errors from fetching a stop's line summary.
///
/// None of these reach planner callers: the polling layer logs them and
/// treats the reading as unavailable.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not a valid line summary
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The stop answered but does not list the requested line
    #[error("line {line} not served at stop {stop}")]
    LineNotServed { stop: StopCode, line: LineCode },

    /// Client could not be set up
    #[error("not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SignalError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = SignalError::LineNotServed {
            stop: StopCode::parse("15371").unwrap(),
            line: LineCode::parse("3").unwrap(),
        };
        assert_eq!(err.to_string(), "line 3 not served at stop 15371");

        let err = SignalError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("expected value"));
    }
}
