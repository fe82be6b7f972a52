//! Error types shared across the console.
//!
//! Two families: `ValidationError` for local input checks that never leave
//! the process, and `ApiError` for anything that crossed the wire. Handlers
//! render `ValidationError` verbatim (the messages are written for humans)
//! and turn `ApiError` into a friendlier line via [`ApiError::user_message`].

use thiserror::Error;

/// Local input validation failures. Raised before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Phone input has fewer digits than the configured minimum.
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    /// Phone input has enough digits but fails the configured pattern.
    #[error("Please enter a valid phone number")]
    PhonePatternMismatch,
    /// OTP submit attempted while one or more cells are still empty.
    #[error("Please enter complete OTP")]
    IncompleteOtp,
}

/// Errors from the gym management API or the transport underneath it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, or timeout failure — the request never completed.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    /// The backend answered 2xx but the body did not decode.
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// Message suitable for showing to the operator.
    ///
    /// Backend-provided messages win (they carry context like "OTP expired");
    /// transport and decode failures fall back to the caller's generic line.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Status code if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}
