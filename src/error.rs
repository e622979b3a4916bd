// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types shared by the auth flow, the gateway client and views.

use reqwest::StatusCode;

/// Failure while consuming the identity provider's callback fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthCallbackError {
    #[error("Identity provider returned an error: {error} ({description})")]
    Provider { error: String, description: String },

    #[error("Callback is missing {0}")]
    MissingToken(&'static str),

    #[error("Malformed callback fragment: {0}")]
    Malformed(String),

    #[error("Callback state does not match the pending login")]
    StateMismatch,
}

/// Application error type for gateway calls and view operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("Gateway server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected gateway response (HTTP {status}): {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    AuthCallback(#[from] AuthCallbackError),
}

impl ClientError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => ClientError::Unauthorized {
                status: status.as_u16(),
            },
            s if status.is_server_error() => ClientError::Server { status: s, body },
            s => ClientError::UnexpectedStatus { status: s, body },
        }
    }

    /// True for 401/403 responses from the gateway.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(e: validator::ValidationErrors) -> Self {
        ClientError::Validation(e.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_unauthorized() {
        let err = ClientError::from_status(StatusCode::UNAUTHORIZED, String::new());
        assert!(err.is_unauthorized());

        let err = ClientError::from_status(StatusCode::FORBIDDEN, "nope".to_string());
        assert!(matches!(err, ClientError::Unauthorized { status: 403 }));
    }

    #[test]
    fn test_from_status_server_error() {
        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".to_string());
        match err {
            ClientError::Server { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_status_other() {
        let err = ClientError::from_status(StatusCode::NOT_FOUND, String::new());
        assert!(matches!(err, ClientError::UnexpectedStatus { status: 404, .. }));
        assert!(!err.is_unauthorized());
    }
}
