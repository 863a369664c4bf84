//! Vault error types using thiserror 2.0.
//!
//! Transport failures are kept apart from everything else so callers can
//! tell "the server was never reached" from "the server said no".

use std::error::Error as StdError;
use thiserror::Error;

/// Reason an HTTP exchange did not complete.
///
/// Produced by [`HttpExecutor`](crate::HttpExecutor) when no usable
/// response was received from the server. A response with an error status
/// is *not* a transport error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established (DNS, refused, TLS handshake)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Connect or read deadline elapsed
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Request could not be built (bad header value, unsupported method)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Response body is not valid UTF-8 and cannot be returned verbatim
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// Any other failure while sending or reading the response
    #[error("transport failure: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let detail = error_chain(&err);
        if err.is_timeout() {
            Self::Timeout(detail)
        } else if err.is_connect() {
            Self::Connect(detail)
        } else if err.is_builder() {
            Self::InvalidRequest(detail)
        } else {
            Self::Other(detail)
        }
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Vault client errors.
#[derive(Error, Debug)]
pub enum VaultError {
    /// The request never reached the server
    #[error("Vault unreachable: {0}")]
    Transport(#[from] TransportError),

    /// Login exchange failed or produced no token
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Server answered with a non-success status
    #[error("Vault returned status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid caller-supplied value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True when the server was never reached.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Status code returned by the server, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultError::Transport(TransportError::Connect("connection refused".to_string()));
        assert_eq!(
            err.to_string(),
            "Vault unreachable: connection failed: connection refused"
        );

        let err = VaultError::Api {
            status: 403,
            body: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "Vault returned status 403: permission denied");
    }

    #[test]
    fn test_transport_classification() {
        assert!(VaultError::from(TransportError::Timeout("connect".into())).is_transport());
        assert!(!VaultError::auth_failed("no token").is_transport());
        assert!(!VaultError::invalid_input("empty").is_transport());
    }

    #[test]
    fn test_status_only_for_api_errors() {
        let err = VaultError::Api {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(VaultError::auth_failed("x").status(), None);
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let outer = VaultError::Serialization(serde_json::Error::io(inner));
        assert!(error_chain(&outer).contains("refused"));
    }
}
