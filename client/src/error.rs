//! Error types for the transactional email client

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, EmailApiError>;

/// Errors that can occur when talking to the transactional email API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailApiError {
    /// A required value was missing, either from the caller or from the
    /// configured defaults (login credentials, template UUID).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level failure (connect, DNS, timeout, body read)
    #[error("Request failed: {0}")]
    Network(String),

    /// The response body was not valid JSON
    #[error("Invalid JSON response (HTTP {status}): {body}")]
    InvalidJson {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The login response carried no `token` field
    #[error("Login failed: token not found in response")]
    MissingToken,

    /// The API answered with an HTTP status of 400 or above
    #[error("API request failed: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-reported message, or `HTTP <status>` when none was given
        message: String,
    },
}

/// Coarse classification of [`EmailApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing caller-supplied or defaulted value
    InvalidInput,
    /// Transport failure
    Network,
    /// Malformed or incomplete response
    Protocol,
    /// Server-reported failure
    Api,
}

impl EmailApiError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Network(_) => ErrorKind::Network,
            Self::InvalidJson { .. } | Self::MissingToken => ErrorKind::Protocol,
            Self::Api { .. } => ErrorKind::Api,
        }
    }

    /// HTTP status attached to the error, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidJson { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(EmailApiError::InvalidInput("x".into()).kind(), ErrorKind::InvalidInput);
        assert_eq!(EmailApiError::Network("x".into()).kind(), ErrorKind::Network);
        assert_eq!(EmailApiError::MissingToken.kind(), ErrorKind::Protocol);
        assert_eq!(
            EmailApiError::InvalidJson { status: 500, body: "oops".into() }.kind(),
            ErrorKind::Protocol
        );
        assert_eq!(
            EmailApiError::Api { status: 404, message: "not found".into() }.kind(),
            ErrorKind::Api
        );
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let err = EmailApiError::InvalidJson { status: 502, body: "<html>".into() };
        assert_eq!(err.to_string(), "Invalid JSON response (HTTP 502): <html>");
        assert_eq!(err.status(), Some(502));
        assert_eq!(EmailApiError::MissingToken.status(), None);
    }
}
