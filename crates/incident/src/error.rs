//! Error type for the incident API client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`crate::Client`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    RequestFailed {
        /// HTTP status returned by the backend.
        status: StatusCode,
        /// Human-readable message.
        message: String,
    },

    /// The request could not be sent, or the response body could not be decoded.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The configured base URL cannot have endpoint paths appended to it.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// HTTP status of a [`ClientError::RequestFailed`], or the status carried by a
    /// transport error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::InvalidBaseUrl(_) => None,
        }
    }
}

/// Result alias for client operations.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_displays_message_only() {
        let err = ClientError::RequestFailed {
            status: StatusCode::CONFLICT,
            message: "conflict".to_owned(),
        };
        assert_eq!(err.to_string(), "conflict");
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn invalid_base_url_has_no_status() {
        let err = ClientError::InvalidBaseUrl("mailto:ops@example.com".to_owned());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("mailto:ops@example.com"));
    }
}
