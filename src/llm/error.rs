//! Failures reported by a text-generation backend.
//!
//! The analysis pipeline never retries and never surfaces these to the
//! operator directly; they are logged and turned into an offline fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum BackendError {
    /// The provider answered with a failure
    #[error("uplink rejected{}: {message}", status_suffix(*status_code))]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    #[error("credential refused: {message}")]
    AuthenticationError { message: String },

    #[error("uplink silent for {seconds}s")]
    TimeoutError { seconds: u64 },

    /// The provider answered but the payload could not be used
    #[error("unreadable transmission: {message}")]
    InvalidResponse {
        message: String,
        raw_response: Option<String>,
    },

    #[error("backend misconfigured: {message}")]
    ConfigurationError { message: String },

    #[error("carrier lost: {message}")]
    NetworkError { message: String },

    #[error("{message}")]
    Other { message: String },
}

fn status_suffix(code: Option<u16>) -> String {
    code.map(|c| format!(" (HTTP {})", c)).unwrap_or_default()
}

impl BackendError {
    /// HTTP status attached to a provider failure
    pub fn status_code(&self) -> Option<u16> {
        match self {
            BackendError::ApiError { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Whether the same request could succeed later without operator action.
    /// Auth and configuration problems need a new credential or setting.
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::TimeoutError { .. } | BackendError::NetworkError { .. } => true,
            BackendError::ApiError { status_code, .. } => {
                matches!(status_code, None | Some(429) | Some(500..=599))
            }
            BackendError::InvalidResponse { .. } => true,
            BackendError::AuthenticationError { .. }
            | BackendError::ConfigurationError { .. }
            | BackendError::Other { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_carries_http_status() {
        let err = BackendError::ApiError {
            message: "quota exhausted".to_string(),
            status_code: Some(429),
        };
        assert_eq!(err.to_string(), "uplink rejected (HTTP 429): quota exhausted");
        assert_eq!(err.status_code(), Some(429));
        assert!(err.is_transient());

        let bare = BackendError::ApiError {
            message: "bad gateway".to_string(),
            status_code: None,
        };
        assert_eq!(bare.to_string(), "uplink rejected: bad gateway");
    }

    #[test]
    fn test_credential_problems_are_not_transient() {
        let auth = BackendError::AuthenticationError {
            message: "key revoked".to_string(),
        };
        assert!(!auth.is_transient());
        assert_eq!(auth.status_code(), None);

        let forbidden = BackendError::ApiError {
            message: "forbidden".to_string(),
            status_code: Some(403),
        };
        assert!(!forbidden.is_transient());
    }

    #[test]
    fn test_silence_message() {
        let err = BackendError::TimeoutError { seconds: 30 };
        assert_eq!(err.to_string(), "uplink silent for 30s");
        assert!(err.is_transient());
    }
}
