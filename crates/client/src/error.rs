//! Client-side API error taxonomy.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("network failure: {0}")]
    Network(String),

    /// Backend reachable but unable to serve (5xx).
    #[error("backend unavailable ({status}): {message}")]
    Unavailable { status: u16, message: String },

    /// Authentication failure (401-equivalent). Handled uniformly by the
    /// interceptor regardless of which call produced it.
    #[error("backend rejected the session")]
    Unauthorized,

    /// Any other non-2xx application error, with the server's message.
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body did not decode into the expected shape.
    #[error("malformed response payload: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Transient failures may be retried by the user re-issuing the action.
    /// Non-idempotent writes are never auto-retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Unavailable { .. })
    }
}

/// Map a non-success HTTP status to the taxonomy.
pub fn classify_status(status: u16, message: String) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        s if s >= 500 => ApiError::Unavailable { status: s, message },
        s => ApiError::Rejected { status: s, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(classify_status(401, String::new()), ApiError::Unauthorized);
        assert_eq!(
            classify_status(503, "down".to_string()),
            ApiError::Unavailable {
                status: 503,
                message: "down".to_string()
            }
        );
        assert_eq!(
            classify_status(404, "no such movie".to_string()),
            ApiError::Rejected {
                status: 404,
                message: "no such movie".to_string()
            }
        );
    }

    #[test]
    fn only_network_and_unavailable_are_transient() {
        assert!(ApiError::Network("timeout".to_string()).is_transient());
        assert!(
            ApiError::Unavailable {
                status: 502,
                message: String::new()
            }
            .is_transient()
        );
        assert!(!ApiError::Unauthorized.is_transient());
        assert!(
            !ApiError::Rejected {
                status: 409,
                message: String::new()
            }
            .is_transient()
        );
    }
}
