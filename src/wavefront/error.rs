//! Gateway errors
//!
//! Every failure the REST client can produce. Callers classify failures
//! through [`ApiError::is_not_found`] rather than inspecting message text.

use reqwest::StatusCode;

/// Errors returned by the Wavefront entity gateway.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The API answered with a non-success status code.
    #[error("{method} {path} failed: {status}")]
    Status {
        method: String,
        path: String,
        status: StatusCode,
    },

    /// The request never produced a response (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An operation needing a remote identifier was given an entity without one.
    #[error("{0} id field is not set")]
    MissingId(&'static str),

    /// A search kept reporting more items past the page limit.
    #[error("search for {search_type} did not complete within {pages} pages")]
    PaginationLimit {
        search_type: &'static str,
        pages: usize,
    },

    /// The configured API address could not be turned into a URL.
    #[error("invalid API address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// True when the remote object does not exist (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Convenience `Result` alias for gateway operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_classified_by_status() {
        let err = ApiError::Status {
            method: "GET".to_string(),
            path: "/api/v2/alert/1".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_other_statuses_are_not_not_found() {
        let err = ApiError::Status {
            method: "GET".to_string(),
            path: "/api/v2/404".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(!err.is_not_found());
        assert!(!ApiError::MissingId("Alert").is_not_found());
    }

    #[test]
    fn test_missing_id_message() {
        assert_eq!(
            ApiError::MissingId("Target").to_string(),
            "Target id field is not set"
        );
    }
}
