//! Error types for the release server client.

use thiserror::Error;

/// Errors that can occur when fetching release tags.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server refused the request, usually an exhausted anonymous quota.
    #[error("Access denied by the release server: {0}")]
    Forbidden(String),

    /// The tags endpoint does not exist.
    #[error("Tags not found: {0}")]
    NotFound(String),

    /// Rate limited by the release server.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Release server error.
    #[error("Release server error: {0}")]
    ServerError(String),

    /// Invalid response from the server.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for release operations.
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            403 => ReleaseError::Forbidden(context.to_string()),
            404 => ReleaseError::NotFound(context.to_string()),
            429 => ReleaseError::RateLimited,
            500..=599 => ReleaseError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ReleaseError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status_403() {
        let err = ReleaseError::from_status(StatusCode::FORBIDDEN, "API rate limit exceeded");
        match err {
            ReleaseError::Forbidden(msg) => assert_eq!(msg, "API rate limit exceeded"),
            _ => panic!("Expected Forbidden error"),
        }
    }

    #[test]
    fn test_error_from_status_404() {
        let err = ReleaseError::from_status(StatusCode::NOT_FOUND, "tags");
        assert!(matches!(err, ReleaseError::NotFound(_)));
    }

    #[test]
    fn test_error_from_status_429() {
        let err = ReleaseError::from_status(StatusCode::TOO_MANY_REQUESTS, "tags");
        assert!(matches!(err, ReleaseError::RateLimited));
    }

    #[test]
    fn test_error_from_status_502() {
        let err = ReleaseError::from_status(StatusCode::BAD_GATEWAY, "tags");
        assert_eq!(
            err.to_string(),
            "Release server error: HTTP 502 Bad Gateway: tags"
        );
    }

    #[test]
    fn test_error_from_status_unexpected() {
        let err = ReleaseError::from_status(StatusCode::IM_A_TEAPOT, "tags");
        assert!(err.to_string().contains("Unexpected HTTP 418"));
    }
}
