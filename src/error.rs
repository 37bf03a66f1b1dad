//! Error types for the JSON file cache
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Persistence failures are not errors: mutating operations report them
/// through their `bool` result.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache directory could not be created or is not readable
    #[error("The cache directory {} is not readable", .path.display())]
    UnreadableCacheDirectory {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Key contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid cache key: {0:?}")]
    InvalidKey(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            CacheError::UnreadableCacheDirectory { .. } | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_is_bad_request() {
        let response = CacheError::InvalidKey("a/b".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unreadable_directory_is_server_error() {
        let err = CacheError::UnreadableCacheDirectory {
            path: PathBuf::from("/nowhere"),
            source: None,
        };
        assert!(err.to_string().contains("/nowhere"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
