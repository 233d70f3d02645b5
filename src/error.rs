use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure talking to the secret store
///
/// The `Display` output is what a caller sees when a read fails, so API
/// errors show the store's own message and nothing else.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The store answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request did not complete in time
    #[error("request to secret store timed out")]
    Timeout,

    /// Connection or HTTP client error
    #[error("secret store network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The store answered with a body that is not the expected JSON
    #[error("secret store json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured address cannot be used to build request URLs
    #[error("invalid secret store address '{0}'")]
    InvalidAddress(String),
}

impl BackendError {
    /// HTTP status returned by the store, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            BackendError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Conditions the request pipeline has no per-request recovery for
///
/// What happens to the process is decided by
/// [`FatalPolicy`](crate::config::FatalPolicy).
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// Listing a prefix failed outright
    #[error("LIST failed for {path}: {source}")]
    ListFailed {
        path: String,
        #[source]
        source: BackendError,
    },

    /// The listing came back without a `keys` sequence
    #[error("failed to read value for key: {path}")]
    MalformedListing { path: String },

    /// The read succeeded but carried no data
    #[error("READ failed to read value for {path}")]
    EmptyRead { path: String },
}

impl IntoResponse for FatalError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_store_message_only() {
        let err = BackendError::Api {
            status: 403,
            message: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "permission denied");
        assert_eq!(err.status(), Some(403));
        assert_eq!(BackendError::Timeout.status(), None);
    }

    #[test]
    fn test_fatal_messages_name_the_path() {
        let err = FatalError::EmptyRead {
            path: "sys/raw/core/x".to_string(),
        };
        assert_eq!(err.to_string(), "READ failed to read value for sys/raw/core/x");

        let err = FatalError::ListFailed {
            path: "sys/raw".to_string(),
            source: BackendError::Timeout,
        };
        assert!(err.to_string().contains("sys/raw"));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_fatal_error_response() {
        let response = FatalError::MalformedListing {
            path: "sys/raw/".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error_response.error, "failed to read value for key: sys/raw/");
    }
}
