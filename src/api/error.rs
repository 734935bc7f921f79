use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::handlers::HandlerError;

/// Error body, shaped like the dispatcher's bad-request answer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{resource} handler failed: {source}")]
    Handler {
        resource: String,
        source: HandlerError,
    },
    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn handler(resource: impl Into<String>, source: HandlerError) -> Self {
        ApiError::Handler {
            resource: resource.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Handler {
                source: HandlerError::NotFound(_),
                ..
            }
            | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Handler { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Public message; handler details stay in the log
    pub fn message(&self) -> &'static str {
        match self.status_code() {
            StatusCode::NOT_FOUND => "Not found",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let failed = ApiError::handler("stream", HandlerError::Upstream("timeout".into()));
        assert_eq!(failed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failed.message(), "Internal server error");

        let missing = ApiError::handler("meta", HandlerError::NotFound("tt0".into()));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        assert_eq!(
            ApiError::NotFound("/x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_display_keeps_handler_detail() {
        let err = ApiError::handler("stream", HandlerError::Internal("db down".into()));
        assert_eq!(
            err.to_string(),
            "stream handler failed: internal handler error: db down"
        );
    }
}
