//! Mapping of queue rejections onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::queue::QueueError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("queue is empty")]
    EmptyQueue,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Queue(QueueError::InvalidIdentifier { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Queue(QueueError::DuplicateIdentifier { .. }) => StatusCode::CONFLICT,
            ApiError::Queue(QueueError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::EmptyQueue => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(QueueError::InvalidIdentifier { id: -1 }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(QueueError::DuplicateIdentifier { id: 1 }).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(QueueError::NotFound { id: 1 }).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::EmptyQueue.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_message_passes_through() {
        let err = ApiError::from(QueueError::DuplicateIdentifier { id: 42 });
        assert_eq!(err.to_string(), "order 42 is already queued");
    }
}
