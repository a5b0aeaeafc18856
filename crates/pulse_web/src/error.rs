use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to fetch feeds")]
    Feeds(#[source] pulse_core::Error),

    #[error("{0}")]
    Content(#[source] pulse_core::Error),

    #[error("{0}")]
    Request(#[source] pulse_core::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Feeds(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Content(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Content(_) => StatusCode::BAD_GATEWAY,
            ApiError::Request(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Feeds(e) => tracing::error!("Article list unavailable: {}", e),
            ApiError::Content(e) => tracing::warn!("Content extraction failed: {}", e),
            ApiError::Request(e) => tracing::debug!("Rejected request: {}", e),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
