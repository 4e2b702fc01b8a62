//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error: {0}")]
  Internal(String),

  #[error(transparent)]
  Core(#[from] sentir_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use sentir_core::Error as Core;

    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) | ApiError::Core(Core::Validation(_)) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Core(Core::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
      ApiError::Internal(_)
      | ApiError::Core(Core::Inference(_) | Core::Persistence(_)) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
