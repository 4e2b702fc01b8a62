//! Handler for `GET /health`.

use axum::Json;
use serde_json::{Value, json};

/// `GET /health`
pub async fn handler() -> Json<Value> {
  Json(json!({
    "status": "ok",
    "message": "The API is up and running",
  }))
}
