//! Handler for `POST /classify`.
//!
//! Every successful classification is recorded in the history.

use axum::{Json, extract::State};
use sentir_core::{classify::Classifier, store::HistoryStore};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ClassifyBody {
  pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
  /// Id of the history entry created for this classification.
  pub id:    i64,
  pub text:  String,
  pub label: String,
  /// Confidence for `label`, rounded to four fractional digits.
  pub score: f64,
}

/// `POST /classify`, body: `{"text":"..."}`
pub async fn handler<C, S>(
  State(state): State<ApiState<C, S>>,
  Json(body): Json<ClassifyBody>,
) -> Result<Json<ClassifyResponse>, ApiError>
where
  C: Classifier + 'static,
  S: HistoryStore + 'static,
{
  let record = state.pipeline.analyze(&body.text).await?;

  Ok(Json(ClassifyResponse {
    id:    record.id,
    label: record.sentiment_label.to_string(),
    score: record.confidence_score,
    text:  record.text,
  }))
}
