//! Handlers for `/history` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/history` | `?limit=1..=50` (default 20); 404 when empty |
//! | `GET`    | `/history/search` | `?search_query=<non-empty>[&limit=...]`; 404 when empty |
//! | `POST`   | `/history` | Body: [`SaveBody`]; returns 201 + stored record |
//! | `GET`    | `/history/{id}` | Single record |
//! | `DELETE` | `/history/{id}` | `true` if a record was removed |
//!
//! Listing and search cannot tell "nothing stored" from "store unreachable";
//! both come back as 404.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use sentir_core::{
  classify::Classifier,
  history::Lookup,
  record::{AnalysisRecord, NewAnalysis},
  store::HistoryStore,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 50;

fn checked_limit(limit: Option<u32>) -> Result<u32, ApiError> {
  match limit.unwrap_or(DEFAULT_LIMIT) {
    limit @ 1..=MAX_LIMIT => Ok(limit),
    other => Err(ApiError::BadRequest(format!(
      "limit must be between 1 and {MAX_LIMIT}, got {other}"
    ))),
  }
}

/// A page of history entries.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryPage {
  pub total:    usize,
  pub analyses: Vec<AnalysisRecord>,
}

impl HistoryPage {
  fn non_empty(analyses: Vec<AnalysisRecord>) -> Result<Json<Self>, ApiError> {
    if analyses.is_empty() {
      return Err(ApiError::NotFound("Analysis history not found".to_owned()));
    }
    Ok(Json(Self {
      total: analyses.len(),
      analyses,
    }))
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit: Option<u32>,
}

/// `GET /history[?limit=<n>]`
pub async fn list<C, S>(
  State(state): State<ApiState<C, S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<HistoryPage>, ApiError>
where
  C: Classifier + 'static,
  S: HistoryStore + 'static,
{
  let limit = checked_limit(params.limit)?;
  HistoryPage::non_empty(state.history.list_history(limit).await)
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  #[serde(default)]
  pub search_query: String,
  pub limit:        Option<u32>,
}

/// `GET /history/search?search_query=<text>[&limit=<n>]`
pub async fn search<C, S>(
  State(state): State<ApiState<C, S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<HistoryPage>, ApiError>
where
  C: Classifier + 'static,
  S: HistoryStore + 'static,
{
  if params.search_query.is_empty() {
    return Err(ApiError::BadRequest("search_query is required".to_owned()));
  }
  let limit = checked_limit(params.limit)?;
  HistoryPage::non_empty(
    state
      .history
      .search_history(&params.search_query, limit)
      .await,
  )
}

// ─── Save ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /history`.
#[derive(Debug, Deserialize)]
pub struct SaveBody {
  pub text:           String,
  pub label:          String,
  pub confidence:     f64,
  pub positive_score: Option<f64>,
  pub negative_score: Option<f64>,
}

impl From<SaveBody> for NewAnalysis {
  fn from(b: SaveBody) -> Self {
    NewAnalysis {
      text:           b.text,
      label:          b.label,
      confidence:     b.confidence,
      positive_score: b.positive_score,
      negative_score: b.negative_score,
    }
  }
}

/// `POST /history` returns 201 with the stored [`AnalysisRecord`].
pub async fn save<C, S>(
  State(state): State<ApiState<C, S>>,
  Json(body): Json<SaveBody>,
) -> Result<impl IntoResponse, ApiError>
where
  C: Classifier + 'static,
  S: HistoryStore + 'static,
{
  let record = state.history.save_record(NewAnalysis::from(body)).await?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /history/{id}`
pub async fn get_one<C, S>(
  State(state): State<ApiState<C, S>>,
  Path(id): Path<i64>,
) -> Result<Json<AnalysisRecord>, ApiError>
where
  C: Classifier + 'static,
  S: HistoryStore + 'static,
{
  match state.history.lookup(id).await {
    Lookup::Found(record) => Ok(Json(record)),
    Lookup::NotFound => Err(ApiError::NotFound(format!("analysis {id} not found"))),
    Lookup::ReadFailed => Err(ApiError::Internal(format!("failed to read analysis {id}"))),
  }
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /history/{id}`
pub async fn delete_one<C, S>(
  State(state): State<ApiState<C, S>>,
  Path(id): Path<i64>,
) -> Json<bool>
where
  C: Classifier + 'static,
  S: HistoryStore + 'static,
{
  Json(state.history.delete_record(id).await)
}
