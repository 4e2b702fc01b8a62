//! JSON REST API for Sentir.
//!
//! Exposes an axum [`Router`] backed by any [`Classifier`] and
//! [`HistoryStore`]. CORS, tracing, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", sentir_api::api_router(pipeline, history))
//! ```

pub mod classify;
pub mod error;
pub mod health;
pub mod history;

use axum::{
  Router,
  routing::{get, post},
};
use sentir_core::{
  classify::Classifier, history::History, pipeline::Pipeline,
  store::HistoryStore,
};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<C, S> {
  pub pipeline: Pipeline<C, S>,
  pub history:  History<S>,
}

impl<C, S> Clone for ApiState<C, S> {
  fn clone(&self) -> Self {
    Self {
      pipeline: self.pipeline.clone(),
      history:  self.history.clone(),
    }
  }
}

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<C, S>(pipeline: Pipeline<C, S>, history: History<S>) -> Router<()>
where
  C: Classifier + 'static,
  S: HistoryStore + 'static,
{
  Router::new()
    .route("/health", get(health::handler))
    .route("/classify", post(classify::handler::<C, S>))
    .route("/history", get(history::list::<C, S>).post(history::save::<C, S>))
    .route("/history/search", get(history::search::<C, S>))
    .route(
      "/history/{id}",
      get(history::get_one::<C, S>).delete(history::delete_one::<C, S>),
    )
    .with_state(ApiState { pipeline, history })
}

// ─── Integration tests ────────────────────────────────────────────────────────
