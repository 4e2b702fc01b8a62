//! Process wiring for the Sentir server: configuration, classifier selection,
//! and the outer HTTP stack.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use axum::Router;
use sentir_classifier::{AnyClassifier, HttpClassifier, LexiconClassifier};
use sentir_core::{
  classify::Classifier, history::History, pipeline::Pipeline,
  store::HistoryStore,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which classification engine to run, deserialised from the `classifier`
/// table.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClassifierConfig {
  /// Offline word-list classifier.
  Lexicon,
  /// Remote model behind a Hugging Face style inference endpoint.
  Http {
    endpoint:   String,
    api_token:  Option<String>,
    #[serde(default = "default_classifier_timeout_ms")]
    timeout_ms: u64,
  },
}

fn default_classifier_timeout_ms() -> u64 { 10_000 }

/// Runtime server configuration, deserialised from `config.toml` and
/// `SENTIR_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub database_path:       PathBuf,
  /// Budget for one classify-and-save round trip, and for each history call.
  pub request_deadline_ms: u64,
  pub classifier:          ClassifierConfig,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML file at `path`, and the environment.
  ///
  /// Nested keys use a double underscore, e.g.
  /// `SENTIR_CLASSIFIER__ENDPOINT`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8000_i64)?
      .set_default("database_path", "sentir.db")?
      .set_default("request_deadline_ms", 30_000_i64)?
      .set_default("classifier.kind", "lexicon")?
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("SENTIR")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  pub fn request_deadline(&self) -> Duration {
    Duration::from_millis(self.request_deadline_ms)
  }
}

// ─── Classifier ───────────────────────────────────────────────────────────────

/// Construct the process-wide classifier described by `cfg`.
pub fn build_classifier(
  cfg: &ClassifierConfig,
) -> sentir_classifier::Result<AnyClassifier> {
  Ok(match cfg {
    ClassifierConfig::Lexicon => AnyClassifier::Lexicon(LexiconClassifier::new()),
    ClassifierConfig::Http {
      endpoint,
      api_token,
      timeout_ms,
    } => AnyClassifier::Http(HttpClassifier::new(
      endpoint.clone(),
      api_token.clone(),
      Duration::from_millis(*timeout_ms),
    )?),
  })
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api/v1`, with permissive CORS
/// and request tracing.
pub fn app<C, S>(pipeline: Pipeline<C, S>, history: History<S>) -> Router
where
  C: Classifier + 'static,
  S: HistoryStore + 'static,
{
  Router::new()
    .nest("/api/v1", sentir_api::api_router(pipeline, history))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
