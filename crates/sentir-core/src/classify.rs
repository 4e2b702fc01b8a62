//! The classification capability consumed by the pipeline.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// A single classifier verdict: the chosen label and its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
  pub label:      String,
  pub confidence: f64,
}

/// A binary sentiment classifier.
///
/// Implementations are expected to be expensive to construct (model loading,
/// HTTP client setup) and cheap to call, so a single instance is built at
/// startup and shared behind an `Arc`.
pub trait Classifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Classify `text`, returning exactly one verdict.
  fn classify<'a>(
    &'a self,
    text: &'a str,
  ) -> impl Future<Output = Result<Classification, Self::Error>> + Send + 'a;
}
