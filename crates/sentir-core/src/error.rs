//! Error types for `sentir-core`.

use std::time::Duration;

use thiserror::Error;

/// A boxed error from a backend or inference engine.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The failure taxonomy shared by every exposed operation.
///
/// Reads never surface these: a failed list, search, lookup or delete is
/// collapsed into an empty result by [`crate::history::History`].
#[derive(Debug, Error)]
pub enum Error {
  /// Caller input was rejected before any side effect.
  #[error("invalid input: {0}")]
  Validation(String),

  /// The classifier failed or returned no usable result.
  #[error("inference failed: {0}")]
  Inference(#[source] BoxError),

  /// A write against the history store could not complete.
  #[error("persistence failed: {0}")]
  Persistence(#[source] BoxError),

  #[error("{stage} did not finish within {deadline:?}")]
  Timeout {
    stage:    &'static str,
    deadline: Duration,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
