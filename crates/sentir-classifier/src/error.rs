//! Error type for `sentir-classifier`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("classifier returned no result")]
  EmptyResponse,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
