//! [`AnyClassifier`]: a classifier chosen at startup from configuration.

use sentir_core::classify::{Classification, Classifier};

use crate::{HttpClassifier, LexiconClassifier, Result};

pub enum AnyClassifier {
  Lexicon(LexiconClassifier),
  Http(HttpClassifier),
}

impl AnyClassifier {
  /// Short name of the active engine, for logs.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Lexicon(_) => "lexicon",
      Self::Http(_) => "http",
    }
  }
}

impl Classifier for AnyClassifier {
  type Error = crate::Error;

  async fn classify(&self, text: &str) -> Result<Classification> {
    match self {
      Self::Lexicon(lexicon) => Ok(lexicon.verdict(text)),
      Self::Http(http) => http.classify(text).await,
    }
  }
}
