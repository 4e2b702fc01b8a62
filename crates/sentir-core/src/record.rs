//! Analysis records: the sole persisted entity.
//!
//! A record is created exactly once per classification (or explicit save
//! request) and never updated afterwards. The only mutation is deletion by id.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scores;

// ─── Label ───────────────────────────────────────────────────────────────────

/// The sentiment assigned to a text, always held in uppercase.
///
/// The classifier only ever produces `POSITIVE` or `NEGATIVE`, but explicit
/// save requests may carry any label; those are kept verbatim (uppercased) in
/// [`SentimentLabel::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SentimentLabel {
  Positive,
  Negative,
  Other(String),
}

impl SentimentLabel {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Positive => "POSITIVE",
      Self::Negative => "NEGATIVE",
      Self::Other(label) => label,
    }
  }

  pub fn is_positive(&self) -> bool { matches!(self, Self::Positive) }
}

impl From<&str> for SentimentLabel {
  fn from(label: &str) -> Self {
    let upper = label.to_uppercase();
    match upper.as_str() {
      "POSITIVE" => Self::Positive,
      "NEGATIVE" => Self::Negative,
      _ => Self::Other(upper),
    }
  }
}

impl From<String> for SentimentLabel {
  fn from(label: String) -> Self { Self::from(label.as_str()) }
}

impl From<SentimentLabel> for String {
  fn from(label: SentimentLabel) -> Self {
    match label {
      SentimentLabel::Other(label) => label,
      known => known.as_str().to_owned(),
    }
  }
}

impl fmt::Display for SentimentLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── AnalysisRecord ──────────────────────────────────────────────────────────

/// One classified text and its scores, exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
  /// Server-assigned, monotonically increasing.
  pub id:               i64,
  pub text:             String,
  pub sentiment_label:  SentimentLabel,
  pub confidence_score: f64,
  pub positive_score:   f64,
  pub negative_score:   f64,
  /// Set by the store at persistence time; never changes afterwards.
  pub created_at:       DateTime<Utc>,
}

// ─── NewAnalysis ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::HistoryStore::save`].
///
/// `label` is taken as the caller supplied it; the store normalises it. `id`
/// and `created_at` are always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysis {
  pub text:           String,
  pub label:          String,
  pub confidence:     f64,
  pub positive_score: Option<f64>,
  pub negative_score: Option<f64>,
}

impl NewAnalysis {
  /// Convenience constructor with both derived scores left to the store.
  pub fn new(
    text: impl Into<String>,
    label: impl Into<String>,
    confidence: f64,
  ) -> Self {
    Self {
      text: text.into(),
      label: label.into(),
      confidence,
      positive_score: None,
      negative_score: None,
    }
  }

  pub fn with_scores(mut self, positive: f64, negative: f64) -> Self {
    self.positive_score = Some(positive);
    self.negative_score = Some(negative);
    self
  }

  /// Uppercase the label and fill in any missing scores.
  pub fn normalize(self) -> NormalizedAnalysis {
    let (positive_score, negative_score) = scores::derive(
      &self.label,
      self.confidence,
      self.positive_score,
      self.negative_score,
    );

    NormalizedAnalysis {
      text: self.text,
      label: SentimentLabel::from(self.label),
      confidence: self.confidence,
      positive_score,
      negative_score,
    }
  }
}

/// A [`NewAnalysis`] ready to be written: label normalised, scores present.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAnalysis {
  pub text:           String,
  pub label:          SentimentLabel,
  pub confidence:     f64,
  pub positive_score: f64,
  pub negative_score: f64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn labels_are_uppercased() {
    assert_eq!(SentimentLabel::from("negative"), SentimentLabel::Negative);
    assert_eq!(SentimentLabel::from("Positive"), SentimentLabel::Positive);
    assert_eq!(
      SentimentLabel::from("mixed"),
      SentimentLabel::Other("MIXED".into())
    );
  }

  #[test]
  fn label_serialises_as_plain_string() {
    let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
    assert_eq!(json, "\"NEGATIVE\"");

    let back: SentimentLabel = serde_json::from_str("\"positive\"").unwrap();
    assert_eq!(back, SentimentLabel::Positive);
  }

  #[test]
  fn normalize_derives_missing_scores() {
    let row = NewAnalysis::new("meh", "negative", 0.8).normalize();
    assert_eq!(row.label, SentimentLabel::Negative);
    assert_eq!(row.negative_score, 0.8);
    assert!((row.positive_score - 0.2).abs() < 1e-9);
  }

  #[test]
  fn normalize_keeps_supplied_scores() {
    let row = NewAnalysis::new("ok", "POSITIVE", 0.9)
      .with_scores(0.6, 0.3)
      .normalize();
    assert_eq!((row.positive_score, row.negative_score), (0.6, 0.3));
  }
}
