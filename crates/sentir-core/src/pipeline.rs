//! The analysis pipeline: classify, derive scores, persist.

use std::{sync::Arc, time::Duration};

use tokio::time::{Instant, timeout};

use crate::{
  Error, Result,
  classify::Classifier,
  record::{AnalysisRecord, NewAnalysis},
  scores,
  store::HistoryStore,
};

/// Deadline applied by [`Pipeline::analyze`] unless overridden.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Orchestrates one classification end to end.
///
/// Holds the process-wide classifier handle; nothing is constructed per call.
pub struct Pipeline<C, S> {
  classifier: Arc<C>,
  store:      Arc<S>,
  deadline:   Duration,
}

impl<C, S> Clone for Pipeline<C, S> {
  fn clone(&self) -> Self {
    Self {
      classifier: Arc::clone(&self.classifier),
      store:      Arc::clone(&self.store),
      deadline:   self.deadline,
    }
  }
}

impl<C, S> Pipeline<C, S>
where
  C: Classifier,
  S: HistoryStore,
{
  pub fn new(classifier: Arc<C>, store: Arc<S>) -> Self {
    Self {
      classifier,
      store,
      deadline: DEFAULT_DEADLINE,
    }
  }

  pub fn with_deadline(mut self, deadline: Duration) -> Self {
    self.deadline = deadline;
    self
  }

  pub fn deadline(&self) -> Duration { self.deadline }

  /// Classify `text` and record the result, within the default deadline.
  pub async fn analyze(&self, text: &str) -> Result<AnalysisRecord> {
    self.analyze_within(text, self.deadline).await
  }

  /// Classify `text` and record the result.
  ///
  /// `deadline` covers the classifier call and the insert together. Nothing
  /// is persisted unless classification succeeded. The returned record has
  /// its confidence rounded to four fractional digits.
  ///
  /// A timeout in the `"persistence"` stage does not cancel an insert the
  /// store has already started. The row may be stored even though the caller
  /// receives [`Error::Timeout`].
  pub async fn analyze_within(
    &self,
    text: &str,
    deadline: Duration,
  ) -> Result<AnalysisRecord> {
    if text.trim().is_empty() {
      return Err(Error::Validation("text is required".to_owned()));
    }

    let started = Instant::now();

    let verdict = timeout(deadline, self.classifier.classify(text))
      .await
      .map_err(|_| Error::Timeout { stage: "classification", deadline })?
      .map_err(|e| Error::Inference(Box::new(e)))?;

    let (positive, negative) =
      scores::derive(&verdict.label, verdict.confidence, None, None);
    let input = NewAnalysis::new(text, verdict.label, verdict.confidence)
      .with_scores(positive, negative);

    let remaining = deadline.saturating_sub(started.elapsed());
    let mut record = timeout(remaining, self.store.save(input))
      .await
      .map_err(|_| Error::Timeout { stage: "persistence", deadline })?
      .map_err(|e| Error::Persistence(Box::new(e)))?;

    tracing::info!(
      id = record.id,
      label = %record.sentiment_label,
      "analysis saved to history"
    );

    record.confidence_score = scores::round_score(record.confidence_score);
    Ok(record)
  }
}
