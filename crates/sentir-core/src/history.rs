//! The history facade exposed to the boundary layer.
//!
//! Writes propagate their errors. Reads do not: a failed list or
//! search yields an empty sequence, a failed lookup yields "absent", and a
//! failed delete yields `false`.
//! The failure is still logged, and [`History::lookup`] keeps "not found" and
//! "read failed" apart for callers that want to tell them apart.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::timeout;
use tracing::{info, warn};

use crate::{
  Error, Result,
  pipeline::DEFAULT_DEADLINE,
  record::{AnalysisRecord, NewAnalysis},
  store::HistoryStore,
};

/// Outcome of a single-record read.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
  Found(AnalysisRecord),
  NotFound,
  ReadFailed,
}

impl Lookup {
  /// Collapse `NotFound` and `ReadFailed` into `None`.
  pub fn into_option(self) -> Option<AnalysisRecord> {
    match self {
      Self::Found(record) => Some(record),
      Self::NotFound | Self::ReadFailed => None,
    }
  }
}

/// Listing, search, retrieval, deletion and explicit saves over a
/// [`HistoryStore`].
///
/// Every store call is bounded by the facade's deadline. A read that runs out
/// of time is masked like any other read failure; a save that runs out of
/// time is a [`Error::Timeout`].
pub struct History<S> {
  store:    Arc<S>,
  deadline: Duration,
}

impl<S> Clone for History<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      deadline: self.deadline,
    }
  }
}

impl<S: HistoryStore> History<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      deadline: DEFAULT_DEADLINE,
    }
  }

  pub fn with_deadline(mut self, deadline: Duration) -> Self {
    self.deadline = deadline;
    self
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn deadline(&self) -> Duration { self.deadline }

  /// Run one store call under the deadline, folding both failure modes into
  /// [`Error`].
  async fn bounded<T>(
    &self,
    stage: &'static str,
    op: impl Future<Output = Result<T, S::Error>>,
  ) -> Result<T> {
    timeout(self.deadline, op)
      .await
      .map_err(|_| Error::Timeout {
        stage,
        deadline: self.deadline,
      })?
      .map_err(|e| Error::Persistence(Box::new(e)))
  }

  /// Persist an explicitly supplied analysis.
  ///
  /// On [`Error::Timeout`] the insert may still have been applied.
  pub async fn save_record(&self, input: NewAnalysis) -> Result<AnalysisRecord> {
    let record = self.bounded("persistence", self.store.save(input)).await?;
    info!(id = record.id, "analysis saved to history");
    Ok(record)
  }

  pub async fn list_history(&self, limit: u32) -> Vec<AnalysisRecord> {
    match self.bounded("history read", self.store.list(limit)).await {
      Ok(records) => records,
      Err(e) => {
        warn!(error = %e, limit, "failed to list analysis history");
        Vec::new()
      }
    }
  }

  pub async fn search_history(
    &self,
    substring: &str,
    limit: u32,
  ) -> Vec<AnalysisRecord> {
    match self
      .bounded("history read", self.store.search(substring, limit))
      .await
    {
      Ok(records) => records,
      Err(e) => {
        warn!(error = %e, substring, limit, "failed to search analysis history");
        Vec::new()
      }
    }
  }

  pub async fn lookup(&self, id: i64) -> Lookup {
    match self.bounded("history read", self.store.get(id)).await {
      Ok(Some(record)) => Lookup::Found(record),
      Ok(None) => Lookup::NotFound,
      Err(e) => {
        warn!(error = %e, id, "failed to fetch analysis");
        Lookup::ReadFailed
      }
    }
  }

  pub async fn get_record(&self, id: i64) -> Option<AnalysisRecord> {
    self.lookup(id).await.into_option()
  }

  /// `false` when `id` does not exist, when the delete fails, and when it
  /// does not finish in time.
  pub async fn delete_record(&self, id: i64) -> bool {
    match self.bounded("deletion", self.store.delete(id)).await {
      Ok(removed) => removed,
      Err(e) => {
        warn!(error = %e, id, "failed to delete analysis");
        false
      }
    }
  }
}
