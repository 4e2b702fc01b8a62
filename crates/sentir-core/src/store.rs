//! The `HistoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `sentir-store-sqlite`).
//! Every method is a single round trip: nothing is held across calls, and
//! errors are reported faithfully. Masking read failures is the job of
//! [`crate::history::History`], not of the backend.

use std::future::Future;

use crate::record::{AnalysisRecord, NewAnalysis};

/// Abstraction over a relational analysis-history backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait HistoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create the backing table if it does not exist. Idempotent.
  fn bootstrap(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Normalise `input`, insert it, and return the row as stored.
  ///
  /// The read-back comes from the insert itself, never from a second query.
  fn save(
    &self,
    input: NewAnalysis,
  ) -> impl Future<Output = Result<AnalysisRecord, Self::Error>> + Send + '_;

  /// Up to `limit` records, newest first (`created_at DESC, id DESC`).
  fn list(
    &self,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<AnalysisRecord>, Self::Error>> + Send + '_;

  /// Records whose text contains `substring`, ignoring case; same ordering
  /// and limit semantics as [`HistoryStore::list`].
  fn search<'a>(
    &'a self,
    substring: &'a str,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<AnalysisRecord>, Self::Error>> + Send + 'a;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<AnalysisRecord>, Self::Error>> + Send + '_;

  /// Delete a record by id. Returns `true` iff a row was removed.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
