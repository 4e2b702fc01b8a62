//! [`SqliteStore`]: the SQLite implementation of [`HistoryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use sentir_core::{
  record::{AnalysisRecord, NewAnalysis},
  store::HistoryStore,
};

use crate::{
  Error, Result,
  encode::{
    RawRecord, encode_dt, encode_like_pattern, encode_score, fold_case,
    register_fold,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An analysis history backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every
/// operation is one `call` on the connection thread; no statement or
/// transaction outlives the operation that opened it.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a database at `path`.
  ///
  /// The table is not created here; run [`HistoryStore::bootstrap`] once at
  /// startup.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::with_functions(conn).await
  }

  /// Open a bootstrapped in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self::with_functions(conn).await?;
    store.bootstrap().await?;
    Ok(store)
  }

  async fn with_functions(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        register_fold(conn)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }

  /// Drop the history table so that every subsequent statement fails.
  #[cfg(test)]
  pub(crate) async fn drop_table(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch("DROP TABLE text_analysis_results")?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Test helpers ────────────────────────────────────────────────────────────

#[cfg(test)]
impl SqliteStore {
  /// Insert a row with a caller-chosen `created_at`, bypassing the clock.
  pub(crate) async fn insert_at(&self, text: &str, created_at: &str) -> Result<i64> {
    let text = text.to_owned();
    let created_at = created_at.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO text_analysis_results (
             text, sentiment_label, confidence_score,
             positive_score, negative_score, created_at
           ) VALUES (?1, 'POSITIVE', 0.9, 0.9, 0.1, ?2)
           RETURNING id",
          rusqlite::params![text, created_at],
          |row| row.get::<_, i64>(0),
        )?)
      })
      .await?;
    Ok(id)
  }
}

// ─── HistoryStore impl ───────────────────────────────────────────────────────

impl HistoryStore for SqliteStore {
  type Error = Error;

  async fn bootstrap(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn save(&self, input: NewAnalysis) -> Result<AnalysisRecord> {
    let row = input.normalize();

    let text           = row.text;
    let label          = String::from(row.label);
    let confidence     = encode_score(row.confidence);
    let positive_score = encode_score(row.positive_score);
    let negative_score = encode_score(row.negative_score);
    let created_at     = encode_dt(Utc::now());

    let raw: RawRecord = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO text_analysis_results (
             text, sentiment_label, confidence_score,
             positive_score, negative_score, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           RETURNING id, text, sentiment_label, confidence_score,
                     positive_score, negative_score, created_at",
          rusqlite::params![
            text,
            label,
            confidence,
            positive_score,
            negative_score,
            created_at,
          ],
          RawRecord::from_row,
        )?)
      })
      .await?;

    raw.into_record()
  }

  async fn list(&self, limit: u32) -> Result<Vec<AnalysisRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, text, sentiment_label, confidence_score,
                  positive_score, negative_score, created_at
           FROM text_analysis_results
           ORDER BY created_at DESC, id DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![i64::from(limit)], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn search(&self, substring: &str, limit: u32) -> Result<Vec<AnalysisRecord>> {
    // Both sides are folded so case is ignored beyond ASCII.
    let pattern = encode_like_pattern(&fold_case(substring));

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, text, sentiment_label, confidence_score,
                  positive_score, negative_score, created_at
           FROM text_analysis_results
           WHERE sentir_fold(text) LIKE ?1 ESCAPE '\\'
           ORDER BY created_at DESC, id DESC
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![pattern, i64::from(limit)],
            RawRecord::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn get(&self, id: i64) -> Result<Option<AnalysisRecord>> {
    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, text, sentiment_label, confidence_score,
                    positive_score, negative_score, created_at
             FROM text_analysis_results
             WHERE id = ?1",
            rusqlite::params![id],
            RawRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM text_analysis_results WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }
}
