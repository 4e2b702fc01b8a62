//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed microsecond width so
//! that lexical order in SQL matches chronological order. Scores are rounded
//! to the column scale before they are written.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::functions::FunctionFlags;
use sentir_core::{
  record::{AnalysisRecord, SentimentLabel},
  scores,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Scores ──────────────────────────────────────────────────────────────────

pub fn encode_score(score: f64) -> f64 { scores::round_score(score) }

// ─── Search ──────────────────────────────────────────────────────────────────

/// Lower-case with full Unicode rules. SQLite's own `lower()` and `LIKE`
/// fold ASCII only.
pub fn fold_case(s: &str) -> String { s.to_lowercase() }

/// Register `sentir_fold(text)`, the SQL face of [`fold_case`], on `conn`.
pub fn register_fold(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "sentir_fold",
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let text: Option<String> = ctx.get(0)?;
      Ok(text.map(|t| fold_case(&t)))
    },
  )
}

/// Build a `LIKE` pattern matching `needle` anywhere, with `%`, `_` and the
/// escape character itself matched literally (`ESCAPE '\'`).
pub fn encode_like_pattern(needle: &str) -> String {
  let mut pattern = String::with_capacity(needle.len() + 2);
  pattern.push('%');
  for c in needle.chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `text_analysis_results` row.
pub struct RawRecord {
  pub id:               i64,
  pub text:             String,
  pub sentiment_label:  String,
  pub confidence_score: f64,
  pub positive_score:   Option<f64>,
  pub negative_score:   Option<f64>,
  pub created_at:       String,
}

impl RawRecord {
  /// Map a row selected with the canonical column order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      text:             row.get(1)?,
      sentiment_label:  row.get(2)?,
      confidence_score: row.get(3)?,
      positive_score:   row.get(4)?,
      negative_score:   row.get(5)?,
      created_at:       row.get(6)?,
    })
  }

  /// Rows written by other tools may lack scores; those are derived the same
  /// way a save would derive them.
  pub fn into_record(self) -> Result<AnalysisRecord> {
    let (positive_score, negative_score) = scores::derive(
      &self.sentiment_label,
      self.confidence_score,
      self.positive_score,
      self.negative_score,
    );

    Ok(AnalysisRecord {
      id: self.id,
      text: self.text,
      sentiment_label: SentimentLabel::from(self.sentiment_label),
      confidence_score: self.confidence_score,
      positive_score,
      negative_score,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
