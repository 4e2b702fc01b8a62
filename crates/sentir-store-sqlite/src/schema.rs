//! SQL schema for the Sentir SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
///
/// Scores are stored as REAL already quantised to four fractional digits by
/// the encoder. `AUTOINCREMENT` keeps ids from being reused after a delete.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS text_analysis_results (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    text             TEXT NOT NULL CHECK (length(text) > 0),
    sentiment_label  TEXT NOT NULL,   -- always uppercase
    confidence_score REAL NOT NULL,
    positive_score   REAL,
    negative_score   REAL,
    created_at       TEXT NOT NULL    -- RFC 3339 UTC, fixed microsecond width
);

CREATE INDEX IF NOT EXISTS text_analysis_results_recent_idx
    ON text_analysis_results(created_at DESC, id DESC);
";
