//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use sentir_core::{
  history::{History, Lookup},
  record::{NewAnalysis, SentimentLabel},
  store::HistoryStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn analysis(text: &str) -> NewAnalysis { NewAnalysis::new(text, "POSITIVE", 0.9) }

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn bootstrap_is_idempotent() {
  let s = store().await;
  s.bootstrap().await.unwrap();
  s.bootstrap().await.unwrap();
  s.save(analysis("still works")).await.unwrap();
}

#[tokio::test]
async fn save_before_bootstrap_fails() {
  let s = SqliteStore::open(":memory:").await.unwrap();
  assert!(s.save(analysis("no table yet")).await.is_err());
}

// ─── Save ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_then_get_returns_identical_record() {
  let s = store().await;

  let saved = s.save(NewAnalysis::new("I love this product", "POSITIVE", 0.98)).await.unwrap();
  let fetched = s.get(saved.id).await.unwrap().unwrap();

  assert_eq!(fetched, saved);
}

#[tokio::test]
async fn save_derives_complementary_scores() {
  let s = store().await;

  let saved = s.save(NewAnalysis::new("I love this product", "POSITIVE", 0.98)).await.unwrap();

  assert_eq!(saved.sentiment_label, SentimentLabel::Positive);
  assert_eq!(saved.confidence_score, 0.98);
  assert_eq!(saved.positive_score, 0.98);
  assert_eq!(saved.negative_score, 0.02);
}

#[tokio::test]
async fn save_uppercases_label() {
  let s = store().await;

  let saved = s.save(NewAnalysis::new("could be better", "negative", 0.8)).await.unwrap();
  assert_eq!(saved.sentiment_label, SentimentLabel::Negative);
  assert_eq!(saved.negative_score, 0.8);

  let other = s.save(NewAnalysis::new("hmm", "Mixed", 0.5)).await.unwrap();
  assert_eq!(other.sentiment_label.as_str(), "MIXED");
}

#[tokio::test]
async fn save_keeps_supplied_scores() {
  let s = store().await;

  let saved = s
    .save(NewAnalysis::new("odd", "POSITIVE", 0.9).with_scores(0.4, 0.4))
    .await
    .unwrap();

  assert_eq!((saved.positive_score, saved.negative_score), (0.4, 0.4));
}

#[tokio::test]
async fn scores_are_stored_with_four_fractional_digits() {
  let s = store().await;

  let saved = s.save(NewAnalysis::new("precise", "POSITIVE", 0.123_456_7)).await.unwrap();

  assert_eq!(saved.confidence_score, 0.1235);
  assert_eq!(saved.positive_score, 0.1235);
  assert_eq!(saved.negative_score, 0.8765);
}

#[tokio::test]
async fn empty_text_violates_constraint() {
  let s = store().await;
  assert!(s.save(analysis("")).await.is_err());
  assert!(s.list(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn ids_increase_and_are_not_reused() {
  let s = store().await;

  let first = s.save(analysis("one")).await.unwrap();
  let second = s.save(analysis("two")).await.unwrap();
  assert!(second.id > first.id);

  assert!(s.delete(second.id).await.unwrap());
  let third = s.save(analysis("three")).await.unwrap();
  assert!(third.id > second.id);
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_store_returns_nothing() {
  let s = store().await;
  assert!(s.list(20).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_newest_first_up_to_limit() {
  let s = store().await;
  let mut ids = Vec::new();
  for n in 0..5 {
    ids.push(s.save(analysis(&format!("entry {n}"))).await.unwrap().id);
  }

  let recent = s.list(3).await.unwrap();

  assert_eq!(recent.len(), 3);
  let got: Vec<i64> = recent.iter().map(|r| r.id).collect();
  assert_eq!(got, vec![ids[4], ids[3], ids[2]]);
  assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn list_breaks_timestamp_ties_by_descending_id() {
  let s = store().await;
  let older = s.insert_at("older", "2024-05-01T11:00:00.000000Z").await.unwrap();
  let first = s.insert_at("tie one", "2024-05-01T12:00:00.000000Z").await.unwrap();
  let second = s.insert_at("tie two", "2024-05-01T12:00:00.000000Z").await.unwrap();

  let got: Vec<i64> = s.list(10).await.unwrap().iter().map(|r| r.id).collect();
  assert_eq!(got, vec![second, first, older]);

  let top: Vec<i64> = s.list(1).await.unwrap().iter().map(|r| r.id).collect();
  assert_eq!(top, vec![second]);
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_matches_substring_ignoring_case() {
  let s = store().await;
  s.save(analysis("A great XYZ day")).await.unwrap();
  s.save(analysis("nothing to see")).await.unwrap();
  s.save(analysis("lowercase xyz here")).await.unwrap();

  let hits = s.search("xyz", 20).await.unwrap();

  assert_eq!(hits.len(), 2);
  assert!(hits.iter().all(|r| r.text.to_lowercase().contains("xyz")));
  assert_eq!(hits[0].text, "lowercase xyz here");
}

#[tokio::test]
async fn search_ignores_case_beyond_ascii() {
  let s = store().await;
  s.save(analysis("Ich liebe dieses CAFÉ")).await.unwrap();
  s.save(analysis("ÜBER alles")).await.unwrap();
  s.save(analysis("plain cafe")).await.unwrap();

  let cafe = s.search("café", 20).await.unwrap();
  assert_eq!(cafe.len(), 1);
  assert_eq!(cafe[0].text, "Ich liebe dieses CAFÉ");

  let uber = s.search("über", 20).await.unwrap();
  assert_eq!(uber.len(), 1);
  assert_eq!(uber[0].text, "ÜBER alles");

  let upper_needle = s.search("ÜBER", 20).await.unwrap();
  assert_eq!(upper_needle.len(), 1);
}

#[tokio::test]
async fn search_breaks_timestamp_ties_by_descending_id() {
  let s = store().await;
  let first = s.insert_at("same moment A", "2024-05-01T12:00:00.000000Z").await.unwrap();
  let second = s.insert_at("same moment B", "2024-05-01T12:00:00.000000Z").await.unwrap();
  s.insert_at("unrelated", "2024-05-01T12:00:00.000000Z").await.unwrap();

  let got: Vec<i64> = s
    .search("same moment", 10)
    .await
    .unwrap()
    .iter()
    .map(|r| r.id)
    .collect();
  assert_eq!(got, vec![second, first]);
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let s = store().await;
  s.save(analysis("100% sure")).await.unwrap();
  s.save(analysis("1000 sure")).await.unwrap();
  s.save(analysis("snake_case")).await.unwrap();
  s.save(analysis("snakeXcase")).await.unwrap();

  let percent = s.search("0%", 20).await.unwrap();
  assert_eq!(percent.len(), 1);
  assert_eq!(percent[0].text, "100% sure");

  let underscore = s.search("e_c", 20).await.unwrap();
  assert_eq!(underscore.len(), 1);
  assert_eq!(underscore[0].text, "snake_case");
}

#[tokio::test]
async fn search_respects_limit() {
  let s = store().await;
  for n in 0..4 {
    s.save(analysis(&format!("match {n}"))).await.unwrap();
  }

  let hits = s.search("match", 2).await.unwrap();
  assert_eq!(hits.len(), 2);
  assert_eq!(hits[0].text, "match 3");
}

// ─── Get / delete ────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_removes_record() {
  let s = store().await;
  let saved = s.save(analysis("short lived")).await.unwrap();

  assert!(s.delete(saved.id).await.unwrap());
  assert!(s.get(saved.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete(9999).await.unwrap());
}

// ─── Masked reads ────────────────────────────────────────────────────────────

#[tokio::test]
async fn broken_table_surfaces_errors_from_the_store() {
  let s = store().await;
  s.drop_table().await.unwrap();

  assert!(s.list(10).await.is_err());
  assert!(s.search("x", 10).await.is_err());
  assert!(s.get(1).await.is_err());
  assert!(s.delete(1).await.is_err());
}

#[tokio::test]
async fn history_masks_read_failures_but_not_write_failures() {
  let s = store().await;
  let saved = s.save(analysis("before the outage")).await.unwrap();
  s.drop_table().await.unwrap();

  let history = History::new(Arc::new(s));

  assert!(history.list_history(10).await.is_empty());
  assert!(history.search_history("outage", 10).await.is_empty());
  assert_eq!(history.lookup(saved.id).await, Lookup::ReadFailed);
  assert_eq!(history.get_record(saved.id).await, None);
  assert!(!history.delete_record(saved.id).await);
  assert!(history.save_record(analysis("after")).await.is_err());
}
