//! [`HttpClassifier`]: a client for hosted text-classification models.
//!
//! The endpoint receives `{"inputs": "<text>"}` and answers with either a flat
//! list of `{label, score}` candidates or a list holding one such list per
//! input. The highest-scoring candidate wins.

use std::time::Duration;

use reqwest::Client;
use sentir_core::classify::{Classification, Classifier};
use serde::Deserialize;
use serde_json::json;

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct Candidate {
  label: String,
  score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
  Batched(Vec<Vec<Candidate>>),
  Flat(Vec<Candidate>),
}

/// Classifier backed by a remote inference endpoint.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpClassifier {
  client:    Client,
  endpoint:  String,
  api_token: Option<String>,
}

impl HttpClassifier {
  pub fn new(
    endpoint: impl Into<String>,
    api_token: Option<String>,
    timeout: Duration,
  ) -> Result<Self> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self {
      client,
      endpoint: endpoint.into(),
      api_token,
    })
  }

  pub fn endpoint(&self) -> &str { &self.endpoint }
}

impl Classifier for HttpClassifier {
  type Error = Error;

  async fn classify(&self, text: &str) -> Result<Classification> {
    let mut req = self
      .client
      .post(&self.endpoint)
      .json(&json!({ "inputs": text }));
    if let Some(token) = &self.api_token {
      req = req.bearer_auth(token);
    }

    let body = req.send().await?.error_for_status()?.bytes().await?;
    let verdict = parse_response(&body)?;
    tracing::debug!(label = %verdict.label, confidence = verdict.confidence, "classified");
    Ok(verdict)
  }
}

fn parse_response(body: &[u8]) -> Result<Classification> {
  let candidates = match serde_json::from_slice::<InferenceResponse>(body)? {
    InferenceResponse::Batched(batches) => {
      batches.into_iter().next().unwrap_or_default()
    }
    InferenceResponse::Flat(candidates) => candidates,
  };

  candidates
    .into_iter()
    .max_by(|a, b| a.score.total_cmp(&b.score))
    .map(|best| Classification {
      label:      best.label,
      confidence: best.score,
    })
    .ok_or(Error::EmptyResponse)
}

#[cfg(test)]
mod tests {
  use axum::{Json, Router, http::HeaderMap, routing::post};
  use serde_json::Value;
  use tokio::net::TcpListener;

  use super::*;

  #[test]
  fn parses_flat_response() {
    let body = br#"[{"label":"POSITIVE","score":0.9998}]"#;
    let verdict = parse_response(body).unwrap();
    assert_eq!(verdict.label, "POSITIVE");
    assert_eq!(verdict.confidence, 0.9998);
  }

  #[test]
  fn parses_batched_response_and_picks_best() {
    let body = br#"[[{"label":"POSITIVE","score":0.1},{"label":"NEGATIVE","score":0.9}]]"#;
    let verdict = parse_response(body).unwrap();
    assert_eq!(verdict.label, "NEGATIVE");
    assert_eq!(verdict.confidence, 0.9);
  }

  #[test]
  fn empty_response_is_an_error() {
    assert!(matches!(parse_response(b"[]"), Err(Error::EmptyResponse)));
    assert!(matches!(parse_response(b"[[]]"), Err(Error::EmptyResponse)));
  }

  #[test]
  fn malformed_response_is_an_error() {
    assert!(matches!(
      parse_response(br#"{"error":"model loading"}"#),
      Err(Error::Json(_))
    ));
  }

  async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}/classify")
  }

  #[tokio::test]
  async fn posts_inputs_with_bearer_token() {
    let router = Router::new().route(
      "/classify",
      post(|headers: HeaderMap, Json(body): Json<Value>| async move {
        assert_eq!(
          headers.get("authorization").unwrap().to_str().unwrap(),
          "Bearer secret"
        );
        assert_eq!(body["inputs"], "I love this product");
        Json(json!([[{ "label": "POSITIVE", "score": 0.98 }]]))
      }),
    );
    let endpoint = serve(router).await;

    let classifier =
      HttpClassifier::new(endpoint, Some("secret".into()), Duration::from_secs(5))
        .unwrap();
    let verdict = classifier.classify("I love this product").await.unwrap();

    assert_eq!(verdict.label, "POSITIVE");
    assert_eq!(verdict.confidence, 0.98);
  }

  #[tokio::test]
  async fn server_error_status_is_an_error() {
    let router = Router::new().route(
      "/classify",
      post(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "loading") }),
    );
    let endpoint = serve(router).await;

    let classifier =
      HttpClassifier::new(endpoint, None, Duration::from_secs(5)).unwrap();

    assert!(matches!(
      classifier.classify("anything").await,
      Err(Error::Http(_))
    ));
  }
}
