//! Score derivation: the complementary positive/negative pair.

/// Number of fractional digits kept for every stored score.
pub const SCORE_SCALE: i32 = 4;

/// Compute the `(positive, negative)` pair for a classification.
///
/// When both scores are supplied they are returned untouched, even if they do
/// not sum to one. Otherwise both are derived from `confidence`: the score
/// matching `label` (compared case-insensitively against `POSITIVE`) equals
/// `confidence` and the other is its complement. Any label other than
/// `POSITIVE` is treated as negative.
pub fn derive(
  label: &str,
  confidence: f64,
  positive: Option<f64>,
  negative: Option<f64>,
) -> (f64, f64) {
  if let (Some(positive), Some(negative)) = (positive, negative) {
    return (positive, negative);
  }

  if label.eq_ignore_ascii_case("POSITIVE") {
    (confidence, 1.0 - confidence)
  } else {
    (1.0 - confidence, confidence)
  }
}

/// Round a score to [`SCORE_SCALE`] fractional digits.
pub fn round_score(value: f64) -> f64 {
  let factor = 10f64.powi(SCORE_SCALE);
  (value * factor).round() / factor
}
