//! [`LexiconClassifier`]: an offline, rule-based binary classifier.
//!
//! Each sentiment word carries a weight. A preceding intensifier scales the
//! weight, and a negation within the two preceding words flips it at reduced
//! strength. The net score is squashed through a logistic curve into a
//! confidence in `[0.5, 1)` for whichever label it favours; a text with no
//! sentiment words comes out `POSITIVE` at exactly 0.5.

use std::{collections::HashMap, convert::Infallible};

use sentir_core::classify::{Classification, Classifier};

const POSITIVE_WORDS: &[(&str, f64)] = &[
  ("good", 1.0),
  ("great", 1.5),
  ("excellent", 2.0),
  ("amazing", 2.0),
  ("wonderful", 1.8),
  ("fantastic", 1.8),
  ("happy", 1.2),
  ("joy", 1.5),
  ("love", 2.0),
  ("loved", 2.0),
  ("like", 1.0),
  ("best", 1.5),
  ("better", 1.2),
  ("awesome", 1.8),
  ("perfect", 2.0),
  ("brilliant", 1.8),
  ("outstanding", 1.8),
  ("superb", 1.8),
  ("delightful", 1.5),
  ("pleased", 1.2),
  ("satisfied", 1.0),
  ("excited", 1.5),
  ("thrilled", 1.8),
  ("grateful", 1.5),
  ("recommend", 1.2),
  ("nice", 1.0),
  ("enjoy", 1.2),
  ("enjoyed", 1.2),
  ("fun", 1.0),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
  ("bad", -1.0),
  ("terrible", -2.0),
  ("awful", -2.0),
  ("horrible", -2.0),
  ("worst", -2.0),
  ("hate", -2.0),
  ("hated", -2.0),
  ("dislike", -1.0),
  ("poor", -1.2),
  ("disappointing", -1.5),
  ("disappointed", -1.5),
  ("sad", -1.2),
  ("angry", -1.5),
  ("upset", -1.2),
  ("frustrated", -1.5),
  ("annoyed", -1.2),
  ("disgusting", -1.8),
  ("miserable", -1.8),
  ("useless", -1.5),
  ("worthless", -1.8),
  ("broken", -1.2),
  ("boring", -1.2),
  ("waste", -1.5),
  ("slow", -0.8),
];

const INTENSIFIERS: &[(&str, f64)] = &[
  ("very", 1.5),
  ("extremely", 2.0),
  ("incredibly", 2.0),
  ("absolutely", 2.0),
  ("completely", 1.8),
  ("totally", 1.8),
  ("really", 1.3),
  ("so", 1.2),
  ("quite", 1.2),
  ("somewhat", 0.8),
  ("slightly", 0.7),
  ("barely", 0.5),
];

const NEGATIONS: &[&str] = &[
  "not", "no", "never", "none", "nothing", "neither", "nor", "don't",
  "doesn't", "didn't", "isn't", "wasn't", "can't", "won't",
];

/// Factor applied to a negated sentiment word after flipping its sign.
const NEGATION_DAMPING: f64 = 0.8;

/// Word-list sentiment classifier. Build once and share.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
  weights:      HashMap<&'static str, f64>,
  intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconClassifier {
  fn default() -> Self { Self::new() }
}

impl LexiconClassifier {
  pub fn new() -> Self {
    Self {
      weights:      POSITIVE_WORDS.iter().chain(NEGATIVE_WORDS).copied().collect(),
      intensifiers: INTENSIFIERS.iter().copied().collect(),
    }
  }

  /// Net sentiment of `text`; positive favours `POSITIVE`.
  pub fn score(&self, text: &str) -> f64 {
    let words: Vec<String> = text
      .split(|c: char| !(c.is_alphanumeric() || c == '\''))
      .filter(|w| !w.is_empty())
      .map(str::to_lowercase)
      .collect();

    let mut total = 0.0;
    for (i, word) in words.iter().enumerate() {
      let Some(&weight) = self.weights.get(word.as_str()) else {
        continue;
      };

      let mut sentiment = weight;
      if let Some(&factor) = i
        .checked_sub(1)
        .and_then(|prev| self.intensifiers.get(words[prev].as_str()))
      {
        sentiment *= factor;
      }

      let negated = words[i.saturating_sub(2)..i]
        .iter()
        .any(|w| NEGATIONS.contains(&w.as_str()));
      if negated {
        sentiment = -sentiment * NEGATION_DAMPING;
      }

      total += sentiment;
    }
    total
  }

  pub fn verdict(&self, text: &str) -> Classification {
    let score = self.score(text);
    let label = if score >= 0.0 { "POSITIVE" } else { "NEGATIVE" };
    Classification {
      label:      label.to_owned(),
      confidence: 1.0 / (1.0 + (-score.abs()).exp()),
    }
  }
}

impl Classifier for LexiconClassifier {
  type Error = Infallible;

  async fn classify(&self, text: &str) -> Result<Classification, Infallible> {
    Ok(self.verdict(text))
  }
}
