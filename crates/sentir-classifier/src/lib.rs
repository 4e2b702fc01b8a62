//! Sentiment classifiers implementing [`sentir_core::classify::Classifier`].
//!
//! - [`HttpClassifier`] calls a hosted text-classification model speaking the
//!   Hugging Face inference API shape.
//! - [`LexiconClassifier`] scores text offline against weighted word lists.
//!
//! [`AnyClassifier`] picks one of them at runtime.

pub mod any;
pub mod error;
pub mod http;
pub mod lexicon;

pub use any::AnyClassifier;
pub use error::{Error, Result};
pub use http::HttpClassifier;
pub use lexicon::LexiconClassifier;
