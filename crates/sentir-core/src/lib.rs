//! Core types and trait definitions for the Sentir sentiment history service.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::HistoryStore`], inference engines implement
//! [`classify::Classifier`], and the [`pipeline::Pipeline`] ties the two
//! together.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod classify;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod record;
pub mod scores;
pub mod store;

pub use error::{BoxError, Error, Result};
