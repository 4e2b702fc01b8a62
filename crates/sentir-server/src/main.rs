//! sentir server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! history store, builds the configured classifier once, and serves the JSON
//! API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use sentir_core::{history::History, pipeline::Pipeline, store::HistoryStore as _};
use sentir_server::{ServerConfig, build_classifier, expand_tilde};
use sentir_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Sentir sentiment analysis server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .context("failed to load server configuration")?;

  let db_path = expand_tilde(&server_cfg.database_path);
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;

  // A failed bootstrap is logged, not fatal; later calls surface the error.
  if let Err(e) = store.bootstrap().await {
    tracing::error!(error = %e, "failed to create analysis history table");
  }
  let store = Arc::new(store);

  let classifier = build_classifier(&server_cfg.classifier)
    .context("failed to build classifier")?;
  tracing::info!(classifier = classifier.kind(), "classifier ready");

  let deadline = server_cfg.request_deadline();
  let pipeline = Pipeline::new(Arc::new(classifier), Arc::clone(&store))
    .with_deadline(deadline);
  let history = History::new(store).with_deadline(deadline);
  let app = sentir_server::app(pipeline, history);

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
