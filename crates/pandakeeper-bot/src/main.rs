//! Pandakeeper bot entrypoint
//!
//! Wires the JSON repositories into the ledger store, starts the daily
//! post scheduler, and runs until interrupted.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pandakeeper::services::{DailyScheduler, LedgerStore};

use pandakeeper_bot::adapters::content::{LogPostSink, StaticContentSource};
use pandakeeper_bot::adapters::json::{
    load_config_or_default, JsonConfigRepository, JsonLedgerRepository,
};
use pandakeeper_bot::settings;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let adoption_path = settings::adoption_path();
    let config_path = settings::config_path();
    info!(ledger = %adoption_path, config = %config_path, "🐼 Pandakeeper starting");

    let config_repo = JsonConfigRepository::new(&config_path);
    let config = load_config_or_default(&config_repo).await;

    let repo = Arc::new(JsonLedgerRepository::new(&adoption_path));
    let store = Arc::new(LedgerStore::open(repo).await);
    let available = store.read(|ledger| ledger.available_pandas().len()).await;
    info!(available, "🎋 Catalog ready");

    let scheduler = DailyScheduler::new(
        config,
        Arc::new(StaticContentSource::default()),
        Arc::new(LogPostSink),
    )
    .start();

    tokio::signal::ctrl_c().await?;
    info!("👋 Shutting down");
    scheduler.abort();
    Ok(())
}
