//! Where the CLI gets its feed from: a JSON file on disk, or DataMall.

use std::path::Path;

use anyhow::Context;
use lotwatch_datamall::DatamallClient;
use serde_json::Value;

/// Read the feed from `file` when given, otherwise fetch every page live.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if configuration
/// is invalid or lacks an `ACCOUNT_KEY`, or if the upstream request fails.
pub(crate) async fn load(file: Option<&Path>) -> anyhow::Result<Value> {
    match file {
        Some(path) => read_file(path).await,
        None => fetch_live().await,
    }
}

async fn read_file(path: &Path) -> anyhow::Result<Value> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read feed file {}", path.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("feed file {} is not valid JSON", path.display()))
}

async fn fetch_live() -> anyhow::Result<Value> {
    let config = lotwatch_core::load_app_config()?;
    let account_key = config.account_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!("ACCOUNT_KEY is not set; export it or pass --file <path>")
    })?;

    let client = DatamallClient::with_feed_url(
        account_key,
        config.feed_timeout_secs,
        &config.user_agent,
        &config.feed_url,
    )?;
    tracing::info!(feed_url = client.feed_url(), "fetching DataMall feed");
    let feed = client
        .fetch_all()
        .await
        .context("failed to fetch carpark availability")?;
    Ok(feed)
}
