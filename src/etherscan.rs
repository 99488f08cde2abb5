//! Best-effort lookup of a raw transaction by hash.
//!
//! The explorer has no API for raw transactions, so the page is fetched and
//! scanned line by line for something that looks like a hex-encoded
//! transaction.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Inputs shorter than this are treated as hashes, not raw transactions.
pub const MIN_RAW_TX_LEN: usize = 100;
const MAX_RAW_TX_LEN: usize = 500;

#[derive(Clone, Debug)]
pub struct ExplorerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build explorer HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_raw_tx(&self, tx_hash: &str) -> Result<Option<String>> {
        let url = format!("{}/getRawTx", self.base_url);
        let page = self
            .client
            .get(&url)
            .query(&[("tx", tx_hash)])
            .send()
            .await
            .with_context(|| format!("failed to request {}", url))?
            .error_for_status()
            .with_context(|| format!("explorer rejected lookup of {}", tx_hash))?
            .text()
            .await
            .context("failed to read explorer response body")?;

        let raw = extract_raw_tx(&page);
        debug!(tx_hash, found = raw.is_some(), page_bytes = page.len(), "scanned explorer page");
        Ok(raw)
    }

    /// Like [`fetch_raw_tx`](Self::fetch_raw_tx), but network failures count as "not found".
    pub async fn resolve(&self, tx_hash: &str) -> Option<String> {
        match self.fetch_raw_tx(tx_hash).await {
            Ok(raw) => raw,
            Err(error) => {
                warn!(tx_hash, error = %format!("{error:#}"), "raw transaction lookup failed");
                None
            }
        }
    }
}

/// Returns the first `0x...` run (up to the end of its line) that has a
/// plausible transaction length and is valid hex.
pub fn extract_raw_tx(page: &str) -> Option<String> {
    page.split('\n')
        .filter_map(|line| line.find("0x").map(|start| &line[start..]))
        .filter(|candidate| candidate.len() > MIN_RAW_TX_LEN && candidate.len() < MAX_RAW_TX_LEN)
        .map(str::trim)
        .find(|candidate| hex::decode(candidate[2..].trim()).is_ok())
        .map(str::to_string)
}
