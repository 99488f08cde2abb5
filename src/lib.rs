//! Explains raw Ethereum legacy transactions byte by byte.

pub mod api;
pub mod config;
pub mod etherscan;
pub mod splain;

use crate::config::AppConfig;
use crate::etherscan::ExplorerClient;

#[derive(Clone)]
pub struct AppState {
    pub settings: AppConfig,
    pub explorer: ExplorerClient,
}

impl AppState {
    pub fn new(settings: AppConfig) -> anyhow::Result<Self> {
        let explorer = ExplorerClient::new(&settings.explorer_base_url, settings.fetch_timeout)?;
        Ok(Self { settings, explorer })
    }
}
