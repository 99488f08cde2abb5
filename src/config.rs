use anyhow::{Context, Result};
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt};

use crate::splain::Mode;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: Ipv4Addr,
    pub port: u16,
    pub explorer_base_url: String,
    pub fetch_timeout: Duration,
    /// Reject non-canonical encodings and trailing bytes for every request.
    pub strict: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("APP_PORT").unwrap_or_else(|_| "8080".to_string());
        let explorer_base_url = std::env::var("ETHERSCAN_BASE_URL")
            .unwrap_or_else(|_| "https://etherscan.io".to_string());
        let fetch_timeout =
            std::env::var("FETCH_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string());
        let strict = std::env::var("SPLAIN_STRICT").unwrap_or_else(|_| "false".to_string());

        Ok(Self {
            host: host
                .parse()
                .context("APP_HOST must be a valid IPv4 address")?,
            port: port.parse().context("APP_PORT must be a valid u16")?,
            explorer_base_url,
            fetch_timeout: Duration::from_secs(
                fetch_timeout
                    .parse()
                    .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            strict: parse_flag(&strict).context("SPLAIN_STRICT must be true or false")?,
        })
    }

    pub fn mode(&self) -> Mode {
        if self.strict {
            Mode::Strict
        } else {
            Mode::Lenient
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => anyhow::bail!("unrecognized flag value {:?}", other),
    }
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = std::env::var("LOG_JSON")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if use_json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}
