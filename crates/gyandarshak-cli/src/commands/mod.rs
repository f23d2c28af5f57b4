//! Subcommand implementations.

pub mod account;
pub mod ask;
pub mod catalog;
pub mod init;
pub mod sessions;
pub mod tests;

use std::path::PathBuf;

use anyhow::Result;
use gyandarshak_client::{load_config_from, ClientConfig, HttpClient};

/// Configuration and client shared by every networked command.
pub struct Context {
    pub config: ClientConfig,
    pub api: HttpClient,
}

impl Context {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let api = HttpClient::from_config(&config)?;
        tracing::debug!(base_url = %config.base_url, "client ready");
        Ok(Self { config, api })
    }
}

/// Placeholder for missing optional values in tables.
pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "—",
    }
}

/// Report an API failure with the message the server gave.
pub fn api_error(e: gyandarshak_core::ApiError) -> anyhow::Error {
    tracing::debug!(error = %e, "request failed");
    anyhow::Error::msg(e.user_message())
}
