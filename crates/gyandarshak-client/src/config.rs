//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gyandarshak_core::Credential;

use crate::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding `base_url`.
pub const URL_ENV: &str = "GYANDARSHAK_URL";
/// Environment variable overriding `token`.
pub const TOKEN_ENV: &str = "GYANDARSHAK_TOKEN";

/// Top-level client configuration.
///
/// Note: Custom Debug impl masks the token to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the counselling API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token from `gyandarshak login`. May be `${VAR}`.
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// The configured credential, if a non-empty token is set.
    pub fn credential(&self) -> Option<Credential> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Credential::bearer)
    }

    /// Like [`ClientConfig::credential`], but an error telling the user to log in.
    pub fn require_credential(&self) -> Result<Credential> {
        self.credential().with_context(|| {
            format!("not logged in: run `gyandarshak login` and set {TOKEN_ENV}")
        })
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `gyandarshak.toml` in the current directory
/// 2. `~/.config/gyandarshak/config.toml`
///
/// `${VAR}` references in the file are resolved, then `GYANDARSHAK_URL` and
/// `GYANDARSHAK_TOKEN` override the file values.
pub fn load_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gyandarshak.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            toml::from_str::<ClientConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClientConfig::default(),
    };

    config.base_url = resolve_env_vars(&config.base_url);
    config.token = config.token.as_deref().map(resolve_env_vars);

    // Env var overrides are taken verbatim
    if let Ok(url) = std::env::var(URL_ENV) {
        if !url.trim().is_empty() {
            config.base_url = url;
        }
    }
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            config.token = Some(token);
        }
    }

    anyhow::ensure!(config.timeout_secs >= 1, "timeout_secs must be at least 1");

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gyandarshak"))
}
