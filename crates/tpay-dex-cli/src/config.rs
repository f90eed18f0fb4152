/*
[INPUT]:  YAML configuration file and CLI overrides
[OUTPUT]: Parsed client configuration plus discoverable wallets
[POS]:    Configuration layer - CLI setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tpay_dex_adapter::DexConfig;

/// Top-level configuration for the CLI
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    /// Backend URL, feature flags and networks
    #[serde(flatten)]
    pub dex: DexConfig,
    /// Wallets offered by the discovery prompt
    #[serde(default)]
    pub wallets: Vec<WalletEntry>,
}

/// Private-key wallet available for discovery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletEntry {
    pub name: String,
    /// Hex private key; takes precedence over `private_key_env`
    #[serde(default)]
    pub private_key: Option<String>,
    /// Environment variable holding the hex private key
    #[serde(default)]
    pub private_key_env: Option<String>,
}

impl WalletEntry {
    /// Resolve the key, or `None` when neither source is set
    pub fn resolve_key(&self) -> Option<String> {
        self.private_key
            .clone()
            .or_else(|| {
                self.private_key_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
            })
            .filter(|key| !key.trim().is_empty())
    }
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).context("parse config yaml")?;
        Ok(config)
    }

    /// Apply command-line overrides, then validate
    pub fn with_overrides(mut self, backend_url: Option<&str>, enable_backend: bool) -> Result<Self> {
        if let Some(url) = backend_url {
            self.dex = self.dex.with_backend_url(url).context("invalid --backend-url")?;
        }
        if enable_backend {
            self.dex = self.dex.with_backend_enabled(true);
        }
        self.dex.validate().context("invalid configuration")?;
        Ok(self)
    }
}
