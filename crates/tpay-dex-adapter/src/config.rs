/*
[INPUT]:  Static defaults and optional caller overrides
[OUTPUT]: DexConfig consumed by the HTTP client and wallet session
[POS]:    Configuration layer - backend URL, feature flags, networks
[UPDATE]: When adding configuration options or changing defaults
*/

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::{DexError, Result};
use crate::types::Network;

/// Backend used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";
/// Backend calls are off unless explicitly enabled
pub const DEFAULT_ENABLE_BACKEND: bool = false;
pub const DEFAULT_DEBUG_MODE: bool = true;
pub const DEFAULT_NETWORK: Network = Network::Mainnet;
pub const SUPPORTED_NETWORKS: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Localhost];
pub const DEFAULT_LOGIN_TIMEOUT_MS: u64 = 5_000;

/// Application configuration for the DEX client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DexConfig {
    pub backend_url: Url,
    /// When false the wallet session never contacts `/auth/login`
    pub enable_backend: bool,
    /// Emits per-step debug events during connect
    pub debug_mode: bool,
    pub default_network: Network,
    pub supported_networks: Vec<Network>,
    #[serde(with = "duration_ms")]
    pub login_timeout: Duration,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            enable_backend: DEFAULT_ENABLE_BACKEND,
            debug_mode: DEFAULT_DEBUG_MODE,
            default_network: DEFAULT_NETWORK,
            supported_networks: SUPPORTED_NETWORKS.to_vec(),
            login_timeout: Duration::from_millis(DEFAULT_LOGIN_TIMEOUT_MS),
        }
    }
}

impl DexConfig {
    /// Override the backend URL
    pub fn with_backend_url(mut self, raw: &str) -> Result<Self> {
        self.backend_url = Url::parse(raw)?;
        Ok(self)
    }

    pub fn with_backend_enabled(mut self, enabled: bool) -> Self {
        self.enable_backend = enabled;
        self
    }

    pub fn is_supported(&self, network: Network) -> bool {
        self.supported_networks.contains(&network)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.supported_networks.is_empty() {
            return Err(DexError::Config(
                "at least one supported network is required".to_string(),
            ));
        }
        if !self.is_supported(self.default_network) {
            return Err(DexError::Config(format!(
                "default network {} is not in the supported list",
                self.default_network
            )));
        }
        if self.login_timeout.is_zero() {
            return Err(DexError::Config("login timeout must be non-zero".to_string()));
        }
        if !matches!(self.backend_url.scheme(), "http" | "https") {
            return Err(DexError::Config(format!(
                "backend URL must be http(s): {}",
                self.backend_url
            )));
        }
        Ok(())
    }
}

fn default_backend_url() -> Url {
    Url::parse(DEFAULT_BACKEND_URL).expect("default backend URL is valid")
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_setup() {
        let config = DexConfig::default();
        assert_eq!(config.backend_url.as_str(), "http://localhost:4000/");
        assert!(!config.enable_backend);
        assert!(config.debug_mode);
        assert_eq!(config.default_network, Network::Mainnet);
        assert_eq!(config.supported_networks.len(), 3);
        assert_eq!(config.login_timeout, Duration::from_millis(5000));
        config.validate().unwrap();
    }

    #[test]
    fn default_network_must_be_supported() {
        let config = DexConfig {
            default_network: Network::Testnet,
            supported_networks: vec![Network::Mainnet],
            ..DexConfig::default()
        };

        match config.validate().unwrap_err() {
            DexError::Config(msg) => assert!(msg.contains("testnet")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config: DexConfig = serde_json::from_value(serde_json::json!({
            "enable_backend": true,
            "login_timeout": 1500
        }))
        .unwrap();

        assert!(config.enable_backend);
        assert_eq!(config.login_timeout, Duration::from_millis(1500));
        assert_eq!(config.default_network, Network::Mainnet);
    }

    #[test]
    fn rejects_bad_backend_url() {
        assert!(DexConfig::default().with_backend_url("not a url").is_err());
    }
}
