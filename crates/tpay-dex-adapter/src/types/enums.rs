/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network identifiers the client can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Localhost,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Localhost => "localhost",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "localhost" => Ok(Network::Localhost),
            other => Err(format!("unknown network: {other}")),
        }
    }
}

/// Ordering applied to the pool list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolSort {
    /// Total value locked, largest first
    #[default]
    Tvl,
    /// 24h volume, largest first (missing counts as zero)
    Volume,
    /// token0 symbol, alphabetical
    Name,
}

impl FromStr for PoolSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tvl" => Ok(PoolSort::Tvl),
            "volume" => Ok(PoolSort::Volume),
            "name" => Ok(PoolSort::Name),
            other => Err(format!("unknown pool sort: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_serializes_lowercase() {
        let value = serde_json::to_value(Network::Testnet).unwrap();
        assert_eq!(value, serde_json::json!("testnet"));
    }

    #[test]
    fn network_parses_case_insensitively() {
        assert_eq!("MainNet".parse::<Network>().unwrap(), Network::Mainnet);
        assert!("devnet".parse::<Network>().is_err());
    }

    #[test]
    fn pool_sort_defaults_to_tvl() {
        assert_eq!(PoolSort::default(), PoolSort::Tvl);
        assert_eq!("volume".parse::<PoolSort>().unwrap(), PoolSort::Volume);
    }
}
