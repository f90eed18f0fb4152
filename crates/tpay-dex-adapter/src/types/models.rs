/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - pool models plus search/sort helpers
[UPDATE]: When API schema changes or new types added
*/

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::PoolSort;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolToken {
    pub symbol: String,
}

/// Liquidity pool as returned by `GET /data/pools`.
///
/// Numeric fields arrive either as JSON strings or numbers depending on the
/// backend, so they are normalized into `Decimal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub token0: PoolToken,
    pub token1: PoolToken,
    #[serde(
        rename = "totalValueLockedUSD",
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub total_value_locked_usd: Decimal,
    #[serde(
        rename = "volume24h",
        default,
        deserialize_with = "serde_helpers::deserialize_optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_24h: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub fee: Option<Decimal>,
}

impl Pool {
    /// Pair label, e.g. `ETH/USDC`
    pub fn pair(&self) -> String {
        format!("{}/{}", self.token0.symbol, self.token1.symbol)
    }

    /// Case-insensitive substring match on either token symbol.
    ///
    /// An empty search term matches every pool.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.token0.symbol.to_lowercase().contains(&term)
            || self.token1.symbol.to_lowercase().contains(&term)
    }

    /// Fee as a percentage rounded to two decimals (`0.003` -> `0.30`).
    pub fn fee_percent(&self) -> Option<Decimal> {
        self.fee
            .map(|fee| (fee * Decimal::ONE_HUNDRED).round_dp(2))
    }
}

/// Filter by search term, then order by `sort`.
pub fn filter_and_sort_pools(pools: &[Pool], search: &str, sort: PoolSort) -> Vec<Pool> {
    let mut selected: Vec<Pool> = pools
        .iter()
        .filter(|pool| pool.matches_search(search))
        .cloned()
        .collect();
    sort_pools(&mut selected, sort);
    selected
}

/// Stable in-place sort of pools.
pub fn sort_pools(pools: &mut [Pool], sort: PoolSort) {
    match sort {
        PoolSort::Tvl => {
            pools.sort_by(|a, b| b.total_value_locked_usd.cmp(&a.total_value_locked_usd))
        }
        PoolSort::Volume => pools.sort_by(|a, b| {
            b.volume_24h
                .unwrap_or(Decimal::ZERO)
                .cmp(&a.volume_24h.unwrap_or(Decimal::ZERO))
        }),
        PoolSort::Name => pools.sort_by(|a, b| compare_symbols(&a.token0.symbol, &b.token0.symbol)),
    }
}

fn compare_symbols(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Aggregate figures shown above the pool list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSummary {
    pub pool_count: usize,
    pub total_value_locked_usd: Decimal,
    pub total_volume_24h: Decimal,
}

impl PoolSummary {
    pub fn from_pools(pools: &[Pool]) -> Self {
        Self {
            pool_count: pools.len(),
            total_value_locked_usd: pools.iter().map(|pool| pool.total_value_locked_usd).sum(),
            total_volume_24h: pools
                .iter()
                .map(|pool| pool.volume_24h.unwrap_or(Decimal::ZERO))
                .sum(),
        }
    }
}

mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    fn decimal_from_value<E: serde::de::Error>(value: &Value) -> Result<Option<Decimal>, E> {
        if value.is_null() {
            return Ok(None);
        }

        if let Some(raw) = value.as_str() {
            if raw.trim().is_empty() {
                return Ok(None);
            }
            return Decimal::from_str(raw.trim()).map(Some).map_err(E::custom);
        }

        if value.is_number() {
            let raw = value.to_string();
            return Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map(Some)
                .map_err(E::custom);
        }

        Err(E::custom("invalid decimal value"))
    }

    pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(decimal_from_value(&value)?.unwrap_or(Decimal::ZERO))
    }

    pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value(&value)
    }

    pub fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}
