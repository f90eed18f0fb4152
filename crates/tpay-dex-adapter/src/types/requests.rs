/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::http::{DexError, Result};

const MISSING_FIELDS: &str = "Please fill in all fields";

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub address: String,
    pub message: String,
    pub signature: String,
}

/// Body of `POST /dex/swap`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub token_in: String,
    pub token_out: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount_in: Decimal,
    pub recipient: String,
}

impl SwapRequest {
    pub fn validate(&self) -> Result<()> {
        require_filled(&[&self.token_in, &self.token_out, &self.recipient])?;
        require_positive("amountIn", self.amount_in)
    }
}

/// Body of `POST /liquidity/add-liquidity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddLiquidityRequest {
    pub token0: String,
    pub token1: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount0: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount1: Decimal,
    pub recipient: String,
}

impl AddLiquidityRequest {
    pub fn validate(&self) -> Result<()> {
        require_filled(&[&self.token0, &self.token1, &self.recipient])?;
        require_positive("amount0", self.amount0)?;
        require_positive("amount1", self.amount1)
    }
}

fn require_filled(fields: &[&String]) -> Result<()> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(DexError::InvalidRequest(MISSING_FIELDS.to_string()));
    }
    Ok(())
}

fn require_positive(name: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(DexError::InvalidRequest(format!(
            "{name} must be greater than zero"
        )));
    }
    Ok(())
}
