/*
[INPUT]:  Pools fetched from the backend, search term and sort order
[OUTPUT]: Plain-text pool table and summary lines
[POS]:    UI layer - pool list rendering
[UPDATE]: When pool columns or number formatting change
*/

use rust_decimal::{Decimal, RoundingStrategy};
use tpay_dex_adapter::{Pool, PoolSummary};

const PAIR_WIDTH: usize = 16;
const AMOUNT_WIDTH: usize = 18;
const FEE_WIDTH: usize = 8;

/// Format a USD amount as `$1,234.56`
pub fn format_usd(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}

pub fn render_summary(summary: &PoolSummary) -> String {
    format!(
        "Pools: {}  TVL: {}  24h Volume: {}",
        summary.pool_count,
        format_usd(summary.total_value_locked_usd),
        format_usd(summary.total_volume_24h)
    )
}

/// Render pools as a fixed-width table, one row per pool
pub fn render_table(pools: &[Pool]) -> String {
    if pools.is_empty() {
        return "No pools found".to_string();
    }

    let mut out = format!(
        "{:<PAIR_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}{:>FEE_WIDTH$}\n",
        "Pair", "TVL", "24h Volume", "Fee"
    );
    for pool in pools {
        let volume = pool
            .volume_24h
            .map(format_usd)
            .unwrap_or_else(|| "-".to_string());
        let fee = pool
            .fee_percent()
            .map(|fee| format!("{fee}%"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<PAIR_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}{:>FEE_WIDTH$}\n",
            pool.pair(),
            format_usd(pool.total_value_locked_usd),
            volume,
            fee
        ));
    }
    out
}
