//! Mint price conversion.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;

/// Initial purchase used when the draft's price is empty or unparsable.
pub const DEFAULT_MINT_PRICE: &str = "0.001";

/// Convert a decimal ETH string into wei.
///
/// Empty, non-numeric or negative input falls back to `fallback`, which must
/// itself parse; if it does not, `DEFAULT_MINT_PRICE` is used.
pub fn parse_mint_price(price: &str, fallback: &str) -> U256 {
    let trimmed = price.trim();
    // parse_ether accepts signed input and returns its magnitude.
    if !trimmed.is_empty() && !trimmed.starts_with('-') {
        match parse_ether(trimmed) {
            Ok(wei) => return wei,
            Err(e) => {
                tracing::warn!(price = %trimmed, error = %e, "Unparsable mint price, using fallback");
            }
        }
    } else if !trimmed.is_empty() {
        tracing::warn!(price = %trimmed, "Negative mint price, using fallback");
    }
    parse_ether(fallback)
        .or_else(|_| parse_ether(DEFAULT_MINT_PRICE))
        .unwrap_or(U256::from(1_000_000_000_000_000u64))
}
