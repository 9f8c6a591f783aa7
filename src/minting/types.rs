//! Mint request, receipt and failure types.

use alloy::primitives::{address, Address, TxHash, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency the coin's liquidity is paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeployCurrency {
    Eth,
    Zora,
}

impl DeployCurrency {
    /// Token address used in the pool configuration. Native ETH is zero.
    pub fn token_address(&self) -> Address {
        match self {
            DeployCurrency::Eth => Address::ZERO,
            DeployCurrency::Zora => address!("1111111111166b7fe7bd91427724b487980afc69"),
        }
    }
}

/// Everything the minter needs to create one coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRequest {
    pub name: String,
    pub symbol: String,
    /// Canonical metadata locator.
    pub uri: String,
    pub description: String,
    pub payout_recipient: Address,
    pub chain_id: u64,
    pub currency: DeployCurrency,
    /// Protocol version tag, e.g. `v4`.
    pub version: String,
    /// Initial purchase in wei.
    pub initial_purchase_wei: U256,
}

/// Submission options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintOptions {
    /// Gas limit multiplier in percent.
    pub gas_multiplier_percent: u64,
}

impl Default for MintOptions {
    fn default() -> Self {
        Self {
            gas_multiplier_percent: 120,
        }
    }
}

/// A broadcast mint transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    pub hash: TxHash,
}

/// Buyer-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintFailureKind {
    UserRejected,
    InsufficientFunds,
    Other,
}

/// A classified mint failure. Display is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MintFailure {
    pub kind: MintFailureKind,
    pub message: String,
    /// The minter's original message.
    pub detail: String,
}

impl MintFailure {
    /// Classify a raw minter message.
    pub fn classify(raw: &str) -> Self {
        let (kind, message) = if raw.contains("User rejected") {
            (MintFailureKind::UserRejected, "Transaction was rejected by user".to_string())
        } else if raw.contains("insufficient funds") {
            (MintFailureKind::InsufficientFunds, "Insufficient funds for transaction".to_string())
        } else if raw.trim().is_empty() {
            (MintFailureKind::Other, "Failed to mint article".to_string())
        } else {
            (MintFailureKind::Other, raw.to_string())
        };
        Self {
            kind,
            message,
            detail: raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_user_rejection() {
        let failure = MintFailure::classify("Transaction failed: User rejected the request.");
        assert_eq!(failure.kind, MintFailureKind::UserRejected);
        assert_eq!(failure.to_string(), "Transaction was rejected by user");
        assert!(failure.detail.contains("User rejected"));
    }

    #[test]
    fn test_classify_insufficient_funds() {
        let failure = MintFailure::classify("server returned an error response: insufficient funds for gas * price + value");
        assert_eq!(failure.kind, MintFailureKind::InsufficientFunds);
        assert_eq!(failure.to_string(), "Insufficient funds for transaction");
    }

    #[test]
    fn test_classify_other() {
        let failure = MintFailure::classify("RPC error: nonce too low");
        assert_eq!(failure.kind, MintFailureKind::Other);
        assert_eq!(failure.to_string(), "RPC error: nonce too low");

        let empty = MintFailure::classify("  ");
        assert_eq!(empty.to_string(), "Failed to mint article");
    }

    #[test]
    fn test_currency_addresses() {
        assert_eq!(DeployCurrency::Eth.token_address(), Address::ZERO);
        assert_ne!(DeployCurrency::Zora.token_address(), Address::ZERO);
    }
}
