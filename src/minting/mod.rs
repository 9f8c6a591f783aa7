//! Coin minting.
//!
//! # Data Flow
//! ```text
//! CoinRequest (symbol, metadata URI, payout recipient, purchase in wei)
//!     → CoinMinter::mint(request, signer, options)
//!         → factory.rs (coin factory contract via alloy)
//!         → scripted.rs (queued outcomes, no network)
//!     → MintReceipt { hash }
//!
//! On failure:
//!     BlockchainError message → MintFailure::classify → user-facing text
//! ```

pub mod factory;
pub mod scripted;
pub mod types;

use async_trait::async_trait;

use crate::blockchain::{BlockchainResult, Wallet};

pub use factory::FactoryMinter;
pub use scripted::ScriptedMinter;
pub use types::{CoinRequest, DeployCurrency, MintFailure, MintFailureKind, MintOptions, MintReceipt};

/// Submits coin-creation transactions.
#[async_trait]
pub trait CoinMinter: Send + Sync {
    /// Create a coin, signing with `signer`. Returns once the transaction is
    /// broadcast.
    async fn mint(
        &self,
        request: &CoinRequest,
        signer: &Wallet,
        options: &MintOptions,
    ) -> BlockchainResult<MintReceipt>;
}
