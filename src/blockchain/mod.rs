//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key, RPC URL)
//!     → wallet.rs (identity + signer: the "connected wallet")
//!     → client.rs (read-only RPC with timeouts and failover)
//!     → minting::FactoryMinter (build, sign, broadcast)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use types::{BlockchainError, BlockchainResult, ChainId};
pub use wallet::{Wallet, PRIVATE_KEY_ENV_VAR};
