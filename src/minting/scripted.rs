//! Scripted minter for dry runs and tests.
//!
//! Outcomes are consumed in order; once the script is empty every call
//! succeeds. Each call's request is recorded.

use alloy::primitives::keccak256;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::blockchain::{BlockchainError, BlockchainResult, Wallet};
use crate::minting::{CoinMinter, CoinRequest, MintOptions, MintReceipt};

#[derive(Debug, Default)]
struct Script {
    failures: VecDeque<Option<String>>,
    requests: Vec<CoinRequest>,
}

/// Minter that never touches the network.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMinter {
    inner: Arc<Mutex<Script>>,
}

impl ScriptedMinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failing call with the given raw message.
    pub fn fail_next(&self, message: impl Into<String>) -> &Self {
        if let Ok(mut script) = self.inner.lock() {
            script.failures.push_back(Some(message.into()));
        }
        self
    }

    /// Queue a succeeding call.
    pub fn succeed_next(&self) -> &Self {
        if let Ok(mut script) = self.inner.lock() {
            script.failures.push_back(None);
        }
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CoinRequest> {
        self.inner
            .lock()
            .map(|s| s.requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CoinMinter for ScriptedMinter {
    async fn mint(
        &self,
        request: &CoinRequest,
        _signer: &Wallet,
        _options: &MintOptions,
    ) -> BlockchainResult<MintReceipt> {
        let (outcome, call_index) = {
            let mut script = self
                .inner
                .lock()
                .map_err(|_| BlockchainError::NotAvailable("scripted minter poisoned".to_string()))?;
            script.requests.push(request.clone());
            (script.failures.pop_front().flatten(), script.requests.len())
        };

        if let Some(message) = outcome {
            tracing::debug!(symbol = %request.symbol, message = %message, "Scripted mint failure");
            return Err(BlockchainError::Transaction(message));
        }

        let seed = format!("{}|{}|{}", request.symbol, request.uri, call_index);
        let hash = keccak256(seed.as_bytes());
        tracing::debug!(symbol = %request.symbol, tx_hash = %hash, "Scripted mint success");
        Ok(MintReceipt { hash })
    }
}
