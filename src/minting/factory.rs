//! On-chain coin factory minter.
//!
//! # Responsibilities
//! - Check chain and balance through the read-only client
//! - Build the factory `deploy` call with the initial purchase as value
//! - Estimate gas, apply the multiplier, sign with the connected wallet
//! - Broadcast and return the transaction hash (no confirmation wait)

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::ProviderBuilder;
use alloy::sol;
use alloy::sol_types::SolValue;
use async_trait::async_trait;

use crate::blockchain::{BlockchainClient, BlockchainError, BlockchainResult, Wallet};
use crate::config::MinterConfig;
use crate::minting::{CoinMinter, CoinRequest, MintOptions, MintReceipt};

sol! {
    /// Coin factory entry point.
    #[sol(rpc)]
    interface ICoinFactory {
        function deploy(
            address payoutRecipient,
            address[] owners,
            string uri,
            string name,
            string symbol,
            bytes poolConfig,
            address platformReferrer,
            address postDeployHook,
            bytes postDeployHookData,
            bytes32 coinSalt
        ) external payable returns (address coin, bytes postDeployHookDataOut);
    }
}

/// Parse the `v<N>` version tag into its number.
fn version_number(tag: &str) -> BlockchainResult<u8> {
    tag.trim_start_matches(['v', 'V'])
        .parse()
        .map_err(|_| BlockchainError::Transaction(format!("Unsupported protocol version '{}'", tag)))
}

/// Pool configuration: version tag and backing currency.
pub fn encode_pool_config(request: &CoinRequest) -> BlockchainResult<Bytes> {
    let version = version_number(&request.version)?;
    Ok(Bytes::from(
        (U256::from(version), request.currency.token_address()).abi_encode(),
    ))
}

/// Arguments of the factory `deploy` call. The payout recipient is the sole
/// owner; no referrer or post-deploy hook.
pub fn build_deploy_call(request: &CoinRequest, salt: B256) -> BlockchainResult<ICoinFactory::deployCall> {
    Ok(ICoinFactory::deployCall {
        payoutRecipient: request.payout_recipient,
        owners: vec![request.payout_recipient],
        uri: request.uri.clone(),
        name: request.name.clone(),
        symbol: request.symbol.clone(),
        poolConfig: encode_pool_config(request)?,
        platformReferrer: Address::ZERO,
        postDeployHook: Address::ZERO,
        postDeployHookData: Bytes::new(),
        coinSalt: salt,
    })
}

/// Minter that calls the coin factory contract.
#[derive(Debug, Clone)]
pub struct FactoryMinter {
    reader: BlockchainClient,
    factory: Address,
}

impl FactoryMinter {
    pub fn new(reader: BlockchainClient, factory: Address) -> Self {
        Self { reader, factory }
    }

    /// Connect the read client and parse the factory address from config.
    pub async fn from_config(config: &MinterConfig) -> BlockchainResult<Self> {
        if !config.enabled {
            return Err(BlockchainError::NotAvailable("minter is disabled in configuration".to_string()));
        }
        let factory: Address = config.factory_address.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid factory address '{}': {}", config.factory_address, e))
        })?;
        let reader = BlockchainClient::new(config).await?;
        Ok(Self::new(reader, factory))
    }
}

#[async_trait]
impl CoinMinter for FactoryMinter {
    async fn mint(
        &self,
        request: &CoinRequest,
        signer: &Wallet,
        options: &MintOptions,
    ) -> BlockchainResult<MintReceipt> {
        if request.chain_id != self.reader.chain_id().0 {
            return Err(BlockchainError::ChainMismatch {
                expected: self.reader.chain_id().0,
                actual: request.chain_id,
            });
        }
        self.reader.verify_chain_id().await?;

        let payer = signer.address();
        let balance = self.reader.get_balance(payer).await?;
        if balance < request.initial_purchase_wei {
            return Err(BlockchainError::Transaction(format!(
                "insufficient funds for initial purchase: balance {} wei, need {} wei",
                balance, request.initial_purchase_wei
            )));
        }

        let args = build_deploy_call(request, B256::from(rand::random::<[u8; 32]>()))?;

        let provider = ProviderBuilder::new()
            .wallet(signer.ethereum_wallet())
            .connect_http(self.reader.rpc_url().clone());
        let factory = ICoinFactory::new(self.factory, provider);

        let call = factory
            .deploy_call(
                args.payoutRecipient,
                args.owners,
                args.uri,
                args.name,
                args.symbol,
                args.poolConfig,
                args.platformReferrer,
                args.postDeployHook,
                args.postDeployHookData,
                args.coinSalt,
            )
            .value(request.initial_purchase_wei);

        let estimate = call
            .estimate_gas()
            .await
            .map_err(|e| BlockchainError::Transaction(e.to_string()))?;
        let gas_limit = estimate.saturating_mul(options.gas_multiplier_percent) / 100;

        tracing::info!(
            symbol = %request.symbol,
            payer = %payer,
            value_wei = %request.initial_purchase_wei,
            gas_estimate = estimate,
            gas_limit = gas_limit,
            "Submitting coin deployment"
        );

        let pending = call
            .gas(gas_limit)
            .send()
            .await
            .map_err(|e| BlockchainError::Transaction(e.to_string()))?;
        let hash = *pending.tx_hash();

        tracing::info!(tx_hash = %hash, "Coin deployment broadcast");
        Ok(MintReceipt { hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minting::DeployCurrency;
    use alloy::primitives::keccak256;
    use alloy::sol_types::SolCall;

    fn request(version: &str) -> CoinRequest {
        CoinRequest {
            name: "PM-HW".into(),
            symbol: "PM-HW".into(),
            uri: "ipfs://meta".into(),
            description: "e".into(),
            payout_recipient: Address::ZERO,
            chain_id: 8453,
            currency: DeployCurrency::Eth,
            version: version.into(),
            initial_purchase_wei: U256::from(1u64),
        }
    }

    #[test]
    fn test_pool_config_encoding() {
        let encoded = encode_pool_config(&request("v4")).unwrap();
        // Two static words: version, address currency.
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[31], 4);
        assert!(encoded[32..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_deploy_call_encoding() {
        let salt = B256::repeat_byte(7);
        let call = build_deploy_call(&request("v4"), salt).unwrap();
        assert_eq!(call.owners, vec![Address::ZERO]);
        assert_eq!(call.symbol, "PM-HW");
        assert_eq!(call.coinSalt, salt);

        let signature = "deploy(address,address[],string,string,string,bytes,address,address,bytes,bytes32)";
        let selector = &keccak256(signature.as_bytes())[..4];
        assert_eq!(ICoinFactory::deployCall::SELECTOR.as_slice(), selector);

        let encoded = call.abi_encode();
        assert_eq!(&encoded[..4], selector);
        let decoded = ICoinFactory::deployCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.uri, "ipfs://meta");
        assert_eq!(decoded.poolConfig, encode_pool_config(&request("v4")).unwrap());
    }

    #[test]
    fn test_unknown_version_rejected() {
        let err = encode_pool_config(&request("latest")).unwrap_err();
        assert!(err.to_string().contains("Unsupported protocol version"));
    }

    #[tokio::test]
    async fn test_disabled_minter_not_available() {
        let err = FactoryMinter::from_config(&MinterConfig::default()).await.unwrap_err();
        assert!(matches!(err, BlockchainError::NotAvailable(_)));
    }

    #[tokio::test]
    async fn test_chain_mismatch_rejected_before_rpc() {
        let config = MinterConfig {
            enabled: true,
            rpc_url: "http://127.0.0.1:9".into(),
            rpc_timeout_secs: 1,
            ..MinterConfig::default()
        };
        let minter = FactoryMinter::from_config(&config).await.unwrap();
        let wallet = Wallet::from_private_key(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            8453,
        )
        .unwrap();
        let mut req = request("v4");
        req.chain_id = 1;
        let err = minter.mint(&req, &wallet, &MintOptions::default()).await.unwrap_err();
        assert!(matches!(err, BlockchainError::ChainMismatch { expected: 8453, actual: 1 }));
    }
}
