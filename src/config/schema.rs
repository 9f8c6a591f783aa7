//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every field
//! has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::minting::DeployCurrency;

/// Environment variable holding the pinning-service JWT.
pub const PINATA_JWT_ENV_VAR: &str = "PINATA_JWT";

/// Environment variable overriding the minter RPC URL.
pub const RPC_URL_ENV_VAR: &str = "ARTICLE_MINTER_RPC_URL";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Pinning service settings.
    pub content_store: ContentStoreConfig,

    /// Coin minting settings.
    pub minter: MinterConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Content store (Pinata) configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentStoreConfig {
    /// Pinning API base URL.
    pub api_url: String,

    /// Public gateway used to build shareable links.
    pub gateway_url: String,

    /// Bearer credential. Usually supplied through `PINATA_JWT`.
    #[serde(skip_serializing)]
    pub jwt: Option<String>,

    /// Per-upload HTTP timeout in seconds.
    pub request_timeout_secs: u64,

    /// CID version requested from the pinning service.
    pub cid_version: u8,
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.pinata.cloud".to_string(),
            gateway_url: "https://gateway.pinata.cloud/ipfs/".to_string(),
            jwt: None,
            request_timeout_secs: 60,
            cid_version: 1,
        }
    }
}

impl std::fmt::Debug for ContentStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStoreConfig")
            .field("api_url", &self.api_url)
            .field("gateway_url", &self.gateway_url)
            .field("jwt", &self.jwt.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cid_version", &self.cid_version)
            .finish()
    }
}

/// Coin minter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MinterConfig {
    /// Submit real transactions. When false only dry runs are possible.
    pub enabled: bool,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs for read calls.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Target chain (8453 = Base mainnet).
    pub chain_id: u64,

    /// Coin factory contract address.
    pub factory_address: String,

    /// Protocol version tag sent with every coin.
    pub version: String,

    /// Currency the coin's pool is paired with (`ETH` or `ZORA`).
    pub currency: DeployCurrency,

    /// Gas limit multiplier in percent (120 = estimate + 20%).
    pub gas_multiplier_percent: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Block explorer prefix for transaction links.
    pub explorer_tx_url: String,

    /// Initial purchase in ETH when the draft leaves it empty or invalid.
    pub fallback_mint_price: String,
}

impl Default for MinterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rpc_url: "https://mainnet.base.org".to_string(),
            failover_urls: Vec::new(),
            chain_id: 8453,
            factory_address: "0x777777751622c0d3258f214F9DF38E35BF45baF3".to_string(),
            version: "v4".to_string(),
            currency: DeployCurrency::Eth,
            gas_multiplier_percent: 120,
            rpc_timeout_secs: 10,
            explorer_tx_url: "https://basescan.org/tx/".to_string(),
            fallback_mint_price: crate::article::DEFAULT_MINT_PRICE.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// `pretty` or `json`.
    pub log_format: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.minter.chain_id, 8453);
        assert_eq!(config.minter.version, "v4");
        assert_eq!(config.minter.gas_multiplier_percent, 120);
        assert_eq!(config.minter.fallback_mint_price, "0.001");
        assert_eq!(config.content_store.cid_version, 1);
        assert!(config.content_store.jwt.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [content_store]
            gateway_url = "https://ipfs.example/ipfs/"

            [minter]
            enabled = true
            chain_id = 84532
            currency = "ZORA"
            "#,
        )
        .unwrap();
        assert_eq!(config.content_store.gateway_url, "https://ipfs.example/ipfs/");
        assert_eq!(config.content_store.api_url, "https://api.pinata.cloud");
        assert!(config.minter.enabled);
        assert_eq!(config.minter.chain_id, 84532);
        assert_eq!(config.minter.currency, DeployCurrency::Zora);
        assert_eq!(config.minter.explorer_tx_url, "https://basescan.org/tx/");
    }

    #[test]
    fn test_jwt_never_serialized_or_debugged() {
        let mut config = AppConfig::default();
        config.content_store.jwt = Some("super-secret".to_string());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("super-secret"));
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
