//! Mint operation: turn a published article into a coin.

use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};

use crate::article::{coin_symbol, parse_mint_price, ArticleDraft, PublishedArticle};
use crate::blockchain::Wallet;
use crate::config::AppConfig;
use crate::error::{WorkflowError, WorkflowResult};
use crate::minting::{CoinMinter, CoinRequest, DeployCurrency, MintFailure, MintOptions};
use crate::storage::gateway_url;

/// Settings the mint step reads from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintSettings {
    pub chain_id: u64,
    pub version: String,
    pub currency: DeployCurrency,
    pub fallback_mint_price: String,
    pub gas_multiplier_percent: u64,
    pub gateway_url: String,
    pub explorer_tx_url: String,
}

impl MintSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            chain_id: config.minter.chain_id,
            version: config.minter.version.clone(),
            currency: config.minter.currency,
            fallback_mint_price: config.minter.fallback_mint_price.clone(),
            gas_multiplier_percent: config.minter.gas_multiplier_percent,
            gateway_url: config.content_store.gateway_url.clone(),
            explorer_tx_url: config.minter.explorer_tx_url.clone(),
        }
    }

    fn options(&self) -> MintOptions {
        MintOptions {
            gas_multiplier_percent: self.gas_multiplier_percent,
        }
    }
}

impl Default for MintSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Outcome of a successful mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintResult {
    pub tx_hash: TxHash,
    pub symbol: String,
    /// Public gateway URL of the HTML rendering.
    pub article_url: String,
    /// Public gateway URL of the Markdown rendering.
    pub markdown_url: String,
    pub explorer_url: String,
}

/// Assemble the minter request for an article.
pub fn build_coin_request(
    article: &PublishedArticle,
    draft: &ArticleDraft,
    wallet: &Wallet,
    settings: &MintSettings,
) -> CoinRequest {
    let symbol = coin_symbol(&draft.title);
    CoinRequest {
        name: symbol.clone(),
        symbol,
        uri: article.metadata_uri.clone(),
        description: draft.excerpt.clone(),
        payout_recipient: wallet.address(),
        chain_id: settings.chain_id,
        currency: settings.currency,
        version: settings.version.clone(),
        initial_purchase_wei: parse_mint_price(&draft.mint_price, &settings.fallback_mint_price),
    }
}

/// Mint a published article.
///
/// Fails with `Validation` before the minter is called when there is no
/// metadata locator or no wallet.
pub async fn mint_article(
    article: Option<&PublishedArticle>,
    draft: &ArticleDraft,
    wallet: Option<&Wallet>,
    minter: &dyn CoinMinter,
    settings: &MintSettings,
) -> WorkflowResult<MintResult> {
    let article = article
        .filter(|a| !a.metadata_uri.trim().is_empty())
        .ok_or_else(|| WorkflowError::Validation("Article must be published before minting".to_string()))?;
    let wallet = wallet.ok_or_else(|| WorkflowError::Validation("Wallet is not connected".to_string()))?;

    let request = build_coin_request(article, draft, wallet, settings);
    tracing::info!(
        symbol = %request.symbol,
        uri = %request.uri,
        payout = %request.payout_recipient,
        value_wei = %request.initial_purchase_wei,
        "Minting article coin"
    );

    let receipt = minter
        .mint(&request, wallet, &settings.options())
        .await
        .map_err(|e| {
            let failure = MintFailure::classify(&e.to_string());
            tracing::warn!(kind = ?failure.kind, detail = %failure.detail, "Mint failed");
            WorkflowError::Mint(failure)
        })?;

    Ok(MintResult {
        tx_hash: receipt.hash,
        symbol: request.symbol,
        article_url: gateway_url(&article.article_uri, &settings.gateway_url),
        markdown_url: gateway_url(&article.markdown_uri, &settings.gateway_url),
        explorer_url: format!("{}{}", settings.explorer_tx_url, receipt.hash),
    })
}
