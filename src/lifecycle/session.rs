//! Session: the collaborators one program run works with.

use std::sync::Arc;

use crate::blockchain::{Wallet, PRIVATE_KEY_ENV_VAR};
use crate::config::AppConfig;
use crate::error::{WorkflowError, WorkflowResult};
use crate::metadata::{MetadataUploader, StoreMetadataUploader};
use crate::minting::{CoinMinter, FactoryMinter, ScriptedMinter};
use crate::storage::{ContentStore, MemoryStore, PinataStore};
use crate::workflow::{ArticleWorkflow, MintSettings};

/// Whether collaborators talk to real services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Live,
    /// In-memory store, scripted minter, throwaway wallet if none is set.
    DryRun,
}

/// Collaborators built once at start and injected into workflows.
pub struct Session {
    config: AppConfig,
    mode: SessionMode,
    store: Arc<dyn ContentStore>,
    uploader: Arc<dyn MetadataUploader>,
    minter: Option<Arc<dyn CoinMinter>>,
    wallet: Option<Wallet>,
}

impl Session {
    /// Build every collaborator from configuration.
    ///
    /// A missing pinning credential or wallet is not an error here; the
    /// operation that needs it fails instead.
    pub async fn start(config: AppConfig, mode: SessionMode) -> WorkflowResult<Self> {
        let chain_id = config.minter.chain_id;

        let session = match mode {
            SessionMode::Live => {
                let http = reqwest::Client::builder()
                    .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .map_err(|e| WorkflowError::Configuration(format!("HTTP client: {}", e)))?;

                let pinata = PinataStore::new(&config.content_store, http);
                if !pinata.has_credential() {
                    tracing::warn!("No pinning credential configured, publishing will fail");
                }
                let store: Arc<dyn ContentStore> = Arc::new(pinata);

                let minter: Option<Arc<dyn CoinMinter>> = if config.minter.enabled {
                    let factory = FactoryMinter::from_config(&config.minter)
                        .await
                        .map_err(|e| WorkflowError::Configuration(e.to_string()))?;
                    Some(Arc::new(factory))
                } else {
                    tracing::info!("Minter disabled in configuration");
                    None
                };

                let wallet = match Wallet::from_env(chain_id) {
                    Ok(wallet) => Some(wallet),
                    Err(e) => {
                        tracing::warn!(error = %e, "No wallet connected");
                        None
                    }
                };

                Self::assemble(config, mode, store, minter, wallet)
            }
            SessionMode::DryRun => {
                let store: Arc<dyn ContentStore> = Arc::new(MemoryStore::new());
                let minter: Arc<dyn CoinMinter> = Arc::new(ScriptedMinter::new());
                let wallet = match std::env::var(PRIVATE_KEY_ENV_VAR) {
                    Ok(_) => Wallet::from_env(chain_id),
                    Err(_) => Wallet::ephemeral(chain_id),
                }
                .map_err(|e| WorkflowError::Configuration(e.to_string()))?;

                Self::assemble(config, mode, store, Some(minter), Some(wallet))
            }
        };

        tracing::info!(
            mode = ?session.mode,
            minter = session.minter.is_some(),
            wallet = ?session.wallet.as_ref().map(|w| w.address()),
            "Session started"
        );
        Ok(session)
    }

    fn assemble(
        config: AppConfig,
        mode: SessionMode,
        store: Arc<dyn ContentStore>,
        minter: Option<Arc<dyn CoinMinter>>,
        wallet: Option<Wallet>,
    ) -> Self {
        let uploader: Arc<dyn MetadataUploader> = Arc::new(StoreMetadataUploader::new(store.clone()));
        Self {
            config,
            mode,
            store,
            uploader,
            minter,
            wallet,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn wallet(&self) -> Option<&Wallet> {
        self.wallet.as_ref()
    }

    /// A fresh workflow wired to this session's collaborators.
    pub fn workflow(&self) -> ArticleWorkflow {
        let mut workflow = ArticleWorkflow::new(
            self.store.clone(),
            self.uploader.clone(),
            MintSettings::from_config(&self.config),
        );
        if let Some(minter) = &self.minter {
            workflow = workflow.with_minter(minter.clone());
        }
        if let Some(wallet) = &self.wallet {
            workflow = workflow.with_wallet(wallet.clone());
        }
        workflow
    }

    /// Release collaborators. Uploads or transactions already handed to a
    /// remote service are not affected.
    pub fn shutdown(self) {
        tracing::info!(mode = ?self.mode, "Session closed");
    }
}
