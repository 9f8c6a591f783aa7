//! Article workflow orchestrator.
//!
//! Owns one draft and drives it through publish and mint. Operations take
//! `&mut self`, so a second publish or mint cannot start while one is in
//! flight on the same instance.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::article::{ArticleDraft, PublishedArticle};
use crate::blockchain::Wallet;
use crate::error::{WorkflowError, WorkflowResult};
use crate::metadata::MetadataUploader;
use crate::minting::CoinMinter;
use crate::observability::metrics;
use crate::storage::ContentStore;
use crate::workflow::mint::{mint_article, MintResult, MintSettings};
use crate::workflow::publish::publish_article;
use crate::workflow::state::{WorkflowEvent, WorkflowState, WorkflowStateMachine};

/// Publish-and-mint workflow for a single draft.
pub struct ArticleWorkflow {
    store: Arc<dyn ContentStore>,
    uploader: Arc<dyn MetadataUploader>,
    minter: Option<Arc<dyn CoinMinter>>,
    wallet: Option<Wallet>,
    settings: MintSettings,
    state: WorkflowState,
    draft: ArticleDraft,
    published: Option<PublishedArticle>,
    last_error: Option<String>,
    last_mint: Option<MintResult>,
    run_id: Uuid,
}

impl ArticleWorkflow {
    pub fn new(store: Arc<dyn ContentStore>, uploader: Arc<dyn MetadataUploader>, settings: MintSettings) -> Self {
        Self {
            store,
            uploader,
            minter: None,
            wallet: None,
            settings,
            state: WorkflowState::Editing,
            draft: ArticleDraft::default(),
            published: None,
            last_error: None,
            last_mint: None,
            run_id: Uuid::new_v4(),
        }
    }

    pub fn with_minter(mut self, minter: Arc<dyn CoinMinter>) -> Self {
        self.minter = Some(minter);
        self
    }

    pub fn with_wallet(mut self, wallet: Wallet) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn connect_wallet(&mut self, wallet: Wallet) {
        tracing::debug!(run_id = %self.run_id, address = %wallet.address(), "Wallet attached");
        self.wallet = Some(wallet);
    }

    pub fn disconnect_wallet(&mut self) {
        self.wallet = None;
    }

    pub fn wallet(&self) -> Option<&Wallet> {
        self.wallet.as_ref()
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn draft(&self) -> &ArticleDraft {
        &self.draft
    }

    /// Mutable access to the draft. Only allowed while editing.
    pub fn draft_mut(&mut self) -> WorkflowResult<&mut ArticleDraft> {
        if !self.state.is_editable() {
            return Err(WorkflowError::Validation(format!(
                "Draft is read-only while {}",
                self.state
            )));
        }
        Ok(&mut self.draft)
    }

    pub fn set_draft(&mut self, draft: ArticleDraft) -> WorkflowResult<()> {
        *self.draft_mut()? = draft;
        Ok(())
    }

    pub fn published(&self) -> Option<&PublishedArticle> {
        self.published.as_ref()
    }

    /// Message of the most recent failed operation, cleared on the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_mint(&self) -> Option<&MintResult> {
        self.last_mint.as_ref()
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Resume from an article published in an earlier session.
    pub fn restore_published(&mut self, draft: ArticleDraft, published: PublishedArticle) -> WorkflowResult<()> {
        if self.state != WorkflowState::Editing {
            return Err(WorkflowError::Validation(format!(
                "Cannot restore a published article while {}",
                self.state
            )));
        }
        self.draft = draft;
        self.published = Some(published);
        self.state = WorkflowState::Published;
        tracing::info!(run_id = %self.run_id, "Restored published article");
        Ok(())
    }

    /// Publish the draft, stamping renderings with the current time.
    pub async fn publish(&mut self) -> WorkflowResult<PublishedArticle> {
        self.publish_at(Utc::now()).await
    }

    /// Publish the draft with an injected creation time.
    ///
    /// `self.state` only changes once the upload phase has finished, so a
    /// dropped future leaves the workflow in `Editing`.
    pub async fn publish_at(&mut self, created_at: DateTime<Utc>) -> WorkflowResult<PublishedArticle> {
        let in_flight = match WorkflowStateMachine::transition(self.state, WorkflowEvent::Submit) {
            Ok(next) => next,
            Err(e) => {
                let err = WorkflowError::from(e);
                metrics::record_publish(err.kind());
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };
        self.last_error = None;

        let span = tracing::info_span!("publish", run_id = %self.run_id, state = %in_flight);
        let result = publish_article(&self.draft, created_at, self.store.as_ref(), self.uploader.as_ref())
            .instrument(span)
            .await;

        match result {
            Ok(published) => {
                self.state = WorkflowStateMachine::transition(in_flight, WorkflowEvent::PublishSucceeded)?;
                self.published = Some(published.clone());
                metrics::record_publish("success");
                Ok(published)
            }
            Err(err) => {
                self.state = WorkflowStateMachine::transition(in_flight, WorkflowEvent::PublishFailed)?;
                tracing::warn!(run_id = %self.run_id, kind = err.kind(), error = %err, "Publish failed");
                metrics::record_publish(err.kind());
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Mint the published article. On success the workflow resets to an
    /// empty draft. A dropped future leaves the workflow in `Published`.
    pub async fn mint(&mut self) -> WorkflowResult<MintResult> {
        let minter = match self.check_mint_preconditions() {
            Ok(minter) => minter,
            Err(err) => {
                metrics::record_mint(err.kind());
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        let in_flight = WorkflowStateMachine::transition(self.state, WorkflowEvent::Mint)?;
        self.last_error = None;

        let span = tracing::info_span!("mint", run_id = %self.run_id, state = %in_flight);
        let result = mint_article(
            self.published.as_ref(),
            &self.draft,
            self.wallet.as_ref(),
            minter.as_ref(),
            &self.settings,
        )
        .instrument(span)
        .await;

        match result {
            Ok(minted) => {
                self.state = WorkflowStateMachine::transition(in_flight, WorkflowEvent::MintSucceeded)?;
                metrics::record_mint("success");
                tracing::info!(
                    run_id = %self.run_id,
                    tx_hash = %minted.tx_hash,
                    symbol = %minted.symbol,
                    "Article minted"
                );
                self.last_mint = Some(minted.clone());
                self.reset()?;
                Ok(minted)
            }
            Err(err) => {
                self.state = WorkflowStateMachine::transition(in_flight, WorkflowEvent::MintFailed)?;
                metrics::record_mint(err.kind());
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Returns the minter to use once every precondition holds.
    fn check_mint_preconditions(&self) -> WorkflowResult<Arc<dyn CoinMinter>> {
        let published = self
            .published
            .as_ref()
            .filter(|p| !p.metadata_uri.trim().is_empty());
        if self.state != WorkflowState::Published || published.is_none() {
            return Err(WorkflowError::Validation(
                "Article must be published before minting".to_string(),
            ));
        }
        if self.wallet.is_none() {
            return Err(WorkflowError::Validation("Wallet is not connected".to_string()));
        }
        self.minter
            .clone()
            .ok_or_else(|| WorkflowError::Configuration("No coin minter configured".to_string()))
    }

    fn reset(&mut self) -> WorkflowResult<()> {
        self.state = WorkflowStateMachine::transition(self.state, WorkflowEvent::Reset)?;
        self.draft = ArticleDraft::default();
        self.published = None;
        self.run_id = Uuid::new_v4();
        Ok(())
    }
}

impl std::fmt::Debug for ArticleWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleWorkflow")
            .field("run_id", &self.run_id)
            .field("state", &self.state)
            .field("published", &self.published)
            .field("wallet", &self.wallet)
            .field("has_minter", &self.minter.is_some())
            .finish()
    }
}
