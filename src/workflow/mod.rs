//! Article publish-and-mint workflow.
//!
//! # Data Flow
//! ```text
//! ArticleDraft
//!     → publish.rs: render HTML + Markdown, upload artifacts in parallel,
//!       build and upload metadata
//!     → PublishedArticle { article_uri, markdown_uri, metadata_uri }
//!     → mint.rs: derive PM-<INITIALS>, convert price, CoinMinter::mint
//!     → MintResult { tx_hash, gateway URLs }
//! ```
//!
//! `orchestrator.rs` sequences the two phases through the state machine in
//! `state.rs` and restores the pre-operation state on failure.

pub mod mint;
pub mod orchestrator;
pub mod publish;
pub mod state;

pub use mint::{build_coin_request, mint_article, MintResult, MintSettings};
pub use orchestrator::ArticleWorkflow;
pub use publish::{build_artifacts, publish_article};
pub use state::{StateError, WorkflowEvent, WorkflowState, WorkflowStateMachine};
