//! Article publish-and-mint library.
//!
//! Renders an article to HTML and Markdown, pins both to a content store,
//! uploads a coin metadata document and mints a creator coin that points at
//! it.

// Domain
pub mod article;
pub mod metadata;
pub mod workflow;

// External collaborators
pub mod blockchain;
pub mod minting;
pub mod storage;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use article::{ArticleDraft, PublishedArticle};
pub use config::AppConfig;
pub use error::{WorkflowError, WorkflowResult};
pub use lifecycle::{Session, SessionMode};
pub use workflow::{ArticleWorkflow, MintResult, WorkflowState};
