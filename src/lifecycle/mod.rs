//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Session::start (HTTP client, store, uploader,
//!     minter, wallet) → workflows borrow collaborators from the session
//!
//! Shutdown:
//!     Command finished → Session::shutdown → Exit
//! ```
//!
//! # Design Decisions
//! - No process-wide singletons: every collaborator hangs off the session
//! - Fail fast on unusable configuration, defer missing credentials to the
//!   operation that needs them

pub mod session;

pub use session::{Session, SessionMode};
