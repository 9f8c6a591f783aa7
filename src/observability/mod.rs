//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Workflow, stores, minter produce:
//!     → logging.rs (structured log events, run_id spans)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so command output on stdout stays machine-readable
//! - Secrets (JWT, private key) are never recorded

pub mod logging;
pub mod metrics;
