//! Article model and pure derivations.
//!
//! # Data Flow
//! ```text
//! ArticleDraft (user input, TOML on disk)
//!     → render.rs (HTML + Markdown, deterministic for a given timestamp)
//!     → image.rs (data URI → bytes + MIME type)
//!     → symbol.rs (metadata symbol, PM-<INITIALS> coin symbol)
//!     → price.rs (decimal ETH → wei with fallback)
//! ```
//!
//! Nothing in this module performs I/O except `ArticleDraft::load`.

pub mod draft;
pub mod image;
pub mod price;
pub mod render;
pub mod symbol;

pub use draft::{ArticleDraft, PublishedArticle};
pub use image::FeaturedImage;
pub use price::{parse_mint_price, DEFAULT_MINT_PRICE};
pub use render::{render_html, render_markdown};
pub use symbol::{coin_symbol, metadata_symbol, COIN_SYMBOL_PREFIX};
