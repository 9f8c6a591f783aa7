//! article-minter
//!
//! Publishes an article to IPFS and mints it as a creator coin.
//!
//! # Architecture Overview
//!
//! ```text
//!   draft.toml ──▶ ArticleWorkflow ──publish──▶ ContentStore (Pinata)
//!                       │                        ├─ article.html
//!                       │                        ├─ article.md
//!                       │                        ├─ featured image
//!                       │                        └─ metadata.json
//!                       └──────mint────▶ CoinMinter (coin factory on Base)
//!
//!   Cross-cutting: config (TOML + env), lifecycle::Session,
//!   observability (tracing, metrics)
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

use article_minter::article::{render_html, render_markdown};
use article_minter::config::load_or_default;
use article_minter::observability::{logging, metrics};
use article_minter::{ArticleDraft, PublishedArticle, Session, SessionMode};

#[derive(Parser)]
#[command(name = "article-minter")]
#[command(about = "Publish articles to IPFS and mint them as creator coins", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use an in-memory store and a scripted minter. No network access.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render and upload an article, then print its locators
    Publish {
        #[arg(short, long)]
        draft: PathBuf,
        /// Also write the published article JSON here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Mint a previously published article
    Mint {
        #[arg(short, long)]
        draft: PathBuf,
        #[arg(short, long)]
        published: PathBuf,
    },
    /// Publish and mint in one go
    Run {
        #[arg(short, long)]
        draft: PathBuf,
    },
    /// Print a rendering of the draft without uploading it
    Render {
        #[arg(short, long)]
        draft: PathBuf,
        #[arg(short, long, value_enum, default_value = "html")]
        format: RenderFormat,
        /// Creation time (RFC 3339). Defaults to now.
        #[arg(long)]
        created_at: Option<DateTime<Utc>>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderFormat {
    Html,
    Markdown,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "article-minter starting");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let mode = if cli.dry_run { SessionMode::DryRun } else { SessionMode::Live };
    if let Err(e) = run(cli.command, config, mode).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(
    command: Commands,
    config: article_minter::AppConfig,
    mode: SessionMode,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Render { draft, format, created_at } = &command {
        let draft = ArticleDraft::load(draft)?;
        let created_at = created_at.unwrap_or_else(Utc::now);
        let rendered = match format {
            RenderFormat::Html => render_html(&draft, created_at),
            RenderFormat::Markdown => render_markdown(&draft, created_at),
        };
        println!("{}", rendered);
        return Ok(());
    }

    let session = Session::start(config, mode).await?;
    let mut workflow = session.workflow();

    match command {
        Commands::Publish { draft, out } => {
            workflow.set_draft(ArticleDraft::load(&draft)?)?;
            let published = workflow.publish().await?;
            if let Some(out) = out {
                published.save(&out)?;
                tracing::info!(path = %out.display(), "Published article saved");
            }
            println!("{}", serde_json::to_string_pretty(&published)?);
        }
        Commands::Mint { draft, published } => {
            let draft = ArticleDraft::load(&draft)?;
            let published = PublishedArticle::load(&published)?;
            workflow.restore_published(draft, published)?;
            let minted = workflow.mint().await?;
            println!("{}", serde_json::to_string_pretty(&minted)?);
        }
        Commands::Run { draft } => {
            workflow.set_draft(ArticleDraft::load(&draft)?)?;
            let published = workflow.publish().await?;
            let minted = workflow.mint().await?;
            let report = json!({ "published": published, "minted": minted });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Render { .. } => {}
    }

    session.shutdown();
    Ok(())
}
