//! quoted — the quote service daemon.
//!
//! Single binary that assembles the service:
//! - Quote store (MySQL via sqlx, or in-memory)
//! - Author service client
//! - Allocation registry for the mock-memory demonstration
//! - REST API
//!
//! # Usage
//!
//! ```text
//! AUTHOR_SERVICE_URL=http://authors:8080 DATABASE_URL=mysql://user:pw@db/quotes \
//!     quoted --port 8080
//! ```

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use quote_api::ApiState;
use quote_authors::AuthorClient;
use quote_memdemo::AllocationRegistry;
use quote_store::{MemoryQuoteStore, MysqlQuoteStore, QuoteStore};

#[derive(Parser)]
#[command(name = "quoted", about = "Quote service daemon")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Quote store backend: "mysql" or "memory".
    #[arg(long, default_value = "mysql")]
    store: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,quoted=debug,quote_api=debug,quote_memdemo=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let cli = Cli::parse();

    let version = std::env::var("VERSION").unwrap_or_else(|_| "dev".to_string());
    let author_service_url = std::env::var("AUTHOR_SERVICE_URL")
        .map_err(|_| anyhow::anyhow!("AUTHOR_SERVICE_URL must be set"))?;

    // ── Initialize components ──────────────────────────────────

    let store: Arc<dyn QuoteStore> = match cli.store.as_str() {
        "mysql" => {
            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set for the mysql store"))?;
            let store = MysqlQuoteStore::connect(&database_url).await?;
            store.ensure_schema().await?;
            info!("mysql quote store connected");
            Arc::new(store)
        }
        "memory" => {
            info!("in-memory quote store with sample quotes");
            Arc::new(MemoryQuoteStore::with_sample_quotes())
        }
        other => anyhow::bail!("unknown store backend: {other}"),
    };

    let authors = AuthorClient::new(author_service_url)?;
    info!("author service client initialized");

    let registry = AllocationRegistry::new();

    // ── Start API server ───────────────────────────────────────

    let state = ApiState {
        store,
        authors,
        registry,
        version,
    };
    let router = quote_api::build_router(state);

    let addr = SocketAddr::from((cli.host, cli.port));
    info!(%addr, "quote service starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("quote service stopped");
    Ok(())
}
