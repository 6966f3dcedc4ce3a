// LINAMVE League - Development Backend
// Speaks the hosted `?action=` API on top of a JSON store file

use anyhow::{Context, Result};
use clap::Parser;
use linamve::config::Config;
use linamve::server;
use linamve::store::LeagueStore;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "linamve-server")]
#[command(about = "Local backend for the LINAMVE client", version)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address
    #[arg(long, env = "LINAMVE_SERVER_ADDR")]
    addr: Option<String>,

    /// JSON store file
    #[arg(long, env = "LINAMVE_STORE")]
    store: Option<PathBuf>,
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(addr) = args.addr {
        config.server_addr = addr;
    }
    if let Some(store) = args.store {
        config.store_path = store;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    println!("🥋 LINAMVE - Development Backend");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let store = LeagueStore::open(&config.store_path)
        .with_context(|| format!("opening store {}", config.store_path.display()))?;
    println!("✓ Store opened: {}", config.store_path.display());
    println!(
        "  {} events · {} ranking rows · {} posts",
        store.data().events.len(),
        store.data().ranking.len(),
        store.data().social.posts.len()
    );

    let app = server::router(store);

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("binding {}", config.server_addr))?;

    info!(addr = %config.server_addr, "server listening");
    println!("\n🚀 Server running on http://{}/", config.server_addr);
    println!("   Client: linamve --api-base http://{}/", config.server_addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await.context("server stopped")?;
    Ok(())
}
