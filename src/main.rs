//! `rendezvous-server` — the thin transport binary that accepts WebSocket
//! connections and drives the matchmaking/relay core. It owns no
//! matchmaking logic: it authenticates, registers a session, decodes and
//! encodes the wire protocol, and dispatches to `rendezvous-app`'s use
//! cases. All matchmaking state (`AppDeps`) is constructed once here and
//! threaded through every connection's handler.

mod gateway;

use axum::routing::get;
use axum::Router;
use rendezvous_app::AppDeps;
use rendezvous_infra::{config, InMemoryBlockStore, StaticIdentityStore, WordListModerator};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    config::load_dotenv();
    let matchmaking_config = config::load_config(&config::config_path())?;
    let bind_addr = matchmaking_config.bind_addr.clone();

    let deps = Arc::new(AppDeps::new(
        Arc::new(StaticIdentityStore::new()),
        Arc::new(InMemoryBlockStore::new()),
        Arc::new(WordListModerator::default()),
        matchmaking_config,
    ));

    let app = Router::new()
        .route("/ws", get(gateway::upgrade))
        .with_state(deps);

    let listener = TcpListener::bind(bind_addr.as_str()).await?;
    tracing::info!(%bind_addr, "rendezvous-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
