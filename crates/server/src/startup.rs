use std::{future::Future, sync::Arc};

use axum::Router;
use configs::{AppConfig, StoreConfig};
use service::BookStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`), falling back to env-overridden defaults.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Initial store contents per config: seed books or nothing.
pub fn build_store(cfg: &StoreConfig) -> Arc<BookStore> {
    if cfg.seed {
        Arc::new(BookStore::seeded())
    } else {
        Arc::new(BookStore::empty())
    }
}

/// Router over the given store, with CORS and request tracing.
pub fn build_app(store: Arc<BookStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only by process kill");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the store and router from config and run the HTTP server.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = build_store(&cfg.store);
    info!(books = store.len().await, seeded = cfg.store.seed, "record store initialized");
    let app = build_app(store);

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, "starting bookstore server");
    serve(listener, app, shutdown_signal()).await
}
