use bin_inventory::config::Config;
use bin_inventory::db::{self, InventoryStore};
use bin_inventory::router::{InventoryState, inventory_router};
use bin_inventory::service::PngQrRenderer;
use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        base_url = %cfg.qr.base_url,
        loglevel = %cfg.basic.loglevel,
        body_limit = cfg.basic.body_limit
    );

    let pool = db::connect(&cfg.basic.database_url).await?;
    let renderer = Arc::new(PngQrRenderer::new(cfg.qr.min_dimension));
    let store = InventoryStore::new(pool, cfg.qr.base_url.clone(), renderer);
    store.init_schema().await?;

    if cfg.qr.regenerate_on_start {
        match store.regenerate_qr_codes().await {
            Ok(count) => info!(count, "stored QR codes refreshed"),
            Err(e) => warn!(error = %e, "failed to refresh stored QR codes"),
        }
    }

    // Build axum router and serve
    let state = InventoryState::new(store.clone()).with_body_limit(cfg.basic.body_limit);
    let app = inventory_router(state);

    let listener = TcpListener::bind(&cfg.basic.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.pool().close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
