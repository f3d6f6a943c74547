use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gamestream::{create_router, AppState, CatalogStore, Config, HttpCatalogProvider, Refresher};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: PORT (default: 8080), CATALOG_URL");
            eprintln!("Optional: REFRESH_INTERVAL_SECS, STREAM_TICK_SECS, FETCH_TIMEOUT_SECS");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting game stream server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!(
        "Refresh every {:?}, stream tick {:?}",
        config.refresh_interval,
        config.stream_tick
    );

    let provider = match HttpCatalogProvider::new(config.catalog_url.clone(), config.fetch_timeout)
    {
        Ok(p) => Arc::new(p),
        Err(e) => {
            eprintln!("HTTP client error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Catalog: {}", provider.url());

    let store = Arc::new(CatalogStore::new());
    let refresher = Refresher::new(store.clone(), provider, config.refresh_interval);

    // Load the catalog once before serving; an empty catalog is fine.
    refresher.refresh_logged().await;
    tokio::spawn(refresher.run());

    let state = AppState::new(store, config.stream_tick);
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running at http://localhost:{}", config.listen_addr.port());

    axum::serve(listener, app).await.expect("Server error");
}
