use std::path::Path;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::api::{create_router, AppState};
use folio_api::catalog::CatalogStore;
use folio_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Load and preprocess both catalogs, then fit the engine
    let catalog = CatalogStore::load(
        Path::new(&config.broad_catalog_path),
        Path::new(&config.niche_catalog_path),
    )
    .context("Failed to load catalogs")?;
    tracing::info!(
        broad = catalog.broad.len(),
        niche = catalog.niche.len(),
        "catalogs loaded"
    );

    let state = AppState::new(catalog);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
