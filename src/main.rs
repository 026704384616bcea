//! Immersion TCO - Rust/Axum calculation service
//!
//! Serves the air vs immersion cooling TCO engine as a JSON API.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use immersion_tco::{app, cache::AppCache, config::Settings, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "immersion_tco=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    let catalog = settings.load_catalog()?;

    // Create cache and application state
    let cache = AppCache::new(settings.cache_max_entries, settings.cache_ttl);
    let state = AppState::new(catalog, cache);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("Listening on {}", settings.bind_addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
