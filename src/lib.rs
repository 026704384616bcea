//! Immersion TCO - Rust/Axum calculation service
//!
//! Compares total cost of ownership of air-cooled racks against
//! single-phase immersion tanks. The engine in [`tco`] is pure; this crate
//! root wires it to shared state and HTTP middleware.

use std::sync::Arc;

use axum::{extract::State, response::Json, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub mod cache;
pub mod config;
pub mod error;
pub mod tco;

use cache::AppCache;
use tco::Catalog;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(catalog: Catalog, cache: AppCache) -> Self {
        Self {
            catalog: Arc::new(catalog),
            cache,
        }
    }
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check and cache stats
        .route("/health", get(health_check))
        .route("/health/cache", get(cache_stats))
        // Calculation API
        .nest("/api/tco", tco::router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "immersion-tco",
        "catalog": {
            "tankSizes": state.catalog.tanks.len(),
            "rackTypes": state.catalog.racks.len(),
        }
    }))
}

/// Cache statistics endpoint
async fn cache_stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.cache.stats())
}
