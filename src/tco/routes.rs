//! HTTP route handlers for the TCO API.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::AppState;

use super::catalog::Catalog;
use super::engine;
use super::models::RawConfiguration;
use super::optimizer;
use super::requests::{OptimizeRequest, SensitivityRequest};
use super::responses::{CalculateResponse, OptimizeResponse, ValidateResponse};
use super::sensitivity::{self, SensitivityReport};
use super::validator::{self, ValidationError, VALIDATION_LIMITS};

const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the TCO router with all endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/catalog", get(catalog))
        .route("/validate", post(validate))
        .route("/calculate", post(calculate))
        .route("/optimize", post(optimize))
        .route("/sensitivity", post(sensitivity))
}

/// Decode a JSON body, reporting failures as a structured validation error.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(vec![ValidationError::malformed(e.to_string())]))
}

/// Health check for the calculation engine.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "tco-engine",
        "version": ENGINE_VERSION,
    }))
}

/// Reference catalog the engine is currently using.
async fn catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog.as_ref().clone())
}

/// Validate and normalize a configuration without calculating.
async fn validate(body: Bytes) -> Result<Json<ValidateResponse>> {
    let raw: RawConfiguration = decode(&body)?;

    let response = match validator::validate(&raw) {
        Ok(config) => ValidateResponse {
            valid: true,
            errors: Vec::new(),
            input_hash: Some(engine::config_hash(&config)),
            normalized: Some(config),
        },
        Err(errors) => ValidateResponse {
            valid: false,
            errors,
            normalized: None,
            input_hash: None,
        },
    };
    Ok(Json(response))
}

/// Run the full calculation, serving repeated configurations from cache.
async fn calculate(State(state): State<AppState>, body: Bytes) -> Result<Json<CalculateResponse>> {
    let raw: RawConfiguration = decode(&body)?;
    let config = validator::validate(&raw).map_err(AppError::Validation)?;
    let input_hash = engine::config_hash(&config);

    let (result, cached) = match state.cache.get(&input_hash).await {
        Some(result) => (result, true),
        None => {
            let result = Arc::new(engine::calculate_normalized(&config, &state.catalog)?);
            state.cache.insert(input_hash.clone(), result.clone()).await;
            (result, false)
        }
    };

    if result.has_warnings() {
        tracing::info!(
            input_hash = %input_hash,
            warnings = result.warnings.len(),
            "calculation completed with warnings"
        );
    }

    Ok(Json(CalculateResponse {
        calculation_id: Uuid::new_v4(),
        calculated_at: Utc::now(),
        input_hash,
        cached,
        result: result.as_ref().clone(),
    }))
}

/// Pack a power target into tanks using the active catalog.
async fn optimize(State(state): State<AppState>, body: Bytes) -> Result<Json<OptimizeResponse>> {
    let request: OptimizeRequest = decode(&body)?;
    let limit = VALIDATION_LIMITS.target_power_kw;
    if !limit.contains(request.target_power_kw) {
        return Err(AppError::Validation(vec![ValidationError {
            field: "targetPowerKw".to_string(),
            message: format!(
                "must be within [{}, {}], got {}",
                limit.min, limit.max, request.target_power_kw
            ),
            kind: validator::ValidationErrorKind::Range,
        }]));
    }

    let allocations = optimizer::optimize(request.target_power_kw, &state.catalog.tanks)?;
    Ok(Json(OptimizeResponse {
        target_power_kw: request.target_power_kw,
        allocated_power_kw: optimizer::allocated_power_kw(&allocations),
        total_tanks: allocations.iter().map(|a| a.quantity).sum(),
        allocations,
    }))
}

/// Sweep the main cost drivers around a configuration.
async fn sensitivity(State(state): State<AppState>, body: Bytes) -> Result<Json<SensitivityReport>> {
    let request: SensitivityRequest = decode(&body)?;
    let config = validator::validate(&request.configuration).map_err(AppError::Validation)?;
    let report = sensitivity::analyze(&config, &state.catalog, request.variation)?;
    Ok(Json(report))
}
