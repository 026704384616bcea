//! Response payloads for the TCO API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::models::Configuration;
use super::optimizer::TankAllocation;
use super::results::CalculationResult;
use super::validator::ValidationError;

/// Envelope around a calculation result.
///
/// Identity and timestamp live here so the result itself stays a pure
/// function of the configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub calculation_id: Uuid,
    pub calculated_at: DateTime<Utc>,
    /// SHA256 of the normalized configuration
    pub input_hash: String,
    /// Whether the result was served from cache
    pub cached: bool,
    pub result: CalculationResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
    /// Normalized configuration, inactive input modes removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<Configuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_hash: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub target_power_kw: f64,
    pub allocated_power_kw: f64,
    pub total_tanks: u32,
    pub allocations: Vec<TankAllocation>,
}
