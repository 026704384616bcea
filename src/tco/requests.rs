//! Request payloads for the TCO API.

use serde::Deserialize;

use super::models::RawConfiguration;
use super::sensitivity::DEFAULT_VARIATION;

/// Request payload for a standalone tank optimization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub target_power_kw: f64,
}

/// Request payload for a sensitivity sweep.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityRequest {
    pub configuration: RawConfiguration,
    /// Relative variation applied down and up (0.2 = ±20 %)
    #[serde(default = "default_variation")]
    pub variation: f64,
}

fn default_variation() -> f64 {
    DEFAULT_VARIATION
}
