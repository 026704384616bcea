//! Internal invariant violations detected mid-calculation.
//!
//! Anomalies never abort a run. The stage that detects one substitutes a
//! safe value, records what it saw, and the assembled result carries the
//! list as warnings.

use serde::Serialize;

/// Which invariant was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnomalyKind {
    /// PUE computed below the physical floor of 1.0
    PueBelowOne,
    /// Monetary amount came out negative
    NegativeCost,
    /// NaN or infinity reached an output field
    NonFinite,
    /// Manual tank loaded above its rated capacity
    TankOverCapacity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationAnomaly {
    pub kind: AnomalyKind,
    pub field: String,
    /// Offending value as computed; `None` when it was not a finite number
    pub raw_value: Option<f64>,
    /// Value written to the result instead
    pub corrected_value: Option<f64>,
    pub message: String,
}

/// Collects anomalies across the pipeline stages of one calculation.
#[derive(Debug, Default)]
pub struct Anomalies {
    items: Vec<ComputationAnomaly>,
}

impl Anomalies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: AnomalyKind,
        field: impl Into<String>,
        raw_value: f64,
        corrected_value: Option<f64>,
        message: impl Into<String>,
    ) {
        let anomaly = ComputationAnomaly {
            kind,
            field: field.into(),
            raw_value: raw_value.is_finite().then_some(raw_value),
            corrected_value,
            message: message.into(),
        };
        tracing::warn!(
            kind = ?anomaly.kind,
            field = %anomaly.field,
            raw_value = raw_value,
            "computation anomaly: {}",
            anomaly.message
        );
        self.items.push(anomaly);
    }

    /// Clamp a monetary amount to zero, recording the violation.
    pub fn non_negative(&mut self, field: &str, value: f64) -> f64 {
        if value < 0.0 {
            self.push(
                AnomalyKind::NegativeCost,
                field,
                value,
                Some(0.0),
                "cost was negative and has been clamped to 0",
            );
            0.0
        } else {
            value
        }
    }

    /// Replace a non-finite number with 0, recording the violation.
    pub fn finite(&mut self, field: &str, value: f64) -> f64 {
        if value.is_finite() {
            value
        } else {
            self.push(
                AnomalyKind::NonFinite,
                field,
                value,
                Some(0.0),
                format!("value {value} is not finite and has been replaced with 0"),
            );
            0.0
        }
    }

    pub fn into_vec(self) -> Vec<ComputationAnomaly> {
        self.items
    }
}
