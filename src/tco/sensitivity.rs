//! One-at-a-time sensitivity sweep over the main cost drivers.
//!
//! Each parameter is moved down and up by the same relative variation
//! while everything else stays at its configured value. Cases come back
//! ordered by NPV swing, largest first, ready for a tornado chart.

use serde::Serialize;

use super::catalog::Catalog;
use super::engine::{calculate_normalized, CalculationError};
use super::models::Configuration;
use super::validator::{Limit, ValidationError, ValidationErrorKind, VALIDATION_LIMITS};

pub const DEFAULT_VARIATION: f64 = 0.2;
pub const VARIATION_LIMIT: Limit = Limit::inclusive(0.01, 0.9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SensitivityParameter {
    EnergyCost,
    DiscountRate,
    EnergyEscalationRate,
    MaintenanceEscalationRate,
}

impl SensitivityParameter {
    const ALL: [Self; 4] = [
        Self::EnergyCost,
        Self::DiscountRate,
        Self::EnergyEscalationRate,
        Self::MaintenanceEscalationRate,
    ];

    /// Range the validator accepts for this parameter.
    fn limit(self) -> Limit {
        match self {
            Self::EnergyCost => VALIDATION_LIMITS.energy_cost_per_kwh,
            Self::DiscountRate => VALIDATION_LIMITS.discount_rate,
            Self::EnergyEscalationRate => VALIDATION_LIMITS.energy_escalation_rate,
            Self::MaintenanceEscalationRate => VALIDATION_LIMITS.maintenance_escalation_rate,
        }
    }

    fn apply(self, config: &mut Configuration, value: f64) {
        let financial = &mut config.financial;
        match self {
            Self::EnergyCost => financial.custom_energy_cost_per_kwh = Some(value),
            Self::DiscountRate => financial.discount_rate = value,
            Self::EnergyEscalationRate => financial.energy_escalation_rate = value,
            Self::MaintenanceEscalationRate => financial.maintenance_escalation_rate = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityCase {
    pub parameter: SensitivityParameter,
    pub base_value: f64,
    pub low_value: f64,
    pub high_value: f64,
    pub low_npv_savings: f64,
    pub high_npv_savings: f64,
    pub low_tco_savings: f64,
    pub high_tco_savings: f64,
    /// |high - low| NPV savings
    pub npv_swing: f64,
    /// A swept value fell outside the accepted range and was pulled back in
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityReport {
    pub variation: f64,
    pub base_npv_savings: f64,
    pub base_tco_savings: f64,
    pub cases: Vec<SensitivityCase>,
}

/// Sweep every parameter by ±`variation` around a validated configuration.
pub fn analyze(
    config: &Configuration,
    catalog: &Catalog,
    variation: f64,
) -> Result<SensitivityReport, CalculationError> {
    if !VARIATION_LIMIT.contains(variation) {
        return Err(CalculationError::Validation(vec![ValidationError {
            field: "variation".to_string(),
            message: format!(
                "must be within [{}, {}], got {variation}",
                VARIATION_LIMIT.min, VARIATION_LIMIT.max
            ),
            kind: ValidationErrorKind::Range,
        }]));
    }

    let financial = &config.financial;
    let prices = catalog.price_context(
        financial.currency,
        financial.region,
        financial.custom_energy_cost_per_kwh,
        financial.custom_labor_cost_per_hour,
    )?;
    let base = calculate_normalized(config, catalog)?;

    let mut cases = Vec::with_capacity(SensitivityParameter::ALL.len());
    for parameter in SensitivityParameter::ALL {
        let base_value = match parameter {
            SensitivityParameter::EnergyCost => prices.energy_cost_per_kwh,
            SensitivityParameter::DiscountRate => financial.discount_rate,
            SensitivityParameter::EnergyEscalationRate => financial.energy_escalation_rate,
            SensitivityParameter::MaintenanceEscalationRate => financial.maintenance_escalation_rate,
        };
        let limit = parameter.limit();
        let low_raw = base_value * (1.0 - variation);
        let high_raw = base_value * (1.0 + variation);
        let low_value = limit.clamp(low_raw);
        let high_value = limit.clamp(high_raw);
        let clamped = low_value != low_raw || high_value != high_raw;
        if clamped {
            tracing::debug!(?parameter, low_value, high_value, "sweep value clamped to accepted range");
        }

        let run = |value: f64| {
            let mut varied = config.clone();
            parameter.apply(&mut varied, value);
            calculate_normalized(&varied, catalog)
        };
        let low = run(low_value)?;
        let high = run(high_value)?;

        cases.push(SensitivityCase {
            parameter,
            base_value,
            low_value,
            high_value,
            low_npv_savings: low.summary.npv_savings,
            high_npv_savings: high.summary.npv_savings,
            low_tco_savings: low.summary.total_tco_savings,
            high_tco_savings: high.summary.total_tco_savings,
            npv_swing: (high.summary.npv_savings - low.summary.npv_savings).abs(),
            clamped,
        });
    }
    cases.sort_by(|a, b| b.npv_swing.total_cmp(&a.npv_swing));

    tracing::debug!(cases = cases.len(), variation, "sensitivity sweep complete");

    Ok(SensitivityReport {
        variation,
        base_npv_savings: base.summary.npv_savings,
        base_tco_savings: base.summary.total_tco_savings,
        cases,
    })
}
