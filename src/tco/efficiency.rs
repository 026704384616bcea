//! PUE, environmental impact and floor space.

use serde::Serialize;

use super::anomaly::{Anomalies, AnomalyKind};
use super::capex::CapexResult;
use super::catalog::Catalog;
use super::models::Configuration;
use super::opex::{air_facility_power, immersion_facility_power, FacilityPower, HOURS_PER_YEAR};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalImpact {
    pub annual_energy_savings_kwh: f64,
    pub annual_carbon_savings_kg: f64,
    pub annual_carbon_savings_tonnes: f64,
    pub annual_water_savings_liters: f64,
    /// Energy savings relative to the air-cooled facility draw
    pub energy_reduction_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceUtilization {
    pub air_floor_area_sqm: f64,
    pub immersion_floor_area_sqm: f64,
    pub savings_sqm: f64,
    pub savings_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerSummary {
    pub air: FacilityPower,
    pub immersion: FacilityPower,
    /// Air-side electrical distribution losses; informational, not part of PUE
    pub distribution_loss_kw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencySummary {
    pub pue_air: f64,
    pub pue_immersion: f64,
    pub energy_efficiency_improvement_percent: f64,
    pub power: PowerSummary,
    pub environmental: EnvironmentalImpact,
    pub space: SpaceUtilization,
}

/// Facility-to-IT power ratio, never below 1.0.
///
/// A ratio under 1.0 (or a non-finite one) means an upstream parameter is
/// wrong; the value is clamped and the anomaly recorded.
pub fn pue(power: &FacilityPower, field: &str, anomalies: &mut Anomalies) -> f64 {
    let raw = power.total_kw / power.it_kw;
    if raw.is_finite() && raw >= 1.0 {
        return raw;
    }
    anomalies.push(
        AnomalyKind::PueBelowOne,
        field,
        raw,
        Some(1.0),
        format!(
            "PUE of {raw} from {} kW facility over {} kW IT is physically impossible; clamped to 1.0",
            power.total_kw, power.it_kw
        ),
    );
    1.0
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

pub fn compute_efficiency(
    config: &Configuration,
    capex: &CapexResult,
    catalog: &Catalog,
    anomalies: &mut Anomalies,
) -> EfficiencySummary {
    let air_config = &config.air_cooling;
    let immersion_config = &config.immersion_cooling;

    let air = air_facility_power(capex.air.it_power_kw, air_config.hvac_efficiency);
    let immersion = immersion_facility_power(
        capex.immersion.it_power_kw,
        immersion_config.pumping_efficiency,
        immersion_config.heat_exchanger_efficiency,
    );

    let pue_air = pue(&air, "summary.pueAir", anomalies);
    let pue_immersion = pue(&immersion, "summary.pueImmersion", anomalies);

    let air_annual_kwh = air.total_kw * HOURS_PER_YEAR;
    let annual_energy_savings_kwh = air_annual_kwh - immersion.total_kw * HOURS_PER_YEAR;
    let factors = &catalog.environment;
    let annual_carbon_savings_kg = annual_energy_savings_kwh * factors.carbon_kg_per_kwh;

    let space_savings = capex.air.floor_area_sqm - capex.immersion.floor_area_sqm;

    EfficiencySummary {
        pue_air,
        pue_immersion,
        energy_efficiency_improvement_percent: (pue_air - pue_immersion) / pue_air * 100.0,
        power: PowerSummary {
            air,
            immersion,
            distribution_loss_kw: air.it_kw * (1.0 / air_config.power_distribution_efficiency - 1.0),
        },
        environmental: EnvironmentalImpact {
            annual_energy_savings_kwh,
            annual_carbon_savings_kg,
            annual_carbon_savings_tonnes: annual_carbon_savings_kg / 1000.0,
            annual_water_savings_liters: annual_energy_savings_kwh * factors.water_liters_per_kwh,
            energy_reduction_percent: percent_of(annual_energy_savings_kwh, air_annual_kwh),
        },
        space: SpaceUtilization {
            air_floor_area_sqm: capex.air.floor_area_sqm,
            immersion_floor_area_sqm: capex.immersion.floor_area_sqm,
            savings_sqm: space_savings,
            savings_percent: percent_of(space_savings, capex.air.floor_area_sqm),
        },
    }
}
