//! Operating expenditure projection over the analysis horizon.

use serde::Serialize;

use super::capex::CapexResult;
use super::catalog::{Catalog, PriceContext};
use super::models::Configuration;

pub const HOURS_PER_YEAR: f64 = 8760.0;

/// IT load and the cooling overhead drawn on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityPower {
    pub it_kw: f64,
    pub overhead_kw: f64,
    pub total_kw: f64,
}

impl FacilityPower {
    fn from_total(it_kw: f64, total_kw: f64) -> Self {
        Self {
            it_kw,
            overhead_kw: total_kw - it_kw,
            total_kw,
        }
    }
}

/// Air cooling: HVAC divides the IT load by its efficiency.
pub fn air_facility_power(it_kw: f64, hvac_efficiency: f64) -> FacilityPower {
    FacilityPower::from_total(it_kw, it_kw / hvac_efficiency)
}

/// Immersion cooling: pump and heat exchanger losses add proportional overhead.
pub fn immersion_facility_power(
    it_kw: f64,
    pumping_efficiency: f64,
    heat_exchanger_efficiency: f64,
) -> FacilityPower {
    let pump_overhead = 1.0 - pumping_efficiency;
    let heat_exchanger_overhead = 1.0 - heat_exchanger_efficiency;
    FacilityPower::from_total(it_kw, it_kw * (1.0 + pump_overhead + heat_exchanger_overhead))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCosts {
    pub energy: f64,
    pub maintenance: f64,
    pub labor: f64,
    pub total: f64,
}

impl YearCosts {
    fn new(energy: f64, maintenance: f64, labor: f64) -> Self {
        Self {
            energy,
            maintenance,
            labor,
            total: energy + maintenance + labor,
        }
    }
}

/// Costs of one analysis year (1-indexed).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpexYearRecord {
    pub year: u32,
    pub air: YearCosts,
    pub immersion: YearCosts,
    /// Air total minus immersion total for this year
    pub savings: f64,
    /// Running sum of `savings` up to and including this year
    pub cumulative_savings: f64,
}

/// Base-year cost drivers for one cooling method.
struct AnnualBase {
    facility_kw: f64,
    maintenance: f64,
    labor_hours: f64,
}

impl AnnualBase {
    fn year(&self, year: u32, config: &Configuration, prices: &PriceContext) -> YearCosts {
        let exponent = year.saturating_sub(1) as i32;
        let financial = &config.financial;
        let energy_factor = (1.0 + financial.energy_escalation_rate).powi(exponent);
        let maintenance_factor = (1.0 + financial.maintenance_escalation_rate).powi(exponent);

        YearCosts::new(
            self.facility_kw * HOURS_PER_YEAR * prices.energy_cost_per_kwh * energy_factor,
            self.maintenance * maintenance_factor,
            self.labor_hours * prices.labor_cost_per_hour * maintenance_factor,
        )
    }
}

/// Project yearly costs, one record per analysis year.
pub fn compute_opex_series(
    config: &Configuration,
    capex: &CapexResult,
    catalog: &Catalog,
    prices: &PriceContext,
) -> Vec<OpexYearRecord> {
    let factors = &catalog.cost_factors;
    let costs = &capex.breakdown;

    let air = AnnualBase {
        facility_kw: air_facility_power(capex.air.it_power_kw, config.air_cooling.hvac_efficiency).total_kw,
        maintenance: costs.air.equipment * factors.air_maintenance,
        labor_hours: capex.air.labor_hours_per_year,
    };
    let immersion = AnnualBase {
        facility_kw: immersion_facility_power(
            capex.immersion.it_power_kw,
            config.immersion_cooling.pumping_efficiency,
            config.immersion_cooling.heat_exchanger_efficiency,
        )
        .total_kw,
        maintenance: costs.immersion.equipment * factors.immersion_maintenance
            + costs.immersion.coolant * factors.coolant_top_up,
        labor_hours: capex.immersion.labor_hours_per_year,
    };

    let mut cumulative_savings = 0.0;
    (1..=config.financial.analysis_years)
        .map(|year| {
            let air = air.year(year, config, prices);
            let immersion = immersion.year(year, config, prices);
            let savings = air.total - immersion.total;
            cumulative_savings += savings;
            OpexYearRecord {
                year,
                air,
                immersion,
                savings,
                cumulative_savings,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tco::anomaly::Anomalies;
    use crate::tco::capex::compute_capex;
    use crate::tco::models::RawConfiguration;
    use crate::tco::validator::validate;

    fn config() -> Configuration {
        let raw: RawConfiguration = serde_json::from_str(
            r#"{
                "airCooling": {"rackCount": 100, "powerPerRackKw": 12},
                "immersionCooling": {"targetPowerKw": 1200},
                "financial": {"analysisYears": 7, "energyEscalationRate": 0.04}
            }"#,
        )
        .unwrap();
        validate(&raw).unwrap()
    }

    fn series(config: &Configuration) -> Vec<OpexYearRecord> {
        let catalog = Catalog::default();
        let prices = catalog
            .price_context(config.financial.currency, config.financial.region, None, None)
            .unwrap();
        let capex = compute_capex(config, &catalog, &prices, &mut Anomalies::new()).unwrap();
        compute_opex_series(config, &capex, &catalog, &prices)
    }

    #[test]
    fn test_air_facility_power() {
        let power = air_facility_power(1000.0, 0.5);
        assert_eq!(power.total_kw, 2000.0);
        assert_eq!(power.overhead_kw, 1000.0);
    }

    #[test]
    fn test_immersion_facility_power() {
        let power = immersion_facility_power(1000.0, 0.95, 0.97);
        assert!((power.total_kw - 1080.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_record_per_year() {
        let records = series(&config());
        assert_eq!(records.len(), 7);
        assert_eq!(records.first().map(|r| r.year), Some(1));
        assert_eq!(records.last().map(|r| r.year), Some(7));
    }

    #[test]
    fn test_first_year_energy() {
        let records = series(&config());
        let expected = 1200.0 / 0.65 * HOURS_PER_YEAR * 0.12;
        assert!((records[0].air.energy - expected).abs() < 1e-6);
    }

    #[test]
    fn test_costs_strictly_increase_under_escalation() {
        let records = series(&config());
        for pair in records.windows(2) {
            assert!(pair[1].air.energy > pair[0].air.energy);
            assert!(pair[1].immersion.energy > pair[0].immersion.energy);
            assert!(pair[1].air.maintenance > pair[0].air.maintenance);
            assert!(pair[1].immersion.labor > pair[0].immersion.labor);
        }
    }

    #[test]
    fn test_higher_energy_escalation_raises_later_years() {
        let base = config();
        let mut steeper = base.clone();
        steeper.financial.energy_escalation_rate = 0.08;

        let low = series(&base);
        let high = series(&steeper);
        assert_eq!(low[0].air.energy, high[0].air.energy);
        for (l, h) in low.iter().zip(&high).skip(1) {
            assert!(h.air.energy > l.air.energy);
            assert!(h.immersion.energy > l.immersion.energy);
        }
    }

    #[test]
    fn test_cumulative_savings_running_sum() {
        let records = series(&config());
        let mut running = 0.0;
        for record in &records {
            running += record.savings;
            assert!((record.cumulative_savings - running).abs() < 1e-6);
            assert!((record.savings - (record.air.total - record.immersion.total)).abs() < 1e-6);
        }
    }
}
