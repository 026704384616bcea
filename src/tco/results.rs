//! Calculation result assembly.
//!
//! Pure composition of the stage outputs plus a final pass that guarantees
//! every number handed to the UI is finite.

use serde::Serialize;

use super::anomaly::{Anomalies, ComputationAnomaly};
use super::capex::{CapexBreakdown, CapexResult, CostBreakdown};
use super::efficiency::{EfficiencySummary, EnvironmentalImpact, PowerSummary, SpaceUtilization};
use super::financial::{CumulativeSavings, FinancialSummary, Payback, TcoTotals};
use super::models::{Configuration, Currency};
use super::opex::{FacilityPower, OpexYearRecord, YearCosts};
use super::optimizer::TankAllocation;

/// Headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub currency: Currency,
    pub analysis_years: u32,
    pub total_tco_savings_5yr: f64,
    pub total_tco_savings: f64,
    pub total_capex_savings: f64,
    pub total_opex_savings_5yr: f64,
    pub npv_savings: f64,
    pub roi_percent: Option<f64>,
    pub payback: Payback,
    pub payback_months: Option<f64>,
    pub energy_efficiency_improvement_percent: f64,
    pub pue_air: f64,
    pub pue_immersion: f64,
    pub cost_per_kw_air: f64,
    pub cost_per_kw_immersion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub capex: CapexBreakdown,
    pub opex_annual: Vec<OpexYearRecord>,
    pub tank_allocations: Vec<TankAllocation>,
    pub rack_count: u32,
    pub tank_count: u32,
    pub tco_5yr: TcoTotals,
    pub tco: TcoTotals,
    pub cumulative_savings: Vec<CumulativeSavings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CoolingMethod {
    Air,
    Immersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CostCategory {
    Equipment,
    Installation,
    Infrastructure,
    Coolant,
    Energy,
    Maintenance,
    Labor,
}

/// Cumulative cost of each method at the end of a year (year 0 = CAPEX).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoProgressionPoint {
    pub year: u32,
    pub air: f64,
    pub immersion: f64,
    pub savings: f64,
}

/// Horizon total of one cost category per method.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryComparison {
    pub category: CostCategory,
    pub air: f64,
    pub immersion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PueComparison {
    pub method: CoolingMethod,
    pub pue: f64,
}

/// Series for visualization, projected from the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub tco_progression: Vec<TcoProgressionPoint>,
    pub cost_categories: Vec<CategoryComparison>,
    pub pue_comparison: Vec<PueComparison>,
}

/// Output of one calculation run. Never mutated once assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub summary: Summary,
    pub breakdown: Breakdown,
    pub environmental: EnvironmentalImpact,
    pub power: PowerSummary,
    pub space: SpaceUtilization,
    pub charts: Charts,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ComputationAnomaly>,
}

impl CalculationResult {
    /// Whether any invariant was corrected during the run.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn per_kw(total: f64, it_kw: f64) -> f64 {
    if it_kw > 0.0 {
        total / it_kw
    } else {
        0.0
    }
}

fn tco_progression(capex: &CapexBreakdown, opex: &[OpexYearRecord]) -> Vec<TcoProgressionPoint> {
    let mut air = capex.air.total;
    let mut immersion = capex.immersion.total;
    let mut points = vec![TcoProgressionPoint {
        year: 0,
        air,
        immersion,
        savings: air - immersion,
    }];
    for record in opex {
        air += record.air.total;
        immersion += record.immersion.total;
        points.push(TcoProgressionPoint {
            year: record.year,
            air,
            immersion,
            savings: air - immersion,
        });
    }
    points
}

fn cost_categories(capex: &CapexBreakdown, opex: &[OpexYearRecord]) -> Vec<CategoryComparison> {
    let sum = |pick: fn(&YearCosts) -> f64| -> (f64, f64) {
        opex.iter()
            .fold((0.0, 0.0), |(a, i), r| (a + pick(&r.air), i + pick(&r.immersion)))
    };
    let (energy_air, energy_immersion) = sum(|c| c.energy);
    let (maintenance_air, maintenance_immersion) = sum(|c| c.maintenance);
    let (labor_air, labor_immersion) = sum(|c| c.labor);

    let row = |category, air, immersion| CategoryComparison { category, air, immersion };
    vec![
        row(CostCategory::Equipment, capex.air.equipment, capex.immersion.equipment),
        row(CostCategory::Installation, capex.air.installation, capex.immersion.installation),
        row(CostCategory::Infrastructure, capex.air.infrastructure, capex.immersion.infrastructure),
        row(CostCategory::Coolant, capex.air.coolant, capex.immersion.coolant),
        row(CostCategory::Energy, energy_air, energy_immersion),
        row(CostCategory::Maintenance, maintenance_air, maintenance_immersion),
        row(CostCategory::Labor, labor_air, labor_immersion),
    ]
}

/// Compose the stage outputs into one result.
pub fn assemble(
    capex: &CapexResult,
    opex: Vec<OpexYearRecord>,
    financial: FinancialSummary,
    efficiency: EfficiencySummary,
    config: &Configuration,
    mut anomalies: Anomalies,
) -> CalculationResult {
    let summary = Summary {
        currency: config.financial.currency,
        analysis_years: config.financial.analysis_years,
        total_tco_savings_5yr: financial.tco_5yr.savings,
        total_tco_savings: financial.tco.savings,
        total_capex_savings: capex.breakdown.savings,
        total_opex_savings_5yr: financial.total_opex_savings_5yr,
        npv_savings: financial.npv_savings,
        roi_percent: financial.roi_percent,
        payback: financial.payback,
        payback_months: financial.payback.months(),
        energy_efficiency_improvement_percent: efficiency.energy_efficiency_improvement_percent,
        pue_air: efficiency.pue_air,
        pue_immersion: efficiency.pue_immersion,
        cost_per_kw_air: per_kw(financial.tco.air, capex.air.it_power_kw),
        cost_per_kw_immersion: per_kw(financial.tco.immersion, capex.immersion.it_power_kw),
    };

    let charts = Charts {
        tco_progression: tco_progression(&capex.breakdown, &opex),
        cost_categories: cost_categories(&capex.breakdown, &opex),
        pue_comparison: vec![
            PueComparison { method: CoolingMethod::Air, pue: efficiency.pue_air },
            PueComparison { method: CoolingMethod::Immersion, pue: efficiency.pue_immersion },
        ],
    };

    let mut result = CalculationResult {
        summary,
        breakdown: Breakdown {
            capex: capex.breakdown.clone(),
            opex_annual: opex,
            tank_allocations: capex.immersion.allocations.clone(),
            rack_count: capex.air.rack_count,
            tank_count: capex.immersion.tank_count,
            tco_5yr: financial.tco_5yr,
            tco: financial.tco,
            cumulative_savings: financial.cumulative_savings,
        },
        environmental: efficiency.environmental,
        power: efficiency.power,
        space: efficiency.space,
        charts,
        warnings: Vec::new(),
    };

    result.sanitize("", &mut anomalies);
    result.summary.payback_months = result.summary.payback.months();
    result.warnings = anomalies.into_vec();
    result
}

/// Replace non-finite numbers in place, recording each one.
trait Sanitize {
    fn sanitize(&mut self, path: &str, anomalies: &mut Anomalies);
}

impl Sanitize for f64 {
    fn sanitize(&mut self, path: &str, anomalies: &mut Anomalies) {
        *self = anomalies.finite(path, *self);
    }
}

impl<T: Sanitize> Sanitize for Option<T> {
    fn sanitize(&mut self, path: &str, anomalies: &mut Anomalies) {
        if let Some(value) = self {
            value.sanitize(path, anomalies);
        }
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(&mut self, path: &str, anomalies: &mut Anomalies) {
        for (i, item) in self.iter_mut().enumerate() {
            item.sanitize(&format!("{path}[{i}]"), anomalies);
        }
    }
}

impl Sanitize for Payback {
    fn sanitize(&mut self, path: &str, anomalies: &mut Anomalies) {
        if let Payback::Reached { months } = self {
            if !months.is_finite() {
                anomalies.finite(&format!("{path}.months"), *months);
                *self = Payback::Unreachable;
            }
        }
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

macro_rules! sanitize_fields {
    ($ty:ty { $($field:ident => $name:literal),* $(,)? }) => {
        impl Sanitize for $ty {
            fn sanitize(&mut self, path: &str, anomalies: &mut Anomalies) {
                $( self.$field.sanitize(&join(path, $name), anomalies); )*
            }
        }
    };
}

sanitize_fields!(CalculationResult {
    summary => "summary",
    breakdown => "breakdown",
    environmental => "environmental",
    power => "power",
    space => "space",
    charts => "charts",
});
sanitize_fields!(Summary {
    total_tco_savings_5yr => "totalTcoSavings5yr",
    total_tco_savings => "totalTcoSavings",
    total_capex_savings => "totalCapexSavings",
    total_opex_savings_5yr => "totalOpexSavings5yr",
    npv_savings => "npvSavings",
    roi_percent => "roiPercent",
    payback => "payback",
    payback_months => "paybackMonths",
    energy_efficiency_improvement_percent => "energyEfficiencyImprovementPercent",
    pue_air => "pueAir",
    pue_immersion => "pueImmersion",
    cost_per_kw_air => "costPerKwAir",
    cost_per_kw_immersion => "costPerKwImmersion",
});
sanitize_fields!(Breakdown {
    capex => "capex",
    opex_annual => "opexAnnual",
    tank_allocations => "tankAllocations",
    tco_5yr => "tco5yr",
    tco => "tco",
    cumulative_savings => "cumulativeSavings",
});
sanitize_fields!(CapexBreakdown { air => "air", immersion => "immersion", savings => "savings" });
sanitize_fields!(CostBreakdown {
    equipment => "equipment",
    installation => "installation",
    infrastructure => "infrastructure",
    coolant => "coolant",
    total => "total",
});
sanitize_fields!(OpexYearRecord {
    air => "air",
    immersion => "immersion",
    savings => "savings",
    cumulative_savings => "cumulativeSavings",
});
sanitize_fields!(YearCosts {
    energy => "energy",
    maintenance => "maintenance",
    labor => "labor",
    total => "total",
});
sanitize_fields!(TankAllocation { power_density_kw_per_u => "powerDensityKwPerU" });
sanitize_fields!(TcoTotals { air => "air", immersion => "immersion", savings => "savings" });
sanitize_fields!(CumulativeSavings { undiscounted => "undiscounted", discounted => "discounted" });
sanitize_fields!(EnvironmentalImpact {
    annual_energy_savings_kwh => "annualEnergySavingsKwh",
    annual_carbon_savings_kg => "annualCarbonSavingsKg",
    annual_carbon_savings_tonnes => "annualCarbonSavingsTonnes",
    annual_water_savings_liters => "annualWaterSavingsLiters",
    energy_reduction_percent => "energyReductionPercent",
});
sanitize_fields!(PowerSummary {
    air => "air",
    immersion => "immersion",
    distribution_loss_kw => "distributionLossKw",
});
sanitize_fields!(FacilityPower { it_kw => "itKw", overhead_kw => "overheadKw", total_kw => "totalKw" });
sanitize_fields!(SpaceUtilization {
    air_floor_area_sqm => "airFloorAreaSqm",
    immersion_floor_area_sqm => "immersionFloorAreaSqm",
    savings_sqm => "savingsSqm",
    savings_percent => "savingsPercent",
});
sanitize_fields!(Charts {
    tco_progression => "tcoProgression",
    cost_categories => "costCategories",
    pue_comparison => "pueComparison",
});
sanitize_fields!(TcoProgressionPoint { air => "air", immersion => "immersion", savings => "savings" });
sanitize_fields!(CategoryComparison { air => "air", immersion => "immersion" });
sanitize_fields!(PueComparison { pue => "pue" });
