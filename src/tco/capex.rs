//! Capital expenditure for both cooling methods.

use serde::Serialize;

use super::anomaly::{Anomalies, AnomalyKind};
use super::catalog::{Catalog, CatalogError, PriceContext};
use super::models::{AirCoolingInput, Configuration, ImmersionCoolingInput, RackType};
use super::optimizer::{self, TankAllocation};

/// Cost categories of one cooling method.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub equipment: f64,
    pub installation: f64,
    pub infrastructure: f64,
    pub coolant: f64,
    pub total: f64,
}

impl CostBreakdown {
    fn new(equipment: f64, installation: f64, infrastructure: f64, coolant: f64) -> Self {
        Self {
            equipment,
            installation,
            infrastructure,
            coolant,
            total: equipment + installation + infrastructure + coolant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapexBreakdown {
    pub air: CostBreakdown,
    pub immersion: CostBreakdown,
    /// Air total minus immersion total
    pub savings: f64,
}

/// Physical air-cooled deployment derived while costing it.
#[derive(Debug, Clone, PartialEq)]
pub struct AirDeployment {
    pub rack_type: RackType,
    pub rack_count: u32,
    pub it_power_kw: f64,
    pub floor_area_sqm: f64,
    pub labor_hours_per_year: f64,
}

/// Physical immersion deployment derived while costing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmersionDeployment {
    pub allocations: Vec<TankAllocation>,
    pub tank_count: u32,
    pub it_power_kw: f64,
    pub coolant_liters: f64,
    pub floor_area_sqm: f64,
    pub labor_hours_per_year: f64,
}

/// CAPEX plus the deployment figures later stages depend on.
#[derive(Debug, Clone, PartialEq)]
pub struct CapexResult {
    pub breakdown: CapexBreakdown,
    pub air: AirDeployment,
    pub immersion: ImmersionDeployment,
}

/// Cost both deployments. Runs the tank optimizer first for auto mode.
pub fn compute_capex(
    config: &Configuration,
    catalog: &Catalog,
    prices: &PriceContext,
    anomalies: &mut Anomalies,
) -> Result<CapexResult, CatalogError> {
    let (air, air_costs) = air_capex(config, catalog, prices, anomalies)?;
    let (immersion, immersion_costs) = immersion_capex(config, catalog, prices, anomalies)?;

    let savings = air_costs.total - immersion_costs.total;
    tracing::debug!(
        air_total = air_costs.total,
        immersion_total = immersion_costs.total,
        "capex computed"
    );

    Ok(CapexResult {
        breakdown: CapexBreakdown {
            air: air_costs,
            immersion: immersion_costs,
            savings,
        },
        air,
        immersion,
    })
}

fn air_capex(
    config: &Configuration,
    catalog: &Catalog,
    prices: &PriceContext,
    anomalies: &mut Anomalies,
) -> Result<(AirDeployment, CostBreakdown), CatalogError> {
    let (rack_type, rack_count, it_power_kw) = match &config.air_cooling.input {
        AirCoolingInput::RackConfiguration {
            rack_count,
            power_per_rack_kw,
            rack_type,
        } => (*rack_type, *rack_count, f64::from(*rack_count) * power_per_rack_kw),
        AirCoolingInput::TotalPower { total_power_kw } => {
            let rack_type = catalog.default_rack_type;
            let nominal = catalog.rack(rack_type)?.nominal_power_kw;
            let racks = (total_power_kw / nominal).ceil().max(1.0) as u32;
            (rack_type, racks, *total_power_kw)
        }
    };
    let rack = catalog.rack(rack_type)?;
    let factors = &catalog.cost_factors;

    let equipment = anomalies.non_negative(
        "capex.air.equipment",
        f64::from(rack_count) * prices.convert(rack.unit_cost),
    );
    let installation = anomalies.non_negative("capex.air.installation", equipment * factors.air_installation);
    let infrastructure =
        anomalies.non_negative("capex.air.infrastructure", equipment * factors.air_infrastructure);

    let deployment = AirDeployment {
        rack_type,
        rack_count,
        it_power_kw,
        floor_area_sqm: f64::from(rack_count) * rack.footprint_sqm / config.air_cooling.space_efficiency,
        labor_hours_per_year: f64::from(rack_count) * rack.labor_hours_per_year,
    };

    Ok((deployment, CostBreakdown::new(equipment, installation, infrastructure, 0.0)))
}

fn immersion_capex(
    config: &Configuration,
    catalog: &Catalog,
    prices: &PriceContext,
    anomalies: &mut Anomalies,
) -> Result<(ImmersionDeployment, CostBreakdown), CatalogError> {
    let immersion = &config.immersion_cooling;
    let allocations = match &immersion.input {
        ImmersionCoolingInput::AutoOptimize { target_power_kw } => {
            optimizer::optimize(*target_power_kw, &catalog.tanks)?
        }
        ImmersionCoolingInput::ManualConfig { tank_configurations } => tank_configurations
            .iter()
            .map(|tank| {
                let spec = catalog.tank(&tank.size)?;
                Ok(TankAllocation {
                    size: tank.size.clone(),
                    quantity: tank.quantity,
                    power_density_kw_per_u: tank.power_density_kw_per_u,
                    height_units: spec.height_units,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?,
    };

    let mut equipment = 0.0;
    let mut coolant_liters = 0.0;
    let mut floor_area_sqm = 0.0;
    let mut tank_count = 0;
    for (i, allocation) in allocations.iter().enumerate() {
        let spec = catalog.tank(&allocation.size)?;
        let quantity = f64::from(allocation.quantity);

        let per_tank_kw = f64::from(spec.height_units) * allocation.power_density_kw_per_u;
        if per_tank_kw > spec.max_power_kw {
            anomalies.push(
                AnomalyKind::TankOverCapacity,
                format!("immersionCooling.tankConfigurations[{i}]"),
                per_tank_kw,
                None,
                format!(
                    "{} tank loaded at {per_tank_kw} kW exceeds its rated {} kW",
                    allocation.size, spec.max_power_kw
                ),
            );
        }

        equipment += quantity * prices.convert(spec.unit_cost);
        coolant_liters += quantity * spec.coolant_liters;
        floor_area_sqm += quantity * spec.footprint_sqm;
        tank_count += allocation.quantity;
    }

    let factors = &catalog.cost_factors;
    let multiplier = catalog.coolant(immersion.coolant_type)?.cost_multiplier;

    let equipment = anomalies.non_negative("capex.immersion.equipment", equipment);
    let installation = anomalies.non_negative(
        "capex.immersion.installation",
        equipment * factors.immersion_installation,
    );
    let infrastructure = anomalies.non_negative(
        "capex.immersion.infrastructure",
        equipment * factors.immersion_infrastructure,
    );
    let coolant = anomalies.non_negative(
        "capex.immersion.coolant",
        coolant_liters * prices.convert(factors.coolant_price_per_liter) * multiplier,
    );

    let deployment = ImmersionDeployment {
        it_power_kw: optimizer::allocated_power_kw(&allocations),
        allocations,
        tank_count,
        coolant_liters,
        floor_area_sqm,
        labor_hours_per_year: f64::from(tank_count) * factors.tank_labor_hours_per_year,
    };

    Ok((deployment, CostBreakdown::new(equipment, installation, infrastructure, coolant)))
}
