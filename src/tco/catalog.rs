//! Reference data consumed by the engine.
//!
//! Nothing in here is computed: equipment prices, tank geometry, regional
//! energy and labor defaults, and environmental factors are configuration
//! data. The built-in [`Catalog::default`] can be replaced wholesale with a
//! JSON document so the engine can run against fixed test catalogs or a
//! customer's own price book.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{CoolantType, Currency, RackType, Region};

/// A requested reference entry is missing from the injected catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("tank size {0:?} is not in the tank catalog")]
    UnknownTankSize(String),
    #[error("rack type {0:?} is not in the rack catalog")]
    UnknownRackType(RackType),
    #[error("region {0:?} has no regional defaults")]
    UnknownRegion(Region),
    #[error("currency {0:?} has no exchange rate")]
    UnknownCurrency(Currency),
    #[error("coolant {0:?} is not in the coolant catalog")]
    UnknownCoolant(CoolantType),
    #[error("tank catalog is empty")]
    EmptyTankCatalog,
}

impl CatalogError {
    /// Catalog section and key, for error details.
    pub fn reference(&self) -> (&'static str, String) {
        match self {
            Self::UnknownTankSize(size) => ("tankSize", size.clone()),
            Self::UnknownRackType(rack) => ("rackType", format!("{rack:?}")),
            Self::UnknownRegion(region) => ("region", format!("{region:?}")),
            Self::UnknownCurrency(currency) => ("currency", format!("{currency:?}")),
            Self::UnknownCoolant(coolant) => ("coolantType", format!("{coolant:?}")),
            Self::EmptyTankCatalog => ("tankSize", String::new()),
        }
    }
}

/// Immersion tank geometry and price (base currency).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankSpec {
    pub height_units: u32,
    pub max_power_kw: f64,
    pub coolant_liters: f64,
    pub unit_cost: f64,
    pub footprint_sqm: f64,
}

/// Air-cooled rack price and physical data (base currency).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RackSpec {
    /// Rack plus its share of CRAC/CRAH and power gear
    pub unit_cost: f64,
    /// Nominal IT load used to size rack count from a total power figure
    pub nominal_power_kw: f64,
    pub footprint_sqm: f64,
    pub labor_hours_per_year: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoolantSpec {
    pub cost_multiplier: f64,
}

/// Default prices for a region, in base currency.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalDefaults {
    pub energy_cost_per_kwh: f64,
    pub labor_cost_per_hour: f64,
}

/// Fractions applied on top of equipment cost.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostFactors {
    pub air_installation: f64,
    pub air_infrastructure: f64,
    pub immersion_installation: f64,
    pub immersion_infrastructure: f64,
    /// Annual maintenance as a fraction of air equipment cost
    pub air_maintenance: f64,
    /// Annual maintenance as a fraction of immersion equipment cost
    pub immersion_maintenance: f64,
    /// Annual coolant top-up as a fraction of coolant cost
    pub coolant_top_up: f64,
    pub coolant_price_per_liter: f64,
    pub tank_labor_hours_per_year: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalFactors {
    pub carbon_kg_per_kwh: f64,
    pub water_liters_per_kwh: f64,
}

/// Complete reference catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Multiplier from base currency (USD) to each supported currency
    pub exchange_rates: BTreeMap<Currency, f64>,
    pub regions: BTreeMap<Region, RegionalDefaults>,
    pub racks: BTreeMap<RackType, RackSpec>,
    /// Rack type assumed when only a total power figure is given
    pub default_rack_type: RackType,
    pub tanks: BTreeMap<String, TankSpec>,
    pub coolants: BTreeMap<CoolantType, CoolantSpec>,
    pub cost_factors: CostFactors,
    pub environment: EnvironmentalFactors,
}

/// Prices resolved for one calculation, already in the target currency.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceContext {
    pub currency: Currency,
    pub exchange_rate: f64,
    pub energy_cost_per_kwh: f64,
    pub labor_cost_per_hour: f64,
}

impl PriceContext {
    /// Convert a base-currency amount.
    pub fn convert(&self, amount: f64) -> f64 {
        amount * self.exchange_rate
    }
}

impl Catalog {
    /// Parse a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn tank(&self, size: &str) -> Result<&TankSpec, CatalogError> {
        self.tanks
            .get(size)
            .ok_or_else(|| CatalogError::UnknownTankSize(size.to_string()))
    }

    pub fn rack(&self, rack_type: RackType) -> Result<&RackSpec, CatalogError> {
        self.racks
            .get(&rack_type)
            .ok_or(CatalogError::UnknownRackType(rack_type))
    }

    pub fn coolant(&self, coolant: CoolantType) -> Result<&CoolantSpec, CatalogError> {
        self.coolants
            .get(&coolant)
            .ok_or(CatalogError::UnknownCoolant(coolant))
    }

    /// Resolve energy and labor prices in the requested currency.
    ///
    /// Custom overrides are taken as already expressed in `currency`;
    /// regional defaults are converted from base currency.
    pub fn price_context(
        &self,
        currency: Currency,
        region: Region,
        custom_energy_cost_per_kwh: Option<f64>,
        custom_labor_cost_per_hour: Option<f64>,
    ) -> Result<PriceContext, CatalogError> {
        let exchange_rate = *self
            .exchange_rates
            .get(&currency)
            .ok_or(CatalogError::UnknownCurrency(currency))?;
        let defaults = self
            .regions
            .get(&region)
            .ok_or(CatalogError::UnknownRegion(region))?;

        Ok(PriceContext {
            currency,
            exchange_rate,
            energy_cost_per_kwh: custom_energy_cost_per_kwh
                .unwrap_or(defaults.energy_cost_per_kwh * exchange_rate),
            labor_cost_per_hour: custom_labor_cost_per_hour
                .unwrap_or(defaults.labor_cost_per_hour * exchange_rate),
        })
    }
}

fn tank(height_units: u32, unit_cost: f64, footprint_sqm: f64) -> TankSpec {
    TankSpec {
        height_units,
        max_power_kw: f64::from(height_units) * 3.0,
        coolant_liters: f64::from(height_units) * 40.0,
        unit_cost,
        footprint_sqm,
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let exchange_rates = BTreeMap::from([
            (Currency::Usd, 1.0),
            (Currency::Eur, 0.92),
            (Currency::Gbp, 0.79),
            (Currency::Cad, 1.36),
            (Currency::Aud, 1.52),
        ]);

        let regions = BTreeMap::from([
            (Region::Us, RegionalDefaults { energy_cost_per_kwh: 0.12, labor_cost_per_hour: 75.0 }),
            (Region::Eu, RegionalDefaults { energy_cost_per_kwh: 0.20, labor_cost_per_hour: 65.0 }),
            (Region::Uk, RegionalDefaults { energy_cost_per_kwh: 0.25, labor_cost_per_hour: 70.0 }),
            (Region::Apac, RegionalDefaults { energy_cost_per_kwh: 0.15, labor_cost_per_hour: 45.0 }),
            (Region::Latam, RegionalDefaults { energy_cost_per_kwh: 0.14, labor_cost_per_hour: 35.0 }),
        ]);

        let racks = BTreeMap::from([
            (
                RackType::Standard42U,
                RackSpec { unit_cost: 45_000.0, nominal_power_kw: 12.0, footprint_sqm: 2.5, labor_hours_per_year: 20.0 },
            ),
            (
                RackType::HighDensity42U,
                RackSpec { unit_cost: 65_000.0, nominal_power_kw: 25.0, footprint_sqm: 2.5, labor_hours_per_year: 24.0 },
            ),
            (
                RackType::Standard48U,
                RackSpec { unit_cost: 52_000.0, nominal_power_kw: 15.0, footprint_sqm: 2.8, labor_hours_per_year: 22.0 },
            ),
        ]);

        let tanks = [
            ("1U", tank(1, 4_000.0, 0.6)),
            ("2U", tank(2, 6_500.0, 0.7)),
            ("4U", tank(4, 11_000.0, 0.9)),
            ("6U", tank(6, 16_000.0, 1.1)),
            ("8U", tank(8, 21_000.0, 1.3)),
            ("10U", tank(10, 26_000.0, 1.5)),
            ("12U", tank(12, 31_000.0, 1.7)),
            ("16U", tank(16, 40_000.0, 2.0)),
            ("20U", tank(20, 49_000.0, 2.3)),
            ("23U", tank(23, 55_000.0, 2.5)),
        ]
        .into_iter()
        .map(|(size, spec)| (size.to_string(), spec))
        .collect();

        let coolants = BTreeMap::from([
            (CoolantType::Synthetic, CoolantSpec { cost_multiplier: 1.0 }),
            (CoolantType::MineralOil, CoolantSpec { cost_multiplier: 0.5 }),
            (CoolantType::Dielectric, CoolantSpec { cost_multiplier: 2.5 }),
        ]);

        Self {
            exchange_rates,
            regions,
            racks,
            default_rack_type: RackType::Standard42U,
            tanks,
            coolants,
            cost_factors: CostFactors {
                air_installation: 0.25,
                air_infrastructure: 0.15,
                immersion_installation: 0.20,
                immersion_infrastructure: 0.10,
                air_maintenance: 0.05,
                immersion_maintenance: 0.03,
                coolant_top_up: 0.02,
                coolant_price_per_liter: 6.0,
                tank_labor_hours_per_year: 8.0,
            },
            environment: EnvironmentalFactors {
                carbon_kg_per_kwh: 0.4,
                water_liters_per_kwh: 1.8,
            },
        }
    }
}
