//! Air vs immersion cooling total cost of ownership engine.
//!
//! The calculation core is a set of pure functions over a validated
//! [`Configuration`]; [`router`] exposes it over HTTP.

mod anomaly;
mod capex;
mod catalog;
mod efficiency;
mod engine;
mod financial;
mod models;
mod opex;
mod optimizer;
mod requests;
mod responses;
mod results;
mod routes;
mod sensitivity;
mod validator;

pub use anomaly::{AnomalyKind, ComputationAnomaly};
pub use capex::{CapexBreakdown, CostBreakdown};
pub use catalog::{Catalog, CatalogError, TankSpec};
pub use efficiency::{EnvironmentalImpact, PowerSummary, SpaceUtilization};
pub use engine::{calculate, calculate_normalized, config_hash, CalculationError};
pub use financial::Payback;
pub use models::{
    AirCoolingInput, AirInputMethod, CoolantType, Configuration, Currency, ImmersionCoolingInput,
    ImmersionInputMethod, RackType, RawAirCooling, RawConfiguration, RawFinancial,
    RawImmersionCooling, RawTankConfiguration, Region, TankConfiguration,
};
pub use opex::{OpexYearRecord, YearCosts};
pub use optimizer::{allocated_power_kw, optimize, TankAllocation, OPTIMAL_POWER_DENSITY_KW_PER_U};
pub use results::{CalculationResult, Summary};
pub use routes::router;
pub use sensitivity::{analyze as analyze_sensitivity, SensitivityParameter, SensitivityReport};
pub use validator::{
    validate, validate_with_limits, Limit, ValidationError, ValidationErrorKind, ValidationLimits,
    VALIDATION_LIMITS,
};
