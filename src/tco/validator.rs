//! Configuration validation and normalization.
//!
//! Every violation is collected; the validator never stops at the first
//! error so the form can highlight all bad fields at once.

use serde::Serialize;

use super::models::{
    AirCoolingConfig, AirCoolingInput, AirInputMethod, Configuration, FinancialConfig,
    ImmersionCoolingConfig, ImmersionCoolingInput, ImmersionInputMethod, RawAirCooling,
    RawConfiguration, RawFinancial, RawImmersionCooling, RawTankConfiguration, TankConfiguration,
};

pub const DEFAULT_HVAC_EFFICIENCY: f64 = 0.65;
pub const DEFAULT_POWER_DISTRIBUTION_EFFICIENCY: f64 = 0.95;
pub const DEFAULT_SPACE_EFFICIENCY: f64 = 0.7;
pub const DEFAULT_PUMPING_EFFICIENCY: f64 = 0.95;
pub const DEFAULT_HEAT_EXCHANGER_EFFICIENCY: f64 = 0.97;
pub const DEFAULT_ANALYSIS_YEARS: u32 = 5;
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.08;
pub const DEFAULT_ENERGY_ESCALATION_RATE: f64 = 0.03;
pub const DEFAULT_MAINTENANCE_ESCALATION_RATE: f64 = 0.025;

/// Closed numeric range, optionally open at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limit {
    pub min: f64,
    pub max: f64,
    pub min_exclusive: bool,
}

impl Limit {
    pub const fn inclusive(min: f64, max: f64) -> Self {
        Self { min, max, min_exclusive: false }
    }

    /// The interval (0, 1].
    pub const fn fraction() -> Self {
        Self { min: 0.0, max: 1.0, min_exclusive: true }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        value.is_finite() && above_min && value <= self.max
    }

    /// Pull a finite value into the range. The open lower bound of a
    /// fraction is treated as closed.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn describe(&self) -> String {
        let open = if self.min_exclusive { '(' } else { '[' };
        format!("{open}{}, {}]", self.min, self.max)
    }
}

/// Statically declared bounds for every numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationLimits {
    pub rack_count: Limit,
    pub power_per_rack_kw: Limit,
    pub total_power_kw: Limit,
    pub target_power_kw: Limit,
    pub tank_configurations: Limit,
    pub tank_quantity: Limit,
    pub power_density_kw_per_u: Limit,
    pub hvac_efficiency: Limit,
    pub power_distribution_efficiency: Limit,
    pub space_efficiency: Limit,
    pub pumping_efficiency: Limit,
    pub heat_exchanger_efficiency: Limit,
    pub analysis_years: Limit,
    pub discount_rate: Limit,
    pub energy_cost_per_kwh: Limit,
    pub labor_cost_per_hour: Limit,
    pub energy_escalation_rate: Limit,
    pub maintenance_escalation_rate: Limit,
}

pub const VALIDATION_LIMITS: ValidationLimits = ValidationLimits {
    rack_count: Limit::inclusive(1.0, 1000.0),
    power_per_rack_kw: Limit::inclusive(0.5, 50.0),
    total_power_kw: Limit::inclusive(1.0, 50_000.0),
    target_power_kw: Limit::inclusive(1.0, 50_000.0),
    tank_configurations: Limit::inclusive(1.0, 50.0),
    tank_quantity: Limit::inclusive(1.0, 200.0),
    power_density_kw_per_u: Limit::inclusive(0.5, 3.0),
    hvac_efficiency: Limit::fraction(),
    power_distribution_efficiency: Limit::fraction(),
    space_efficiency: Limit::fraction(),
    pumping_efficiency: Limit::fraction(),
    heat_exchanger_efficiency: Limit::fraction(),
    analysis_years: Limit::inclusive(1.0, 10.0),
    discount_rate: Limit::inclusive(0.0, 0.30),
    energy_cost_per_kwh: Limit::inclusive(0.01, 1.0),
    labor_cost_per_hour: Limit::inclusive(10.0, 500.0),
    energy_escalation_rate: Limit::inclusive(0.0, 0.15),
    maintenance_escalation_rate: Limit::inclusive(0.0, 0.15),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    /// Value outside its declared range
    Range,
    /// Field required by the selected input mode is missing
    Required,
    /// Input modes are ambiguous or absent
    Structural,
    /// Payload could not be decoded at all
    Malformed,
}

/// One field-level violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn new(field: impl Into<String>, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into(), kind }
    }

    /// Error for a request body that failed to decode.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new("body", ValidationErrorKind::Malformed, message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a raw configuration against [`VALIDATION_LIMITS`].
pub fn validate(raw: &RawConfiguration) -> Result<Configuration, Vec<ValidationError>> {
    validate_with_limits(raw, &VALIDATION_LIMITS)
}

/// Validate against caller-supplied limits and normalize input modes.
pub fn validate_with_limits(
    raw: &RawConfiguration,
    limits: &ValidationLimits,
) -> Result<Configuration, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let air_cooling = validate_air(&raw.air_cooling, limits, &mut errors);
    let immersion_cooling = validate_immersion(&raw.immersion_cooling, limits, &mut errors);
    let financial = validate_financial(&raw.financial, limits, &mut errors);

    match (air_cooling, immersion_cooling) {
        (Some(air_cooling), Some(immersion_cooling)) if errors.is_empty() => Ok(Configuration {
            air_cooling,
            immersion_cooling,
            financial,
        }),
        _ => {
            tracing::debug!(count = errors.len(), "configuration rejected");
            Err(errors)
        }
    }
}

fn check(errors: &mut Vec<ValidationError>, field: &str, value: f64, limit: &Limit) -> f64 {
    if !limit.contains(value) {
        errors.push(ValidationError::new(
            field,
            ValidationErrorKind::Range,
            format!("must be within {}, got {value}", limit.describe()),
        ));
    }
    value
}

/// Range-check a count and require a whole number.
///
/// The returned value is only meaningful when no error was recorded.
fn count(errors: &mut Vec<ValidationError>, field: &str, value: f64, limit: &Limit) -> u32 {
    let before = errors.len();
    check(errors, field, value, limit);
    if errors.len() == before && value.fract() != 0.0 {
        errors.push(ValidationError::new(
            field,
            ValidationErrorKind::Range,
            format!("must be a whole number, got {value}"),
        ));
    }
    value as u32
}

fn required<T: Copy>(errors: &mut Vec<ValidationError>, field: &str, value: Option<T>, mode: &str) -> Option<T> {
    if value.is_none() {
        errors.push(ValidationError::new(
            field,
            ValidationErrorKind::Required,
            format!("is required when inputMethod is {mode}"),
        ));
    }
    value
}

fn validate_air(
    raw: &RawAirCooling,
    limits: &ValidationLimits,
    errors: &mut Vec<ValidationError>,
) -> Option<AirCoolingConfig> {
    let hvac_efficiency = check(
        errors,
        "airCooling.hvacEfficiency",
        raw.hvac_efficiency.unwrap_or(DEFAULT_HVAC_EFFICIENCY),
        &limits.hvac_efficiency,
    );
    let power_distribution_efficiency = check(
        errors,
        "airCooling.powerDistributionEfficiency",
        raw.power_distribution_efficiency
            .unwrap_or(DEFAULT_POWER_DISTRIBUTION_EFFICIENCY),
        &limits.power_distribution_efficiency,
    );
    let space_efficiency = check(
        errors,
        "airCooling.spaceEfficiency",
        raw.space_efficiency.unwrap_or(DEFAULT_SPACE_EFFICIENCY),
        &limits.space_efficiency,
    );

    let method = match raw.input_method {
        Some(method) => method,
        None => {
            let rack_fields = raw.rack_count.is_some() || raw.power_per_rack_kw.is_some();
            let total_fields = raw.total_power_kw.is_some();
            match (rack_fields, total_fields) {
                (true, false) => AirInputMethod::RackConfiguration,
                (false, true) => AirInputMethod::TotalPower,
                (true, true) => {
                    errors.push(ValidationError::new(
                        "airCooling",
                        ValidationErrorKind::Structural,
                        "both rack configuration and total power were supplied; exactly one input mode may be active",
                    ));
                    return None;
                }
                (false, false) => {
                    errors.push(ValidationError::new(
                        "airCooling",
                        ValidationErrorKind::Structural,
                        "no input mode supplied; provide rackCount and powerPerRackKw, or totalPowerKw",
                    ));
                    return None;
                }
            }
        }
    };

    let input = match method {
        AirInputMethod::RackConfiguration => {
            let mode = "rackConfiguration";
            let rack_count = required(errors, "airCooling.rackCount", raw.rack_count, mode);
            let power = required(errors, "airCooling.powerPerRackKw", raw.power_per_rack_kw, mode);
            let rack_count =
                rack_count.map(|racks| count(errors, "airCooling.rackCount", racks, &limits.rack_count));
            if let Some(kw) = power {
                check(errors, "airCooling.powerPerRackKw", kw, &limits.power_per_rack_kw);
            }
            AirCoolingInput::RackConfiguration {
                rack_count: rack_count?,
                power_per_rack_kw: power?,
                rack_type: raw.rack_type.unwrap_or_default(),
            }
        }
        AirInputMethod::TotalPower => {
            let total = required(errors, "airCooling.totalPowerKw", raw.total_power_kw, "totalPower")?;
            AirCoolingInput::TotalPower {
                total_power_kw: check(errors, "airCooling.totalPowerKw", total, &limits.total_power_kw),
            }
        }
    };

    Some(AirCoolingConfig {
        input,
        hvac_efficiency,
        power_distribution_efficiency,
        space_efficiency,
    })
}

fn validate_tanks(
    tanks: &[RawTankConfiguration],
    limits: &ValidationLimits,
    errors: &mut Vec<ValidationError>,
) -> Vec<TankConfiguration> {
    check(
        errors,
        "immersionCooling.tankConfigurations",
        tanks.len() as f64,
        &limits.tank_configurations,
    );
    let mut validated = Vec::with_capacity(tanks.len());
    for (i, tank) in tanks.iter().enumerate() {
        let prefix = format!("immersionCooling.tankConfigurations[{i}]");
        if tank.size.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{prefix}.size"),
                ValidationErrorKind::Required,
                "tank size is required",
            ));
        }
        let quantity = count(
            errors,
            &format!("{prefix}.quantity"),
            tank.quantity,
            &limits.tank_quantity,
        );
        let power_density_kw_per_u = check(
            errors,
            &format!("{prefix}.powerDensityKwPerU"),
            tank.power_density_kw_per_u,
            &limits.power_density_kw_per_u,
        );
        validated.push(TankConfiguration {
            size: tank.size.clone(),
            quantity,
            power_density_kw_per_u,
        });
    }
    validated
}

fn validate_immersion(
    raw: &RawImmersionCooling,
    limits: &ValidationLimits,
    errors: &mut Vec<ValidationError>,
) -> Option<ImmersionCoolingConfig> {
    let pumping_efficiency = check(
        errors,
        "immersionCooling.pumpingEfficiency",
        raw.pumping_efficiency.unwrap_or(DEFAULT_PUMPING_EFFICIENCY),
        &limits.pumping_efficiency,
    );
    let heat_exchanger_efficiency = check(
        errors,
        "immersionCooling.heatExchangerEfficiency",
        raw.heat_exchanger_efficiency
            .unwrap_or(DEFAULT_HEAT_EXCHANGER_EFFICIENCY),
        &limits.heat_exchanger_efficiency,
    );

    let method = match raw.input_method {
        Some(method) => method,
        None => {
            let auto = raw.target_power_kw.is_some();
            let manual = raw
                .tank_configurations
                .as_ref()
                .is_some_and(|tanks| !tanks.is_empty());
            match (auto, manual) {
                (true, false) => ImmersionInputMethod::AutoOptimize,
                (false, true) => ImmersionInputMethod::ManualConfig,
                (true, true) => {
                    errors.push(ValidationError::new(
                        "immersionCooling",
                        ValidationErrorKind::Structural,
                        "both targetPowerKw and tankConfigurations were supplied; exactly one input mode may be active",
                    ));
                    return None;
                }
                (false, false) => {
                    errors.push(ValidationError::new(
                        "immersionCooling",
                        ValidationErrorKind::Structural,
                        "no input mode supplied; provide targetPowerKw or tankConfigurations",
                    ));
                    return None;
                }
            }
        }
    };

    let input = match method {
        ImmersionInputMethod::AutoOptimize => {
            let target = required(
                errors,
                "immersionCooling.targetPowerKw",
                raw.target_power_kw,
                "autoOptimize",
            )?;
            ImmersionCoolingInput::AutoOptimize {
                target_power_kw: check(
                    errors,
                    "immersionCooling.targetPowerKw",
                    target,
                    &limits.target_power_kw,
                ),
            }
        }
        ImmersionInputMethod::ManualConfig => {
            let Some(tanks) = raw.tank_configurations.as_ref() else {
                errors.push(ValidationError::new(
                    "immersionCooling.tankConfigurations",
                    ValidationErrorKind::Required,
                    "is required when inputMethod is manualConfig",
                ));
                return None;
            };
            ImmersionCoolingInput::ManualConfig {
                tank_configurations: validate_tanks(tanks, limits, errors),
            }
        }
    };

    Some(ImmersionCoolingConfig {
        input,
        coolant_type: raw.coolant_type.unwrap_or_default(),
        pumping_efficiency,
        heat_exchanger_efficiency,
    })
}

fn validate_financial(
    raw: &RawFinancial,
    limits: &ValidationLimits,
    errors: &mut Vec<ValidationError>,
) -> FinancialConfig {
    let analysis_years = count(
        errors,
        "financial.analysisYears",
        raw.analysis_years
            .unwrap_or(f64::from(DEFAULT_ANALYSIS_YEARS)),
        &limits.analysis_years,
    );

    let custom_energy_cost_per_kwh = raw.custom_energy_cost_per_kwh.map(|cost| {
        check(errors, "financial.customEnergyCostPerKwh", cost, &limits.energy_cost_per_kwh)
    });
    let custom_labor_cost_per_hour = raw.custom_labor_cost_per_hour.map(|cost| {
        check(errors, "financial.customLaborCostPerHour", cost, &limits.labor_cost_per_hour)
    });

    FinancialConfig {
        analysis_years,
        discount_rate: check(
            errors,
            "financial.discountRate",
            raw.discount_rate.unwrap_or(DEFAULT_DISCOUNT_RATE),
            &limits.discount_rate,
        ),
        currency: raw.currency.unwrap_or_default(),
        region: raw.region.unwrap_or_default(),
        custom_energy_cost_per_kwh,
        custom_labor_cost_per_hour,
        energy_escalation_rate: check(
            errors,
            "financial.energyEscalationRate",
            raw.energy_escalation_rate
                .unwrap_or(DEFAULT_ENERGY_ESCALATION_RATE),
            &limits.energy_escalation_rate,
        ),
        maintenance_escalation_rate: check(
            errors,
            "financial.maintenanceEscalationRate",
            raw.maintenance_escalation_rate
                .unwrap_or(DEFAULT_MAINTENANCE_ESCALATION_RATE),
            &limits.maintenance_escalation_rate,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tco::models::{CoolantType, RackType};

    fn base_raw() -> RawConfiguration {
        RawConfiguration {
            air_cooling: RawAirCooling {
                rack_count: Some(100.0),
                power_per_rack_kw: Some(12.0),
                ..Default::default()
            },
            immersion_cooling: RawImmersionCooling {
                target_power_kw: Some(1200.0),
                coolant_type: Some(CoolantType::Synthetic),
                ..Default::default()
            },
            financial: RawFinancial::default(),
        }
    }

    fn tanks() -> Vec<RawTankConfiguration> {
        vec![RawTankConfiguration {
            size: "23U".to_string(),
            quantity: 4.0,
            power_density_kw_per_u: 2.0,
        }]
    }

    #[test]
    fn test_valid_configuration_applies_defaults() {
        let config = validate(&base_raw()).unwrap();

        assert_eq!(
            config.air_cooling.input,
            AirCoolingInput::RackConfiguration {
                rack_count: 100,
                power_per_rack_kw: 12.0,
                rack_type: RackType::Standard42U,
            }
        );
        assert_eq!(config.air_cooling.hvac_efficiency, DEFAULT_HVAC_EFFICIENCY);
        assert_eq!(config.financial.analysis_years, DEFAULT_ANALYSIS_YEARS);
        assert_eq!(config.financial.discount_rate, DEFAULT_DISCOUNT_RATE);
    }

    #[test]
    fn test_rack_count_below_minimum() {
        let mut raw = base_raw();
        raw.air_cooling.rack_count = Some(VALIDATION_LIMITS.rack_count.min - 1.0);

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "airCooling.rackCount");
        assert_eq!(errors[0].kind, ValidationErrorKind::Range);
    }

    #[test]
    fn test_collects_every_violation() {
        let mut raw = base_raw();
        raw.air_cooling.rack_count = Some(5000.0);
        raw.air_cooling.hvac_efficiency = Some(0.0);
        raw.financial.analysis_years = Some(11.0);
        raw.financial.discount_rate = Some(0.5);

        let errors = validate(&raw).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(errors.len(), 4);
        assert!(fields.contains(&"airCooling.rackCount"));
        assert!(fields.contains(&"airCooling.hvacEfficiency"));
        assert!(fields.contains(&"financial.analysisYears"));
        assert!(fields.contains(&"financial.discountRate"));
    }

    #[test]
    fn test_efficiency_of_one_is_allowed() {
        let mut raw = base_raw();
        raw.air_cooling.hvac_efficiency = Some(1.0);
        raw.immersion_cooling.pumping_efficiency = Some(1.0);
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn test_nan_is_out_of_range() {
        let mut raw = base_raw();
        raw.financial.discount_rate = Some(f64::NAN);

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors[0].field, "financial.discountRate");
    }

    #[test]
    fn test_both_immersion_modes_is_structural() {
        let mut raw = base_raw();
        raw.immersion_cooling.tank_configurations = Some(tanks());

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "immersionCooling");
        assert_eq!(errors[0].kind, ValidationErrorKind::Structural);
    }

    #[test]
    fn test_no_air_mode_is_structural() {
        let mut raw = base_raw();
        raw.air_cooling = RawAirCooling::default();

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors[0].field, "airCooling");
        assert_eq!(errors[0].kind, ValidationErrorKind::Structural);
    }

    #[test]
    fn test_partial_rack_mode_reports_missing_field() {
        let mut raw = base_raw();
        raw.air_cooling.power_per_rack_kw = None;

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "airCooling.powerPerRackKw");
        assert_eq!(errors[0].kind, ValidationErrorKind::Required);
    }

    #[test]
    fn test_explicit_method_drops_other_mode() {
        let mut raw = base_raw();
        raw.immersion_cooling.tank_configurations = Some(tanks());
        raw.immersion_cooling.input_method = Some(ImmersionInputMethod::AutoOptimize);

        let config = validate(&raw).unwrap();
        assert_eq!(
            config.immersion_cooling.input,
            ImmersionCoolingInput::AutoOptimize { target_power_kw: 1200.0 }
        );

        raw.immersion_cooling.input_method = Some(ImmersionInputMethod::ManualConfig);
        let config = validate(&raw).unwrap();
        assert_eq!(
            config.immersion_cooling.input,
            ImmersionCoolingInput::ManualConfig {
                tank_configurations: vec![TankConfiguration {
                    size: "23U".to_string(),
                    quantity: 4,
                    power_density_kw_per_u: 2.0,
                }]
            }
        );
    }

    #[test]
    fn test_manual_tank_fields_are_checked() {
        let mut raw = base_raw();
        raw.immersion_cooling.switch_input_method(ImmersionInputMethod::ManualConfig);
        raw.immersion_cooling.tank_configurations = Some(vec![RawTankConfiguration {
            size: " ".to_string(),
            quantity: 0.0,
            power_density_kw_per_u: 4.5,
        }]);

        let errors = validate(&raw).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "immersionCooling.tankConfigurations[0].size",
                "immersionCooling.tankConfigurations[0].quantity",
                "immersionCooling.tankConfigurations[0].powerDensityKwPerU",
            ]
        );
    }

    #[test]
    fn test_manual_mode_with_empty_list_is_range_error() {
        let mut raw = base_raw();
        raw.immersion_cooling.input_method = Some(ImmersionInputMethod::ManualConfig);
        raw.immersion_cooling.target_power_kw = None;
        raw.immersion_cooling.tank_configurations = Some(vec![]);

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors[0].field, "immersionCooling.tankConfigurations");
        assert_eq!(errors[0].kind, ValidationErrorKind::Range);
    }

    #[test]
    fn test_custom_costs_are_range_checked() {
        let mut raw = base_raw();
        raw.financial.custom_energy_cost_per_kwh = Some(2.0);
        raw.financial.custom_labor_cost_per_hour = Some(80.0);

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "financial.customEnergyCostPerKwh");
    }

    #[test]
    fn test_negative_count_reported_with_other_violations() {
        let raw: RawConfiguration = serde_json::from_str(
            r#"{
                "airCooling": {"rackCount": -1, "powerPerRackKw": 12, "hvacEfficiency": 2.0},
                "immersionCooling": {"targetPowerKw": 1200}
            }"#,
        )
        .unwrap();

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::Range));
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"airCooling.rackCount"));
        assert!(fields.contains(&"airCooling.hvacEfficiency"));
    }

    #[test]
    fn test_oversized_counts_are_range_errors() {
        let raw: RawConfiguration = serde_json::from_str(
            r#"{
                "airCooling": {"rackCount": 10000000000, "powerPerRackKw": 12},
                "immersionCooling": {"tankConfigurations": [{"size": "23U", "quantity": 1e12, "powerDensityKwPerU": 2}]},
                "financial": {"analysisYears": -3}
            }"#,
        )
        .unwrap();

        let errors = validate(&raw).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "airCooling.rackCount",
                "immersionCooling.tankConfigurations[0].quantity",
                "financial.analysisYears",
            ]
        );
    }

    #[test]
    fn test_fractional_count_is_rejected() {
        let mut raw = base_raw();
        raw.air_cooling.rack_count = Some(10.5);
        raw.financial.analysis_years = Some(2.5);

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "airCooling.rackCount");
        assert!(errors[0].message.contains("whole number"));
        assert_eq!(errors[1].field, "financial.analysisYears");
    }

    #[test]
    fn test_limit_clamp() {
        let limit = Limit::inclusive(0.0, 0.30);
        assert_eq!(limit.clamp(0.57), 0.30);
        assert_eq!(limit.clamp(-0.1), 0.0);
        assert_eq!(limit.clamp(0.12), 0.12);
    }

    #[test]
    fn test_limit_describe() {
        assert_eq!(Limit::fraction().describe(), "(0, 1]");
        assert_eq!(Limit::inclusive(1.0, 10.0).describe(), "[1, 10]");
    }
}
