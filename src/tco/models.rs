//! Data types for TCO configuration.
//!
//! Two layers live here: the raw wire shape submitted by the form (every
//! field optional, both input modes side by side) and the normalized
//! [`Configuration`] produced by the validator, where each cooling method
//! carries exactly one input mode as a tagged enum.

use serde::{Deserialize, Serialize};

/// Rack family used for air-cooled deployments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RackType {
    #[default]
    Standard42U,
    HighDensity42U,
    Standard48U,
}

/// Immersion coolant family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CoolantType {
    #[default]
    Synthetic,
    MineralOil,
    Dielectric,
}

/// Reporting currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
}

/// Deployment region, supplies default energy and labor prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    #[default]
    Us,
    Eu,
    Uk,
    Apac,
    Latam,
}

/// Air cooling input mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AirInputMethod {
    RackConfiguration,
    TotalPower,
}

/// Immersion cooling input mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImmersionInputMethod {
    AutoOptimize,
    ManualConfig,
}

/// One manually configured group of identical tanks.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankConfiguration {
    /// Catalog size label, e.g. "23U"
    pub size: String,
    pub quantity: u32,
    /// IT load per rack unit in kW
    pub power_density_kw_per_u: f64,
}

/// Tank group as submitted; the quantity stays numeric until validated.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTankConfiguration {
    pub size: String,
    pub quantity: f64,
    pub power_density_kw_per_u: f64,
}


/// Air cooling section as submitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAirCooling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_method: Option<AirInputMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_per_rack_kw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack_type: Option<RackType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_power_kw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hvac_efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_distribution_efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_efficiency: Option<f64>,
}

impl RawAirCooling {
    /// Select an input mode, clearing every field of the other mode.
    pub fn switch_input_method(&mut self, method: AirInputMethod) {
        self.input_method = Some(method);
        match method {
            AirInputMethod::RackConfiguration => {
                self.total_power_kw = None;
            }
            AirInputMethod::TotalPower => {
                self.rack_count = None;
                self.power_per_rack_kw = None;
                self.rack_type = None;
            }
        }
    }
}

/// Immersion cooling section as submitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImmersionCooling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_method: Option<ImmersionInputMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_power_kw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_configurations: Option<Vec<RawTankConfiguration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coolant_type: Option<CoolantType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pumping_efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_exchanger_efficiency: Option<f64>,
}

impl RawImmersionCooling {
    /// Select an input mode, clearing every field of the other mode.
    pub fn switch_input_method(&mut self, method: ImmersionInputMethod) {
        self.input_method = Some(method);
        match method {
            ImmersionInputMethod::AutoOptimize => self.tank_configurations = None,
            ImmersionInputMethod::ManualConfig => self.target_power_kw = None,
        }
    }
}

/// Financial section as submitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinancial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_energy_cost_per_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_labor_cost_per_hour: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_escalation_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_escalation_rate: Option<f64>,
}

/// Request payload for validation and calculation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfiguration {
    #[serde(default)]
    pub air_cooling: RawAirCooling,
    #[serde(default)]
    pub immersion_cooling: RawImmersionCooling,
    #[serde(default)]
    pub financial: RawFinancial,
}


/// Air cooling IT load, exactly one mode.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "inputMethod", rename_all = "camelCase")]
pub enum AirCoolingInput {
    #[serde(rename_all = "camelCase")]
    RackConfiguration {
        rack_count: u32,
        power_per_rack_kw: f64,
        rack_type: RackType,
    },
    #[serde(rename_all = "camelCase")]
    TotalPower { total_power_kw: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirCoolingConfig {
    #[serde(flatten)]
    pub input: AirCoolingInput,
    pub hvac_efficiency: f64,
    pub power_distribution_efficiency: f64,
    pub space_efficiency: f64,
}

/// Immersion cooling IT load, exactly one mode.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "inputMethod", rename_all = "camelCase")]
pub enum ImmersionCoolingInput {
    #[serde(rename_all = "camelCase")]
    AutoOptimize { target_power_kw: f64 },
    #[serde(rename_all = "camelCase")]
    ManualConfig {
        tank_configurations: Vec<TankConfiguration>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmersionCoolingConfig {
    #[serde(flatten)]
    pub input: ImmersionCoolingInput,
    pub coolant_type: CoolantType,
    pub pumping_efficiency: f64,
    pub heat_exchanger_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialConfig {
    pub analysis_years: u32,
    pub discount_rate: f64,
    pub currency: Currency,
    pub region: Region,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_energy_cost_per_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_labor_cost_per_hour: Option<f64>,
    pub energy_escalation_rate: f64,
    pub maintenance_escalation_rate: f64,
}

/// Validated configuration. Immutable input to one calculation run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub air_cooling: AirCoolingConfig,
    pub immersion_cooling: ImmersionCoolingConfig,
    pub financial: FinancialConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_configuration_accepts_minimal_payload() {
        let raw: RawConfiguration = serde_json::from_str(
            r#"{
                "airCooling": {"rackCount": 100, "powerPerRackKw": 12},
                "immersionCooling": {"targetPowerKw": 1200, "coolantType": "synthetic"},
                "financial": {"analysisYears": 5, "discountRate": 0.08, "currency": "USD", "region": "US"}
            }"#,
        )
        .unwrap();

        assert_eq!(raw.air_cooling.rack_count, Some(100.0));
        assert_eq!(raw.immersion_cooling.coolant_type, Some(CoolantType::Synthetic));
        assert_eq!(raw.financial.currency, Some(Currency::Usd));
        assert_eq!(raw.financial.region, Some(Region::Us));
    }

    #[test]
    fn test_switch_to_auto_optimize_clears_tanks() {
        let mut immersion = RawImmersionCooling {
            input_method: Some(ImmersionInputMethod::ManualConfig),
            tank_configurations: Some(vec![RawTankConfiguration {
                size: "23U".to_string(),
                quantity: 2.0,
                power_density_kw_per_u: 2.0,
            }]),
            target_power_kw: Some(500.0),
            ..Default::default()
        };

        immersion.switch_input_method(ImmersionInputMethod::AutoOptimize);
        assert!(immersion.tank_configurations.is_none());
        assert_eq!(immersion.target_power_kw, Some(500.0));

        immersion.switch_input_method(ImmersionInputMethod::ManualConfig);
        assert!(immersion.target_power_kw.is_none());
    }

    #[test]
    fn test_switch_to_total_power_clears_rack_fields() {
        let mut air = RawAirCooling {
            rack_count: Some(10.0),
            power_per_rack_kw: Some(8.0),
            rack_type: Some(RackType::Standard48U),
            ..Default::default()
        };

        air.switch_input_method(AirInputMethod::TotalPower);
        assert!(air.rack_count.is_none());
        assert!(air.power_per_rack_kw.is_none());
        assert!(air.rack_type.is_none());
        assert_eq!(air.input_method, Some(AirInputMethod::TotalPower));
    }

    #[test]
    fn test_normalized_input_serializes_with_method_tag() {
        let input = ImmersionCoolingInput::AutoOptimize { target_power_kw: 100.0 };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["inputMethod"], "autoOptimize");
        assert_eq!(json["targetPowerKw"], 100.0);
    }
}
