//! Cross-module properties of the calculation engine.

use immersion_tco::tco::{
    calculate, optimize, validate, Catalog, ImmersionCoolingInput, ImmersionInputMethod, Payback,
    RawConfiguration, ValidationErrorKind, VALIDATION_LIMITS,
};

const REFERENCE: &str = r#"{
    "airCooling": {"rackCount": 100, "powerPerRackKw": 12},
    "immersionCooling": {"targetPowerKw": 1200, "coolantType": "synthetic"},
    "financial": {"analysisYears": 5, "discountRate": 0.08, "currency": "USD", "region": "US"}
}"#;

fn raw(json: &str) -> RawConfiguration {
    serde_json::from_str(json).unwrap()
}

fn scenarios() -> Vec<RawConfiguration> {
    vec![
        raw(REFERENCE),
        raw(r#"{
            "airCooling": {"totalPowerKw": 480, "hvacEfficiency": 0.5},
            "immersionCooling": {"targetPowerKw": 500, "coolantType": "mineralOil"},
            "financial": {"currency": "EUR", "region": "EU", "analysisYears": 10}
        }"#),
        raw(r#"{
            "airCooling": {"rackCount": 1, "powerPerRackKw": 0.5, "rackType": "highDensity42U"},
            "immersionCooling": {"tankConfigurations": [{"size": "1U", "quantity": 1, "powerDensityKwPerU": 0.5}]},
            "financial": {"analysisYears": 1, "discountRate": 0.0}
        }"#),
        raw(r#"{
            "airCooling": {"rackCount": 1000, "powerPerRackKw": 50, "hvacEfficiency": 1.0},
            "immersionCooling": {"targetPowerKw": 50000, "pumpingEfficiency": 0.01, "heatExchangerEfficiency": 0.01},
            "financial": {"currency": "GBP", "region": "UK", "discountRate": 0.3}
        }"#),
    ]
}

#[test]
fn test_calculation_is_deterministic() {
    let catalog = Catalog::default();
    for config in scenarios() {
        let first = calculate(&config, &catalog).unwrap();
        let second = calculate(&config, &catalog).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_energy_escalation_is_monotonic() {
    let catalog = Catalog::default();
    let mut low = raw(REFERENCE);
    low.financial.energy_escalation_rate = Some(0.02);
    let mut high = low.clone();
    high.financial.energy_escalation_rate = Some(0.06);

    let low = calculate(&low, &catalog).unwrap();
    let high = calculate(&high, &catalog).unwrap();

    let years = low.breakdown.opex_annual.iter().zip(&high.breakdown.opex_annual);
    for (i, (low_year, high_year)) in years.enumerate() {
        if i == 0 {
            assert_eq!(low_year.air.energy, high_year.air.energy);
            continue;
        }
        assert!(high_year.air.energy > low_year.air.energy, "year {}", low_year.year);
        assert!(high_year.immersion.energy > low_year.immersion.energy, "year {}", low_year.year);
    }

    for pair in high.breakdown.opex_annual.windows(2) {
        assert!(pair[1].air.total > pair[0].air.total);
        assert!(pair[1].immersion.total > pair[0].immersion.total);
    }
}

#[test]
fn test_pue_never_below_one() {
    let catalog = Catalog::default();
    for config in scenarios() {
        let result = calculate(&config, &catalog).unwrap();
        assert!(result.summary.pue_air >= 1.0);
        assert!(result.summary.pue_immersion >= 1.0);
    }
}

#[test]
fn test_tank_allocation_covers_target() {
    let catalog = Catalog::default();
    for target in [0.5, 1.0, 2.0, 7.3, 45.9, 100.0, 1200.0, 4321.5, 50_000.0] {
        let allocations = optimize(target, &catalog.tanks).unwrap();
        let delivered: f64 = allocations.iter().map(|a| a.power_kw()).sum();
        assert!(delivered >= target, "target {target} got {delivered}");
    }
}

#[test]
fn test_switching_immersion_mode_clears_other_fields() {
    let mut config = raw(
        r#"{
            "airCooling": {"rackCount": 10, "powerPerRackKw": 10},
            "immersionCooling": {
                "inputMethod": "manualConfig",
                "tankConfigurations": [{"size": "23U", "quantity": 2, "powerDensityKwPerU": 2.0}]
            }
        }"#,
    );

    config.immersion_cooling.target_power_kw = Some(100.0);
    config.immersion_cooling.switch_input_method(ImmersionInputMethod::AutoOptimize);
    assert!(config.immersion_cooling.tank_configurations.is_none());
    let normalized = validate(&config).unwrap();
    assert!(matches!(
        normalized.immersion_cooling.input,
        ImmersionCoolingInput::AutoOptimize { target_power_kw } if target_power_kw == 100.0
    ));

    config.immersion_cooling.tank_configurations = Some(Vec::new());
    config.immersion_cooling.switch_input_method(ImmersionInputMethod::ManualConfig);
    assert!(config.immersion_cooling.target_power_kw.is_none());

    let json = serde_json::to_value(&validate(&raw(
        r#"{
            "airCooling": {"rackCount": 10, "powerPerRackKw": 10},
            "immersionCooling": {
                "inputMethod": "autoOptimize",
                "targetPowerKw": 100,
                "tankConfigurations": [{"size": "23U", "quantity": 2, "powerDensityKwPerU": 2.0}]
            }
        }"#,
    ))
    .unwrap())
    .unwrap();
    assert_eq!(json["immersionCooling"]["inputMethod"], "autoOptimize");
    assert!(json["immersionCooling"].get("tankConfigurations").is_none());
}

#[test]
fn test_reference_scenario() {
    let result = calculate(&raw(REFERENCE), &Catalog::default()).unwrap();

    assert!(result.summary.total_capex_savings > 0.0);
    assert_eq!(result.breakdown.opex_annual.len(), 5);
    assert_eq!(result.breakdown.rack_count, 100);
    assert!(result.summary.npv_savings > 0.0);
    assert!(matches!(result.summary.payback, Payback::Reached { months } if months == 0.0));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_rack_count_below_minimum_is_rejected() {
    let below = VALIDATION_LIMITS.rack_count.min - 1.0;
    let mut config = raw(REFERENCE);
    config.air_cooling.rack_count = Some(below);

    let errors = validate(&config).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| e.field == "airCooling.rackCount" && e.kind == ValidationErrorKind::Range));
}

#[test]
fn test_payback_unreachable_when_immersion_never_recovers() {
    let mut catalog = Catalog::default();
    for tank in catalog.tanks.values_mut() {
        tank.unit_cost = 5_000_000.0;
    }
    let config = raw(
        r#"{
            "airCooling": {"rackCount": 1, "powerPerRackKw": 10},
            "immersionCooling": {"targetPowerKw": 10},
            "financial": {"analysisYears": 1}
        }"#,
    );

    let result = calculate(&config, &catalog).unwrap();
    assert!(result.summary.total_capex_savings < 0.0);
    assert!(result.summary.total_opex_savings_5yr <= 0.0);
    assert_eq!(result.summary.payback, Payback::Unreachable);
    assert_eq!(result.summary.payback_months, None);

    let json = serde_json::to_value(&result.summary).unwrap();
    assert_eq!(json["payback"]["status"], "unreachable");
    assert!(json["paybackMonths"].is_null());
}
