//! Calculation pipeline entry points.
//!
//! validate -> capex (with tank optimization) -> opex -> financial ->
//! efficiency -> assemble. Stateless: no clock, randomness or I/O, so equal
//! configurations always give equal results.

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::anomaly::Anomalies;
use super::capex::compute_capex;
use super::catalog::{Catalog, CatalogError};
use super::efficiency::compute_efficiency;
use super::financial::compute_financials;
use super::models::{Configuration, RawConfiguration};
use super::opex::compute_opex_series;
use super::results::{assemble, CalculationResult};
use super::validator::{validate, ValidationError};

/// Why a calculation produced no result.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("configuration failed validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Content hash of a normalized configuration, usable as a cache key.
pub fn config_hash(config: &Configuration) -> String {
    let canonical = serde_json::to_vec(config).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Validate a raw configuration and run the full pipeline.
pub fn calculate(raw: &RawConfiguration, catalog: &Catalog) -> Result<CalculationResult, CalculationError> {
    let config = validate(raw).map_err(CalculationError::Validation)?;
    Ok(calculate_normalized(&config, catalog)?)
}

/// Run the pipeline on an already validated configuration.
pub fn calculate_normalized(
    config: &Configuration,
    catalog: &Catalog,
) -> Result<CalculationResult, CatalogError> {
    let financial = &config.financial;
    let prices = catalog.price_context(
        financial.currency,
        financial.region,
        financial.custom_energy_cost_per_kwh,
        financial.custom_labor_cost_per_hour,
    )?;

    let mut anomalies = Anomalies::new();
    let capex = compute_capex(config, catalog, &prices, &mut anomalies)?;
    let opex = compute_opex_series(config, &capex, catalog, &prices);
    let summary = compute_financials(&capex.breakdown, &opex, financial.discount_rate);
    let efficiency = compute_efficiency(config, &capex, catalog, &mut anomalies);

    let result = assemble(&capex, opex, summary, efficiency, config, anomalies);
    tracing::debug!(
        tco_savings = result.summary.total_tco_savings,
        warnings = result.warnings.len(),
        "calculation complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tco::models::{Currency, Region};

    fn raw(json: &str) -> RawConfiguration {
        serde_json::from_str(json).unwrap()
    }

    const REFERENCE: &str = r#"{
        "airCooling": {"rackCount": 100, "powerPerRackKw": 12},
        "immersionCooling": {"targetPowerKw": 1200, "coolantType": "synthetic"},
        "financial": {"analysisYears": 5, "discountRate": 0.08, "currency": "USD", "region": "US"}
    }"#;

    #[test]
    fn test_reference_scenario() {
        let result = calculate(&raw(REFERENCE), &Catalog::default()).unwrap();

        assert!(result.summary.total_capex_savings > 0.0);
        assert_eq!(result.breakdown.opex_annual.len(), 5);
        assert!(result.summary.total_opex_savings_5yr > 0.0);
        assert!(result.summary.pue_air >= 1.0);
        assert!(result.summary.pue_immersion >= 1.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validation_errors_are_returned() {
        let result = calculate(
            &raw(r#"{"airCooling": {"rackCount": 0, "powerPerRackKw": 12}, "immersionCooling": {"targetPowerKw": 100}}"#),
            &Catalog::default(),
        );
        match result {
            Err(CalculationError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "airCooling.rackCount");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_currency_is_catalog_error() {
        let mut catalog = Catalog::default();
        catalog.exchange_rates.remove(&Currency::Aud);

        let mut config = raw(REFERENCE);
        config.financial.currency = Some(Currency::Aud);

        let result = calculate(&config, &catalog);
        assert!(matches!(
            result,
            Err(CalculationError::Catalog(CatalogError::UnknownCurrency(Currency::Aud)))
        ));
    }

    #[test]
    fn test_region_changes_energy_cost() {
        let catalog = Catalog::default();
        let us = calculate(&raw(REFERENCE), &catalog).unwrap();

        let mut uk_raw = raw(REFERENCE);
        uk_raw.financial.region = Some(Region::Uk);
        let uk = calculate(&uk_raw, &catalog).unwrap();

        assert!(uk.breakdown.opex_annual[0].air.energy > us.breakdown.opex_annual[0].air.energy);
    }

    #[test]
    fn test_config_hash_is_stable_and_sensitive() {
        let config = validate(&raw(REFERENCE)).unwrap();
        let first = config_hash(&config);

        assert!(first.starts_with("sha256:"));
        assert_eq!(first.len(), 7 + 64);
        assert_eq!(first, config_hash(&config.clone()));

        let mut changed = config.clone();
        changed.financial.discount_rate = 0.081;
        assert_ne!(first, config_hash(&changed));
    }
}
