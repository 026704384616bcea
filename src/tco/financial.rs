//! NPV, ROI, payback and TCO totals derived from CAPEX and the OPEX series.

use serde::Serialize;

use super::capex::CapexBreakdown;
use super::opex::OpexYearRecord;

/// Years covered by the headline "5 year" figures.
pub const HEADLINE_YEARS: usize = 5;

/// Month at which cumulative savings turn non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Payback {
    Reached { months: f64 },
    /// Cumulative savings stay negative through the last analysis year
    Unreachable,
}

impl Payback {
    pub fn months(&self) -> Option<f64> {
        match self {
            Self::Reached { months } => Some(*months),
            Self::Unreachable => None,
        }
    }
}

/// Cumulative savings at the end of a year; year 0 is the CAPEX delta alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeSavings {
    pub year: u32,
    pub undiscounted: f64,
    pub discounted: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoTotals {
    pub air: f64,
    pub immersion: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Immersion CAPEX minus air CAPEX
    pub capex_delta: f64,
    pub total_opex_savings_5yr: f64,
    pub total_opex_savings: f64,
    pub npv_savings: f64,
    pub payback: Payback,
    /// `None` unless immersion costs more up front
    pub roi_percent: Option<f64>,
    pub tco_5yr: TcoTotals,
    pub tco: TcoTotals,
    pub cumulative_savings: Vec<CumulativeSavings>,
}

fn tco_over(capex: &CapexBreakdown, years: &[OpexYearRecord]) -> TcoTotals {
    let air = capex.air.total + years.iter().map(|r| r.air.total).sum::<f64>();
    let immersion = capex.immersion.total + years.iter().map(|r| r.immersion.total).sum::<f64>();
    TcoTotals {
        air,
        immersion,
        savings: air - immersion,
    }
}

/// Month from which cumulative savings stay non-negative to the end of the
/// horizon, interpolated linearly inside the crossing year.
///
/// A dip back below zero resets the crossing; ending below zero is
/// unreachable even when immersion started out cheaper.
fn payback(capex_delta: f64, opex: &[OpexYearRecord]) -> Payback {
    let mut cumulative = -capex_delta;
    let mut months = (cumulative >= 0.0).then_some(0.0);
    for (index, record) in opex.iter().enumerate() {
        let previous = cumulative;
        cumulative += record.savings;
        if cumulative < 0.0 {
            months = None;
        } else if previous < 0.0 {
            let fraction = -previous / record.savings;
            months = Some((index as f64 + fraction) * 12.0);
        }
    }
    match months {
        Some(months) => Payback::Reached { months },
        None => Payback::Unreachable,
    }
}

pub fn compute_financials(
    capex: &CapexBreakdown,
    opex: &[OpexYearRecord],
    discount_rate: f64,
) -> FinancialSummary {
    let capex_delta = capex.immersion.total - capex.air.total;
    let headline = &opex[..opex.len().min(HEADLINE_YEARS)];

    let total_opex_savings_5yr: f64 = headline.iter().map(|r| r.savings).sum();
    let total_opex_savings: f64 = opex.iter().map(|r| r.savings).sum();

    let mut cumulative_savings = Vec::with_capacity(opex.len() + 1);
    let mut undiscounted = -capex_delta;
    let mut discounted = -capex_delta;
    cumulative_savings.push(CumulativeSavings {
        year: 0,
        undiscounted,
        discounted,
    });
    for record in opex {
        undiscounted += record.savings;
        discounted += record.savings / (1.0 + discount_rate).powi(record.year as i32);
        cumulative_savings.push(CumulativeSavings {
            year: record.year,
            undiscounted,
            discounted,
        });
    }

    let roi_percent = (capex_delta > 0.0).then(|| total_opex_savings_5yr / capex_delta * 100.0);

    FinancialSummary {
        capex_delta,
        total_opex_savings_5yr,
        total_opex_savings,
        npv_savings: discounted,
        payback: payback(capex_delta, opex),
        roi_percent,
        tco_5yr: tco_over(capex, headline),
        tco: tco_over(capex, opex),
        cumulative_savings,
    }
}
