//! Greedy immersion tank selection.
//!
//! Sizes are visited largest first and each is filled with as many whole
//! tanks as fit the remaining power at the optimal density. Whatever is
//! left over goes into one tank of the smallest size running below the
//! optimal density. This favours fewer physical tanks over lowest cost and
//! is not an optimal bin packing.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogError, TankSpec};

/// Power density assumed for auto-optimized tanks, in kW per rack unit.
pub const OPTIMAL_POWER_DENSITY_KW_PER_U: f64 = 2.0;

/// Residual power below this is treated as fully allocated.
const RESIDUAL_EPSILON_KW: f64 = 1e-9;

/// Quantity and power density assigned to one tank size.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankAllocation {
    pub size: String,
    pub quantity: u32,
    pub power_density_kw_per_u: f64,
    pub height_units: u32,
}

impl TankAllocation {
    /// IT power delivered by every tank in this allocation.
    pub fn power_kw(&self) -> f64 {
        f64::from(self.quantity) * f64::from(self.height_units) * self.power_density_kw_per_u
    }
}

/// Total IT power across allocations.
pub fn allocated_power_kw(allocations: &[TankAllocation]) -> f64 {
    allocations.iter().map(TankAllocation::power_kw).sum()
}

/// Pack `target_power_kw` into a tank mix drawn from `tanks`.
///
/// A non-positive target yields no allocations.
pub fn optimize<'a, I>(target_power_kw: f64, tanks: I) -> Result<Vec<TankAllocation>, CatalogError>
where
    I: IntoIterator<Item = (&'a String, &'a TankSpec)>,
{
    let mut sizes: Vec<(&String, &TankSpec)> = tanks
        .into_iter()
        .filter(|(_, spec)| spec.height_units > 0)
        .collect();
    if sizes.is_empty() {
        return Err(CatalogError::EmptyTankCatalog);
    }
    // Tallest first; equal heights fall back to label order so the mix is stable.
    sizes.sort_by(|(a_size, a), (b_size, b)| {
        Reverse(a.height_units)
            .cmp(&Reverse(b.height_units))
            .then_with(|| a_size.cmp(b_size))
    });

    let mut allocations = Vec::new();
    let mut remaining = target_power_kw;

    for (size, spec) in &sizes {
        if remaining <= RESIDUAL_EPSILON_KW {
            break;
        }
        let per_tank_kw = f64::from(spec.height_units) * OPTIMAL_POWER_DENSITY_KW_PER_U;
        let tanks_needed = (remaining / per_tank_kw).floor();
        if tanks_needed > 0.0 {
            allocations.push(TankAllocation {
                size: (*size).clone(),
                quantity: tanks_needed as u32,
                power_density_kw_per_u: OPTIMAL_POWER_DENSITY_KW_PER_U,
                height_units: spec.height_units,
            });
            remaining -= tanks_needed * per_tank_kw;
        }
    }

    if remaining > RESIDUAL_EPSILON_KW {
        if let Some((size, spec)) = sizes.last() {
            let height = f64::from(spec.height_units);
            allocations.push(TankAllocation {
                size: (*size).clone(),
                quantity: 1,
                power_density_kw_per_u: (remaining / height).min(OPTIMAL_POWER_DENSITY_KW_PER_U),
                height_units: spec.height_units,
            });
        }
    }

    tracing::debug!(
        target_power_kw,
        tanks = allocations.iter().map(|a| a.quantity).sum::<u32>(),
        "tank allocation complete"
    );

    Ok(allocations)
}
