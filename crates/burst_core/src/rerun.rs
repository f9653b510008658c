//! Stateless what-if re-runs of the chain under perturbed initial
//! abundances.
//!
//! Offsets are percentages in [-100, +100] applied multiplicatively to the
//! chain's baseline abundances; -100 fully depletes a species. Every call
//! re-derives the adjusted abundances from the unmodified baseline, so
//! perturbations never accumulate across calls.

use std::collections::HashMap;

use nalgebra::DVector;

use crate::chain::CaptureChain;
use crate::driver::{integrate_grid, integrate_to, IntegrationSettings, Trajectory};
use crate::error::{BurstError, Result};
use crate::traits::ExposureSystem;

/// Applies percentage offsets to the chain's baseline abundances.
///
/// Species not mentioned in `offsets` keep their baseline value. Offsets
/// for species outside the chain are rejected rather than ignored.
pub fn perturbed_abundances(
    chain: &CaptureChain,
    offsets: &HashMap<String, f64>,
) -> Result<DVector<f64>> {
    for (name, &percent) in offsets {
        chain.index_of(name)?;
        if !percent.is_finite() || !(-100.0..=100.0).contains(&percent) {
            return Err(BurstError::InvalidPerturbation {
                name: name.clone(),
                percent,
            });
        }
    }

    let mut y0 = chain.initial_abundances();
    for (name, &percent) in offsets {
        let index = chain.index_of(name)?;
        y0[index] *= 1.0 + percent / 100.0;
    }
    Ok(y0)
}

/// Re-solves the chain to a single exposure under perturbed abundances.
pub fn rerun_to(
    chain: &CaptureChain,
    system: &dyn ExposureSystem,
    offsets: &HashMap<String, f64>,
    tau: f64,
    settings: &IntegrationSettings,
) -> Result<DVector<f64>> {
    let y0 = perturbed_abundances(chain, offsets)?;
    integrate_to(system, &y0, tau, settings)
}

/// Re-solves the chain across an exposure grid under perturbed abundances.
pub fn rerun_grid(
    chain: &CaptureChain,
    system: &dyn ExposureSystem,
    offsets: &HashMap<String, f64>,
    grid: &[f64],
    settings: &IntegrationSettings,
) -> Result<Trajectory> {
    let y0 = perturbed_abundances(chain, offsets)?;
    integrate_grid(system, &y0, grid, settings)
}
