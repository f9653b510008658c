//! Post-processing of raw final abundances into the permille delta values
//! used for presolar-grain comparison.

use nalgebra::DVector;

use crate::chain::CaptureChain;
use crate::error::{BurstError, Result};

/// Post-to-reference abundance ratio per species, in chain order.
///
/// A zero reference abundance makes the ratio (and any delta built on it)
/// undefined.
pub fn abundance_ratios(
    final_abundances: &DVector<f64>,
    reference: &DVector<f64>,
    chain: &CaptureChain,
) -> Result<Vec<f64>> {
    check_lengths(final_abundances, reference, chain)?;
    chain
        .species()
        .iter()
        .enumerate()
        .map(|(i, species)| {
            if reference[i] == 0.0 {
                Err(BurstError::UndefinedDelta(
                    species.name.clone(),
                    "zero reference abundance".into(),
                ))
            } else {
                Ok(final_abundances[i] / reference[i])
            }
        })
        .collect()
}

/// Permille deviation of each species' post-to-reference ratio relative to
/// the same ratio for `normalizer`:
///
/// delta(i) = 1000 · [(Yf(i)/Yr(i)) / (Yf(n)/Yr(n)) − 1]
///
/// The normalizing species must be a chain member with strictly positive
/// reference and final abundance; delta(normalizer) is exactly zero.
pub fn delta_values(
    final_abundances: &DVector<f64>,
    reference: &DVector<f64>,
    chain: &CaptureChain,
    normalizer: &str,
) -> Result<Vec<f64>> {
    check_lengths(final_abundances, reference, chain)?;
    let norm_index = chain.index_of(normalizer)?;
    if reference[norm_index] <= 0.0 {
        return Err(BurstError::UndefinedDelta(
            normalizer.to_owned(),
            "normalizing species needs a positive reference abundance".into(),
        ));
    }
    if final_abundances[norm_index] <= 0.0 {
        return Err(BurstError::UndefinedDelta(
            normalizer.to_owned(),
            "normalizing species needs a positive final abundance".into(),
        ));
    }

    let ratios = abundance_ratios(final_abundances, reference, chain)?;
    let norm_ratio = ratios[norm_index];
    Ok(ratios
        .into_iter()
        .map(|r| 1000.0 * (r / norm_ratio - 1.0))
        .collect())
}

fn check_lengths(
    final_abundances: &DVector<f64>,
    reference: &DVector<f64>,
    chain: &CaptureChain,
) -> Result<()> {
    if final_abundances.len() != chain.len() || reference.len() != chain.len() {
        return Err(BurstError::InvalidChain(format!(
            "abundance vectors have lengths {} and {}; chain has {} species",
            final_abundances.len(),
            reference.len(),
            chain.len()
        )));
    }
    Ok(())
}
