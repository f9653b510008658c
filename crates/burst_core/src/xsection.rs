//! Conversion of thermally averaged reaction rates into per-species
//! neutron-capture cross sections.
//!
//! Rate tables come in as name -> N_A·⟨σv⟩ (cm³ s⁻¹ mol⁻¹) at a single
//! temperature. Dividing by the most probable thermal neutron speed and
//! Avogadro's number recovers an effective cross section, reported in
//! millibarns. The output array is resolved by explicit name lookup in
//! chain order; the iteration order of the incoming map is never relied on.

use std::collections::HashMap;

use nalgebra::DVector;

use crate::chain::CaptureChain;
use crate::error::{BurstError, Result};

/// Boltzmann constant, J/K (CODATA 2018).
pub const BOLTZMANN: f64 = 1.380649e-23;
/// Neutron rest mass, kg (CODATA 2018).
pub const NEUTRON_MASS: f64 = 1.67492749804e-27;
/// Avogadro constant, 1/mol.
pub const AVOGADRO: f64 = 6.02214076e23;
/// One millibarn in cm².
pub const MILLIBARN_CM2: f64 = 1.0e-27;

/// Most probable thermal neutron speed at `temperature` (K), in cm/s.
pub fn thermal_velocity(temperature: f64) -> Result<f64> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(BurstError::InvalidTemperature(temperature));
    }
    // sqrt(2 k_B T / m_n), converted from m/s to cm/s.
    Ok((2.0 * BOLTZMANN * temperature / NEUTRON_MASS).sqrt() * 1.0e2)
}

/// Derives one cross section per species, in chain order, in millibarns.
///
/// A missing rate for a non-terminal species is a [`BurstError::MissingRate`].
/// The terminal species of a multi-species chain has no outgoing capture in
/// this model: its entry is fixed to zero whether or not a rate is present.
/// A single-species chain still captures out of the chain, so its lone rate
/// is required.
pub fn cross_sections(
    temperature: f64,
    chain: &CaptureChain,
    rates: &HashMap<String, f64>,
) -> Result<DVector<f64>> {
    let v_t = thermal_velocity(temperature)?;
    let n = chain.len();
    let mut sigma = DVector::zeros(n);
    for (i, species) in chain.species().iter().enumerate() {
        let terminal = n >= 2 && i == n - 1;
        match rates.get(&species.name) {
            _ if terminal => sigma[i] = 0.0,
            Some(rate) => sigma[i] = rate / (v_t * AVOGADRO) / MILLIBARN_CM2,
            None => return Err(BurstError::MissingRate(species.name.clone())),
        }
    }
    Ok(sigma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Species;

    fn chain3() -> CaptureChain {
        CaptureChain::new(vec![
            Species::new("Zr94", 94, 1.0),
            Species::new("Zr95", 95, 0.0),
            Species::new("Zr96", 96, 0.0),
        ])
        .expect("valid chain")
    }

    #[test]
    fn thermal_velocity_matches_30_kev_neutrons() {
        // kT = 30 keV corresponds to T ≈ 3.4813e8 K and v_T ≈ 2.396e8 cm/s.
        let v = thermal_velocity(3.4813e8).unwrap();
        assert!((v - 2.396e8).abs() / 2.396e8 < 1e-3, "v_T = {v}");
    }

    #[test]
    fn thermal_velocity_rejects_nonpositive_temperature() {
        assert!(matches!(
            thermal_velocity(0.0),
            Err(BurstError::InvalidTemperature(_))
        ));
        assert!(matches!(
            thermal_velocity(-10.0),
            Err(BurstError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn rate_conversion_round_trips_a_known_cross_section() {
        let temperature = 3.4813e8;
        let v_t = thermal_velocity(temperature).unwrap();
        let sigma_mb = 100.0;
        let rate = sigma_mb * MILLIBARN_CM2 * v_t * AVOGADRO;

        let mut rates = HashMap::new();
        rates.insert("Zr94".to_owned(), rate);
        rates.insert("Zr95".to_owned(), rate);

        let sigma = cross_sections(temperature, &chain3(), &rates).unwrap();
        assert!((sigma[0] - sigma_mb).abs() / sigma_mb < 1e-12);
        assert!((sigma[1] - sigma_mb).abs() / sigma_mb < 1e-12);
    }

    #[test]
    fn terminal_rate_is_ignored_and_zeroed() {
        let mut rates = HashMap::new();
        rates.insert("Zr94".to_owned(), 1.0e7);
        rates.insert("Zr95".to_owned(), 1.0e7);
        rates.insert("Zr96".to_owned(), 5.0e7);

        let sigma = cross_sections(3.0e8, &chain3(), &rates).unwrap();
        assert_eq!(sigma[2], 0.0);

        // Absent terminal rate is equally fine.
        rates.remove("Zr96");
        let sigma = cross_sections(3.0e8, &chain3(), &rates).unwrap();
        assert_eq!(sigma[2], 0.0);
    }

    #[test]
    fn missing_nonterminal_rate_is_an_error() {
        let mut rates = HashMap::new();
        rates.insert("Zr94".to_owned(), 1.0e7);
        let err = cross_sections(3.0e8, &chain3(), &rates).unwrap_err();
        assert_eq!(err, BurstError::MissingRate("Zr95".into()));
    }

    #[test]
    fn single_species_chain_requires_its_own_rate() {
        let chain = CaptureChain::new(vec![Species::new("Zr94", 94, 1.0)]).unwrap();
        let err = cross_sections(3.0e8, &chain, &HashMap::new()).unwrap_err();
        assert_eq!(err, BurstError::MissingRate("Zr94".into()));

        let mut rates = HashMap::new();
        rates.insert("Zr94".to_owned(), 1.0e7);
        let sigma = cross_sections(3.0e8, &chain, &rates).unwrap();
        assert!(sigma[0] > 0.0);
    }
}
