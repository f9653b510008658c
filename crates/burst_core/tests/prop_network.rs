//! Property-based tests for the capture-chain core.
//!
//! Covers: abundance conservation and non-negativity under integration,
//! chain construction invariants, perturbation semantics, and serde
//! round-trips of the public data types.

use burst_core::chain::{CaptureChain, Species};
use burst_core::driver::{
    integrate_grid, integrate_to, IntegrationSettings, StepMethod, Trajectory,
};
use burst_core::network::CaptureSystem;
use burst_core::providers::{GrainPoint, GrainRecord};
use burst_core::rerun::perturbed_abundances;
use nalgebra::DVector;
use proptest::prelude::*;
use std::collections::HashMap;

fn settings() -> IntegrationSettings {
    IntegrationSettings {
        method: StepMethod::Tsit5,
        max_step: 0.01,
    }
}

proptest! {
    /// Total abundance is invariant over exposure for multi-species chains:
    /// every capture moves mass from species i to i + 1, none is destroyed.
    #[test]
    fn total_abundance_is_conserved(
        sigma in prop::collection::vec(0.0f64..5.0, 1..6),
        seed in prop::collection::vec(0.0f64..10.0, 2..7),
        tau in 0.0f64..4.0,
    ) {
        let n = sigma.len().min(seed.len() - 1) + 1;
        let system = CaptureSystem::new(&sigma[..n - 1], n).unwrap();
        let y0 = DVector::from_row_slice(&seed[..n]);

        let y = integrate_to(&system, &y0, tau, &settings()).unwrap();
        let before: f64 = y0.sum();
        let after: f64 = y.sum();
        prop_assert!((after - before).abs() <= 1e-8 * (1.0 + before.abs()));
    }

    /// Abundances never drop meaningfully below zero for non-negative
    /// initial states and cross sections.
    #[test]
    fn abundances_stay_non_negative(
        sigma in prop::collection::vec(0.0f64..5.0, 2..6),
        tau in 0.0f64..4.0,
    ) {
        let n = sigma.len() + 1;
        let system = CaptureSystem::new(&sigma, n).unwrap();
        let mut y0 = DVector::zeros(n);
        y0[0] = 1.0;

        let y = integrate_to(&system, &y0, tau, &settings()).unwrap();
        for i in 0..n {
            prop_assert!(y[i] >= -1e-9, "y[{}] = {}", i, y[i]);
        }
    }

    /// A zero-percent perturbation of every species is the identity.
    #[test]
    fn zero_perturbation_is_identity(
        abundances in prop::collection::vec(0.0f64..10.0, 1..6),
    ) {
        let species: Vec<Species> = abundances
            .iter()
            .enumerate()
            .map(|(i, &y)| Species::new(format!("S{}", 90 + i), 90 + i as u32, y))
            .collect();
        let chain = CaptureChain::new(species).unwrap();

        let mut offsets = HashMap::new();
        for s in chain.species() {
            offsets.insert(s.name.clone(), 0.0);
        }
        let y0 = perturbed_abundances(&chain, &offsets).unwrap();
        prop_assert_eq!(y0, chain.initial_abundances());
    }

    /// Chains with non-increasing mass numbers are always rejected.
    #[test]
    fn unordered_chains_are_rejected(a in 1u32..200, b in 0u32..200) {
        let result = CaptureChain::new(vec![
            Species::new("first", a, 1.0),
            Species::new("second", a.saturating_sub(b), 1.0),
        ]);
        prop_assert!(result.is_err());
    }

    /// Grain records survive a serde round-trip.
    #[test]
    fn grain_record_roundtrips(
        deltas in prop::collection::vec(-1000.0f64..1000.0, 1..8),
    ) {
        let points: Vec<GrainPoint> = deltas
            .iter()
            .enumerate()
            .map(|(i, &d)| GrainPoint {
                mass_number: 90 + i as u32,
                delta: d,
                uncertainty: 25.0,
            })
            .collect();
        let record = GrainRecord::new("mainstream SiC", points);

        let json = serde_json::to_string(&record).unwrap();
        let back: GrainRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(record, back);
    }

    /// Trajectories and settings survive a serde round-trip.
    #[test]
    fn trajectory_and_settings_roundtrip(
        sigma in prop::collection::vec(0.0f64..5.0, 1..4),
        step in 1.0e-3f64..0.1,
        use_rk4 in any::<bool>(),
    ) {
        let run_settings = IntegrationSettings {
            method: if use_rk4 { StepMethod::Rk4 } else { StepMethod::Tsit5 },
            max_step: step,
        };
        let json = serde_json::to_string(&run_settings).unwrap();
        let back: IntegrationSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(run_settings, back);

        let n = sigma.len() + 1;
        let system = CaptureSystem::new(&sigma, n).unwrap();
        let mut y0 = DVector::zeros(n);
        y0[0] = 1.0;
        let trajectory =
            integrate_grid(&system, &y0, &[0.0, 0.5, 1.0], &run_settings).unwrap();

        let json = serde_json::to_string(&trajectory).unwrap();
        let back: Trajectory = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(trajectory, back);
    }

    /// Species definitions survive a serde round-trip.
    #[test]
    fn species_roundtrips(mass in 1u32..250, abundance in 0.0f64..1.0) {
        let species = Species::new("Zr94", mass, abundance);
        let json = serde_json::to_string(&species).unwrap();
        let back: Species = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(species, back);
    }
}
