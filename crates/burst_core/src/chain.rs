use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{BurstError, Result};
use crate::providers::CompositionProvider;

/// One isotope in the capture chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Unique name, e.g. "Zr96".
    pub name: String,
    /// Mass number A.
    pub mass_number: u32,
    /// Initial abundance (moles per gram, or any consistent normalization).
    pub initial_abundance: f64,
}

impl Species {
    pub fn new(name: impl Into<String>, mass_number: u32, initial_abundance: f64) -> Self {
        Self {
            name: name.into(),
            mass_number,
            initial_abundance,
        }
    }
}

/// An ordered, non-branching sequence of isotopes undergoing sequential
/// neutron capture: species i only transforms into species i + 1.
///
/// Invariants enforced at construction: non-empty, unique names, strictly
/// increasing mass numbers, non-negative initial abundances. A chain is
/// immutable once built; every integration request reads from it without
/// modifying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureChain {
    species: Vec<Species>,
}

impl CaptureChain {
    pub fn new(species: Vec<Species>) -> Result<Self> {
        if species.is_empty() {
            return Err(BurstError::InvalidChain(
                "chain must contain at least one species".into(),
            ));
        }
        for pair in species.windows(2) {
            if pair[1].mass_number <= pair[0].mass_number {
                return Err(BurstError::InvalidChain(format!(
                    "mass numbers must strictly increase along the chain: `{}` (A={}) follows `{}` (A={})",
                    pair[1].name, pair[1].mass_number, pair[0].name, pair[0].mass_number
                )));
            }
        }
        for (i, s) in species.iter().enumerate() {
            if !s.initial_abundance.is_finite() || s.initial_abundance < 0.0 {
                return Err(BurstError::InvalidChain(format!(
                    "initial abundance of `{}` is {}; must be finite and non-negative",
                    s.name, s.initial_abundance
                )));
            }
            if species[..i].iter().any(|other| other.name == s.name) {
                return Err(BurstError::InvalidChain(format!(
                    "duplicate species name `{}`",
                    s.name
                )));
            }
        }
        Ok(Self { species })
    }

    /// Builds a chain from provider data, preserving the order of `names`.
    ///
    /// An isotope unknown to the provider is an error; a known isotope with
    /// no reference abundance entry starts at zero.
    pub fn from_provider<P: CompositionProvider>(names: &[&str], provider: &P) -> Result<Self> {
        let mut species = Vec::with_capacity(names.len());
        for &name in names {
            let mass_number = provider
                .mass_number(name)
                .ok_or_else(|| BurstError::MissingSpecies(name.to_owned()))?;
            let abundance = provider.abundance(name).unwrap_or(0.0);
            species.push(Species::new(name, mass_number, abundance));
        }
        Self::new(species)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    /// Position of `name` in chain order.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.species
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| BurstError::MissingSpecies(name.to_owned()))
    }

    /// The terminal species (pure sink for chains of length >= 2).
    pub fn terminal(&self) -> &Species {
        self.species.last().expect("chain is non-empty")
    }

    /// Baseline abundance vector in chain order.
    pub fn initial_abundances(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.species.len(),
            self.species.iter().map(|s| s.initial_abundance),
        )
    }

    /// Mass numbers in chain order, for delta-vs-A comparison plots.
    pub fn mass_numbers(&self) -> Vec<u32> {
        self.species.iter().map(|s| s.mass_number).collect()
    }
}
