//! Contracts for the external data layers that feed the core.
//!
//! The core owns no file format, network protocol, or database parser;
//! reference compositions and reaction rates arrive through these traits.
//! The in-memory table implementations back the test suite and any embedder
//! that has already loaded its data elsewhere.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Supplies mass numbers and reference abundances by isotope name.
pub trait CompositionProvider {
    /// Mass number A, or `None` if the isotope is unknown.
    fn mass_number(&self, name: &str) -> Option<u32>;

    /// Reference abundance per gram; `None` reads as zero abundance.
    fn abundance(&self, name: &str) -> Option<f64>;
}

/// Supplies thermally averaged capture rates at a given temperature.
pub trait RateProvider {
    /// Returns name -> rate (units of N_A·⟨σv⟩) for every known species
    /// accepted by `select`.
    fn rates(&self, temperature: f64, select: &dyn Fn(&str) -> bool) -> HashMap<String, f64>;
}

/// A [`CompositionProvider`] backed by an in-memory table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableComposition {
    entries: HashMap<String, (u32, f64)>,
}

impl TableComposition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, mass_number: u32, abundance: f64) {
        self.entries.insert(name.into(), (mass_number, abundance));
    }
}

impl CompositionProvider for TableComposition {
    fn mass_number(&self, name: &str) -> Option<u32> {
        self.entries.get(name).map(|(a, _)| *a)
    }

    fn abundance(&self, name: &str) -> Option<f64> {
        self.entries.get(name).map(|(_, y)| *y)
    }
}

/// A [`RateProvider`] backed by a single-temperature in-memory table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRates {
    entries: HashMap<String, f64>,
}

impl TableRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, rate: f64) {
        self.entries.insert(name.into(), rate);
    }
}

impl RateProvider for TableRates {
    fn rates(&self, _temperature: f64, select: &dyn Fn(&str) -> bool) -> HashMap<String, f64> {
        self.entries
            .iter()
            .filter(|(name, _)| select(name))
            .map(|(name, rate)| (name.clone(), *rate))
            .collect()
    }
}

/// One measured isotope ratio from a presolar grain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrainPoint {
    pub mass_number: u32,
    /// Permille deviation from the reference ratio.
    pub delta: f64,
    /// One-sigma measurement uncertainty, permille.
    pub uncertainty: f64,
}

/// A named collection of grain measurements, read-only comparison data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrainRecord {
    pub name: String,
    pub points: Vec<GrainPoint>,
}

impl GrainRecord {
    pub fn new(name: impl Into<String>, points: Vec<GrainPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}
