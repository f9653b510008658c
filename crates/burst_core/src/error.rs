use thiserror::Error;

/// Error kinds surfaced by the capture-chain core.
///
/// Every failure is synchronous and local to the requested computation;
/// chain definitions and cross-section arrays are never mutated by a
/// failing call, so subsequent calls remain valid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BurstError {
    /// A species name was looked up against a chain or provider that does
    /// not contain it.
    #[error("species `{0}` is not part of the chain or provider data")]
    MissingSpecies(String),

    /// The rate table lacks an entry for a non-terminal species.
    #[error("no capture rate for non-terminal species `{0}`")]
    MissingRate(String),

    /// A delta value is undefined because a reference abundance is zero
    /// (or the normalizing species has a non-positive abundance).
    #[error("delta value undefined for `{0}`: {1}")]
    UndefinedDelta(String, String),

    /// Negative, non-finite, or non-monotonic exposure input.
    #[error("invalid exposure input: {0}")]
    InvalidExposure(String),

    /// Non-positive or non-finite temperature.
    #[error("invalid temperature {0} K; must be positive and finite")]
    InvalidTemperature(f64),

    /// Perturbation percentage outside [-100, +100].
    #[error("perturbation for `{name}` is {percent}%; must lie in [-100, 100]")]
    InvalidPerturbation { name: String, percent: f64 },

    /// The chain definition violates a structural invariant.
    #[error("invalid chain: {0}")]
    InvalidChain(String),
}

pub type Result<T> = std::result::Result<T, BurstError>;
