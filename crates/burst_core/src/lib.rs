//! The `burst_core` crate integrates a strictly sequential neutron-capture
//! chain over cumulative neutron exposure and post-processes the resulting
//! abundances for comparison against reference compositions and measured
//! presolar-grain isotope ratios.
//!
//! Key components:
//! - **Traits**: `ExposureSystem` (chain ODEs), `ExposureStepper` (solvers),
//!   plus the external provider contracts in `providers`.
//! - **Network**: the lower-bidiagonal capture-chain right-hand side and an
//!   exact matrix-exponential reference path.
//! - **Solvers & driver**: fixed-maximum-step RK4 and Tsit5 integrators with
//!   grid and single-point sampling.
//! - **Post-processing**: cross-section derivation from rate tables, permille
//!   delta values, and stateless perturbed re-runs.

pub mod chain;
pub mod deltas;
pub mod driver;
pub mod error;
pub mod network;
pub mod providers;
pub mod rerun;
pub mod solvers;
pub mod traits;
pub mod xsection;
