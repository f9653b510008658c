//! Integration driver: propagates abundances over a neutron-exposure grid
//! or to a single exposure point.
//!
//! Every requested interval is subdivided so that no internal step exceeds
//! the configured ceiling; a smaller ceiling trades runtime for accuracy
//! and trajectory smoothness. Each call is stateless with respect to prior
//! calls.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{BurstError, Result};
use crate::solvers::{Rk4, Tsit5};
use crate::traits::{ExposureStepper, ExposureSystem};

/// Explicit integration method to use for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepMethod {
    Rk4,
    Tsit5,
}

impl StepMethod {
    fn build(self, dim: usize) -> InternalStepper {
        match self {
            StepMethod::Rk4 => InternalStepper::Rk4(Rk4::new(dim)),
            StepMethod::Tsit5 => InternalStepper::Tsit5(Tsit5::new(dim)),
        }
    }
}

enum InternalStepper {
    Rk4(Rk4),
    Tsit5(Tsit5),
}

impl InternalStepper {
    fn step(&mut self, system: &dyn ExposureSystem, tau: &mut f64, y: &mut DVector<f64>, h: f64) {
        match self {
            InternalStepper::Rk4(s) => s.step(system, tau, y, h),
            InternalStepper::Tsit5(s) => s.step(system, tau, y, h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    pub method: StepMethod,
    /// Step-size ceiling in exposure units (inverse millibarns).
    pub max_step: f64,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            method: StepMethod::Tsit5,
            max_step: 1.0e-3,
        }
    }
}

/// Abundance states sampled at the exposures of a caller-supplied grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub exposures: Vec<f64>,
    /// One abundance vector per grid point, in chain order.
    pub states: Vec<Vec<f64>>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.exposures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exposures.is_empty()
    }

    /// The state at the last grid point.
    pub fn final_state(&self) -> &[f64] {
        self.states.last().expect("trajectory has at least one point")
    }

    /// The abundance history of species `index`, for plotting.
    pub fn species_history(&self, index: usize) -> Vec<f64> {
        self.states.iter().map(|state| state[index]).collect()
    }
}

fn validate_initial_state(system: &dyn ExposureSystem, y0: &DVector<f64>) -> Result<()> {
    if y0.len() != system.dimension() {
        return Err(BurstError::InvalidChain(format!(
            "abundance vector has length {}; system dimension is {}",
            y0.len(),
            system.dimension()
        )));
    }
    for (i, &value) in y0.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(BurstError::InvalidChain(format!(
                "initial abundance at position {i} is {value}; must be finite and non-negative"
            )));
        }
    }
    Ok(())
}

fn validate_grid(grid: &[f64]) -> Result<()> {
    if grid.is_empty() {
        return Err(BurstError::InvalidExposure(
            "exposure grid must contain at least one point".into(),
        ));
    }
    for &tau in grid {
        if !tau.is_finite() || tau < 0.0 {
            return Err(BurstError::InvalidExposure(format!(
                "exposure {tau} must be finite and non-negative"
            )));
        }
    }
    for pair in grid.windows(2) {
        if pair[1] <= pair[0] {
            return Err(BurstError::InvalidExposure(format!(
                "exposure grid must strictly increase; {} follows {}",
                pair[1], pair[0]
            )));
        }
    }
    Ok(())
}

fn validate_settings(settings: &IntegrationSettings) -> Result<()> {
    if !settings.max_step.is_finite() || settings.max_step <= 0.0 {
        return Err(BurstError::InvalidExposure(format!(
            "max_step is {}; must be positive and finite",
            settings.max_step
        )));
    }
    Ok(())
}

/// Integrates the system across `grid`, treating `y0` as the state at the
/// first grid point, and records the state at every grid point.
pub fn integrate_grid(
    system: &dyn ExposureSystem,
    y0: &DVector<f64>,
    grid: &[f64],
    settings: &IntegrationSettings,
) -> Result<Trajectory> {
    validate_settings(settings)?;
    validate_initial_state(system, y0)?;
    validate_grid(grid)?;

    let mut stepper = settings.method.build(system.dimension());
    let mut tau = grid[0];
    let mut y = y0.clone();
    let mut states = Vec::with_capacity(grid.len());
    states.push(y.iter().copied().collect::<Vec<f64>>());
    let mut internal_steps = 0usize;

    for window in grid.windows(2) {
        let span = window[1] - window[0];
        let substeps = (span / settings.max_step).ceil().max(1.0) as usize;
        let h = span / substeps as f64;
        for _ in 0..substeps {
            stepper.step(system, &mut tau, &mut y, h);
        }
        // Land exactly on the grid point; the per-substep tau accumulates
        // rounding error over long runs.
        tau = window[1];
        internal_steps += substeps;
        states.push(y.iter().copied().collect::<Vec<f64>>());
    }

    log::debug!(
        "integrated {} grid intervals with {} internal steps (method {:?})",
        grid.len() - 1,
        internal_steps,
        settings.method
    );

    Ok(Trajectory {
        exposures: grid.to_vec(),
        states,
    })
}

/// Integrates from zero exposure to `tau` and returns only the final state.
pub fn integrate_to(
    system: &dyn ExposureSystem,
    y0: &DVector<f64>,
    tau: f64,
    settings: &IntegrationSettings,
) -> Result<DVector<f64>> {
    if !tau.is_finite() || tau < 0.0 {
        return Err(BurstError::InvalidExposure(format!(
            "exposure {tau} must be finite and non-negative"
        )));
    }
    if tau == 0.0 {
        validate_settings(settings)?;
        validate_initial_state(system, y0)?;
        return Ok(y0.clone());
    }
    let trajectory = integrate_grid(system, y0, &[0.0, tau], settings)?;
    Ok(DVector::from_row_slice(trajectory.final_state()))
}
