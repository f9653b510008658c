use nalgebra::DVector;

/// A system of ODEs over neutron exposure tau.
///
/// The right-hand side must be pure: it may not mutate `y` and writes its
/// result into `out`, which has the same length as `y`.
pub trait ExposureSystem {
    /// Number of species tracked by the system.
    fn dimension(&self) -> usize;

    /// Evaluates dy/dtau at exposure `tau` into `out`.
    fn rhs(&self, tau: f64, y: &DVector<f64>, out: &mut DVector<f64>);
}

/// A single-step explicit integrator over exposure.
pub trait ExposureStepper {
    /// Advances `y` by one step of size `h`, updating `tau` in place.
    fn step(&mut self, system: &dyn ExposureSystem, tau: &mut f64, y: &mut DVector<f64>, h: f64);
}
