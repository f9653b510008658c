use nalgebra::DVector;

use crate::traits::{ExposureStepper, ExposureSystem};

/// Classic fixed-step Runge-Kutta 4th order.
///
/// Scratch buffers are owned by the stepper so repeated stepping allocates
/// nothing; the capture chain is non-stiff and strictly decaying, so an
/// explicit method with a step-size ceiling is sufficient.
pub struct Rk4 {
    k1: DVector<f64>,
    k2: DVector<f64>,
    k3: DVector<f64>,
    k4: DVector<f64>,
    tmp: DVector<f64>,
}

impl Rk4 {
    pub fn new(dim: usize) -> Self {
        Self {
            k1: DVector::zeros(dim),
            k2: DVector::zeros(dim),
            k3: DVector::zeros(dim),
            k4: DVector::zeros(dim),
            tmp: DVector::zeros(dim),
        }
    }
}

impl ExposureStepper for Rk4 {
    fn step(&mut self, system: &dyn ExposureSystem, tau: &mut f64, y: &mut DVector<f64>, h: f64) {
        let t0 = *tau;

        system.rhs(t0, y, &mut self.k1);

        self.tmp.copy_from(y);
        self.tmp.axpy(0.5 * h, &self.k1, 1.0);
        system.rhs(t0 + 0.5 * h, &self.tmp, &mut self.k2);

        self.tmp.copy_from(y);
        self.tmp.axpy(0.5 * h, &self.k2, 1.0);
        system.rhs(t0 + 0.5 * h, &self.tmp, &mut self.k3);

        self.tmp.copy_from(y);
        self.tmp.axpy(h, &self.k3, 1.0);
        system.rhs(t0 + h, &self.tmp, &mut self.k4);

        y.axpy(h / 6.0, &self.k1, 1.0);
        y.axpy(h / 3.0, &self.k2, 1.0);
        y.axpy(h / 3.0, &self.k3, 1.0);
        y.axpy(h / 6.0, &self.k4, 1.0);

        *tau = t0 + h;
    }
}

// Tsitouras 5(4) tableau (2011), 5th-order update.
const C: [f64; 5] = [0.161, 0.327, 0.9, 0.9800255409045097, 1.0];
const A21: f64 = 0.161;
const A31: f64 = -0.008480655492356989;
const A32: f64 = 0.335480655492357;
const A41: f64 = 2.898;
const A42: f64 = -6.359447987781783;
const A43: f64 = 4.361447987781783;
const A51: f64 = 5.325864858437957;
const A52: f64 = -11.748883564062828;
const A53: f64 = 7.495539342889693;
const A54: f64 = -0.09249506636030195;
const A61: f64 = 5.86145544294642;
const A62: f64 = -12.92096931784711;
const A63: f64 = 8.159367898576159;
const A64: f64 = -0.071584973281401;
const A65: f64 = -0.02826857949054663;
const B: [f64; 6] = [
    0.09646076681806523,
    0.01,
    0.4798896504144996,
    1.379008574103742,
    -3.290069515436099,
    2.324710524099774,
];

/// Tsitouras 5/4 Runge-Kutta, fixed step with the 5th-order weights.
pub struct Tsit5 {
    k: [DVector<f64>; 6],
    tmp: DVector<f64>,
}

impl Tsit5 {
    pub fn new(dim: usize) -> Self {
        Self {
            k: std::array::from_fn(|_| DVector::zeros(dim)),
            tmp: DVector::zeros(dim),
        }
    }
}

impl ExposureStepper for Tsit5 {
    fn step(&mut self, system: &dyn ExposureSystem, tau: &mut f64, y: &mut DVector<f64>, h: f64) {
        let t0 = *tau;

        system.rhs(t0, y, &mut self.k[0]);

        self.tmp.copy_from(y);
        self.tmp.axpy(h * A21, &self.k[0], 1.0);
        system.rhs(t0 + C[0] * h, &self.tmp, &mut self.k[1]);

        self.tmp.copy_from(y);
        self.tmp.axpy(h * A31, &self.k[0], 1.0);
        self.tmp.axpy(h * A32, &self.k[1], 1.0);
        system.rhs(t0 + C[1] * h, &self.tmp, &mut self.k[2]);

        self.tmp.copy_from(y);
        self.tmp.axpy(h * A41, &self.k[0], 1.0);
        self.tmp.axpy(h * A42, &self.k[1], 1.0);
        self.tmp.axpy(h * A43, &self.k[2], 1.0);
        system.rhs(t0 + C[2] * h, &self.tmp, &mut self.k[3]);

        self.tmp.copy_from(y);
        self.tmp.axpy(h * A51, &self.k[0], 1.0);
        self.tmp.axpy(h * A52, &self.k[1], 1.0);
        self.tmp.axpy(h * A53, &self.k[2], 1.0);
        self.tmp.axpy(h * A54, &self.k[3], 1.0);
        system.rhs(t0 + C[3] * h, &self.tmp, &mut self.k[4]);

        self.tmp.copy_from(y);
        self.tmp.axpy(h * A61, &self.k[0], 1.0);
        self.tmp.axpy(h * A62, &self.k[1], 1.0);
        self.tmp.axpy(h * A63, &self.k[2], 1.0);
        self.tmp.axpy(h * A64, &self.k[3], 1.0);
        self.tmp.axpy(h * A65, &self.k[4], 1.0);
        system.rhs(t0 + C[4] * h, &self.tmp, &mut self.k[5]);

        for (weight, k) in B.iter().zip(self.k.iter()) {
            y.axpy(h * weight, k, 1.0);
        }

        *tau = t0 + h;
    }
}
