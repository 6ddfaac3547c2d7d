//! Force / acceleration contributors for the orbital engine
//!
//! Defines the acceleration trait, the set that sums its terms, and
//! direct Newtonian gravity in mixed units (positions in AU, accelerations in m/s^2)

use crate::simulation::states::{System, NVec2};

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms, in m/s^2
    pub fn accumulate_accels(&self, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(sys, out);
        }
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]);
}

/// Direct-sum Newtonian gravity, no softening
///
/// Bodies must sit at distinct positions: a zero separation divides by zero.
/// [`Scenario::build_scenario`](crate::Scenario::build_scenario) rejects such
/// configurations before they reach the integrator.
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub au_meters: f64, // AU -> m
}

impl NewtonianGravity {
    /// Total gravitational potential energy of the system (J)
    pub fn potential_energy(&self, sys: &System) -> f64 {
        let n = sys.bodies.len();
        let mut pe = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let bi = &sys.bodies[i];
                let bj = &sys.bodies[j];
                let d = (bi.x - bj.x).norm() * self.au_meters;
                pe -= self.G * bi.m * bj.m / d;
            }
        }
        pe
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();
        if n < 2 { // nothing to attract
            return;
        }

        // Each unordered pair once, applied equal and opposite
        for i in 0..n {
            let bi = &sys.bodies[i];

            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                // r points from j to i, in AU
                let r = bi.x - bj.x;
                let dist_au = r.norm();

                // Separation in meters for the force law
                let d = dist_au * self.au_meters;

                // Unit vector from j to i; i is pulled along -r_hat, j along +r_hat
                let r_hat = r / dist_au;

                // F = G m_i m_j / d^2, divided through by the receiving mass:
                // a_i = G m_j / d^2, a_j = G m_i / d^2
                let coef = self.G / (d * d);

                out[i] -= coef * bj.m * r_hat;
                out[j] += coef * bi.m * r_hat;
            }
        }
    }
}
