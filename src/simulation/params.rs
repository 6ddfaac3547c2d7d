//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - which integrator advances the bodies and how many sub-steps per frame,
//! - the gravitational constant and the AU-to-meters conversion (`G`, `au_meters`)

use crate::configuration::config::IntegratorConfig;

/// Newtonian gravitational constant (m^3 kg^-1 s^-2)
pub const G: f64 = 6.67408e-11;

/// Meters per astronomical unit
pub const AU_METERS: f64 = 1.496e11;

/// Sub-steps per rendered frame
pub const DEFAULT_SUBSTEPS: u32 = 1000;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub integrator: IntegratorConfig, // symplectic euler or verlet
    pub substeps: u32, // integrator steps per frame
    pub G: f64, // gravitational constant
    pub au_meters: f64, // length of one AU in meters
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::SymplecticEuler,
            substeps: DEFAULT_SUBSTEPS,
            G,
            au_meters: AU_METERS,
        }
    }
}
