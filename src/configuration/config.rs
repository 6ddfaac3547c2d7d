//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ClockConfig`]      – initial time multiplier and pause state
//! - [`IntegratorSettings`] – integration method, sub-steps, physical constants
//! - [`SearchConfig`]     – mass-sweep settings for the stability search
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section except `bodies` may be omitted and falls back to defaults.
//!
//! # YAML format
//!
//! ```yaml
//! clock:
//!   multiplier: 86400.0        # simulated seconds per real second
//!   paused: false
//!
//! integrator:
//!   method: "symplectic_euler" # or "verlet"
//!   substeps: 1000             # integrator steps per frame
//!
//! search:
//!   initial_mass: 1.0e20       # first candidate central mass (kg)
//!   growth: 1.05               # candidate multiplier between trials
//!   ceiling: 1.0e40            # search ends once the candidate exceeds this
//!   trial_duration: 1576800000.0 # 50 Julian years (s)
//!   multiplier: 31557600.0     # clock multiplier while searching
//!
//! central: "Sun"               # optional, defaults to the first body
//!
//! bodies:
//!   - name: "Sun"
//!     kind: star
//!     x: [0.0, 0.0]            # AU
//!     v: [0.0, 0.0]            # m/s
//!     m: 1.9885e30             # kg
//!     rotation_period: 2192832 # s, 0 = does not rotate
//!   - name: "Earth"
//!     kind: planet
//!     x: [-1.0, 0.0]
//!     v: [0.0, -29781.0]
//!     m: 5.972e24
//!     rotation_period: 86164
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::simulation::params::{AU_METERS, DEFAULT_SUBSTEPS, G};
use crate::simulation::scenario::ScenarioError;

/// Which integrator method used by the engine
/// `method: "symplectic_euler"` or `method: "verlet"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "symplectic_euler")] // Kick then drift, one force evaluation per step
    SymplecticEuler,

    #[serde(rename = "verlet")] // Velocity Verlet, two force evaluations per step, second order
    Verlet,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ClockConfig {
    pub multiplier: f64, // simulated seconds per real second
    pub paused: bool, // start paused
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { multiplier: 1.0, paused: false }
    }
}

#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct IntegratorSettings {
    pub method: IntegratorConfig, // time integrator used for advancing the bodies
    pub substeps: u32, // integrator steps per frame
    pub G: f64, // gravitational constant
    pub au_meters: f64, // meters per AU
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            method: IntegratorConfig::default(),
            substeps: DEFAULT_SUBSTEPS,
            G,
            au_meters: AU_METERS,
        }
    }
}

/// Settings for the central-mass stability sweep
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub initial_mass: f64, // first candidate (kg)
    pub growth: f64, // factor applied to the candidate after every trial
    pub ceiling: f64, // stop once the candidate exceeds this (kg)
    pub trial_duration: f64, // simulated seconds a trial must survive
    pub multiplier: f64, // clock multiplier while the search runs
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_mass: 1.0e20,
            growth: 1.05,
            ceiling: 1.0e40,
            trial_duration: 1_576_800_000.0,
            multiplier: 31_557_600.0,
        }
    }
}

impl SearchConfig {
    /// Reject settings under which the sweep could never reach its ceiling
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if !(self.initial_mass.is_finite() && self.initial_mass > 0.0) {
            return Err(ScenarioError::InvalidSearch("initial_mass must be positive"));
        }
        if !(self.growth.is_finite() && self.growth > 1.0) {
            return Err(ScenarioError::InvalidSearch("growth must be greater than 1"));
        }
        if !self.ceiling.is_finite() {
            return Err(ScenarioError::InvalidSearch("ceiling must be finite"));
        }
        if !(self.trial_duration.is_finite() && self.trial_duration > 0.0) {
            return Err(ScenarioError::InvalidSearch("trial_duration must be positive"));
        }
        // Simulated time must move forward or no trial ever ends
        if !(self.multiplier.is_finite() && self.multiplier > 0.0) {
            return Err(ScenarioError::InvalidSearch("multiplier must be positive"));
        }
        Ok(())
    }
}

/// Body category as written in YAML
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyKindConfig {
    Star,
    #[default]
    Planet,
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String, // label shown by display code
    #[serde(default)]
    pub kind: BodyKindConfig, // star or planet
    pub x: Vec<f64>, // initial position [x, y] in AU
    pub v: Vec<f64>, // initial velocity [x, y] in m/s
    pub m: f64, // mass in kg
    #[serde(default)]
    pub rotation_period: i64, // seconds per rotation, 0 = does not rotate
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub integrator: IntegratorSettings,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub central: Option<String>, // name of the central body, first body if absent
    pub bodies: Vec<BodyConfig>, // ordered initial state
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
