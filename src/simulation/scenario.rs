//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), validates it, and produces the runtime
//! bundle `Scenario` containing:
//! - numerical parameters (`Parameters`)
//! - the simulated-time source (`Clock`)
//! - baseline and live body sets (`SystemSnapshot`)
//! - active force set (`AccelSet`)
//! - the central-mass stability search (`StabilitySearch`)
//!
//! `Scenario::tick` is the single per-frame entry point; display code reads
//! `bodies()` after it returns.

use thiserror::Error;
use tracing::debug;

use crate::configuration::config::{BodyConfig, BodyKindConfig, ScenarioConfig};
use crate::search::harness::{StabilitySearch, TrialResolved};
use crate::simulation::clock::Clock;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::advance_frame;
use crate::simulation::params::Parameters;
use crate::simulation::snapshot::SystemSnapshot;
use crate::simulation::states::{Body, BodyKind, NVec2, System};

/// Reasons a configured body set cannot be simulated
#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("scenario has no bodies")]
    EmptySystem,
    #[error("body {name}: `{field}` must have 2 components, got {len}")]
    BadVector { name: String, field: &'static str, len: usize },
    #[error("body {name}: position, velocity and mass must be finite")]
    NonFinite { name: String },
    #[error("body {name}: mass must be positive, got {mass}")]
    NonPositiveMass { name: String, mass: f64 },
    #[error("bodies {first} and {second} start at the same position")]
    CoincidentBodies { first: String, second: String },
    #[error("central body {0} is not in the scenario")]
    UnknownCentral(String),
    #[error("integrator substeps must be at least 1")]
    ZeroSubsteps,
    #[error("invalid physical constant: {0}")]
    InvalidConstant(&'static str),
    #[error("invalid search setting: {0}")]
    InvalidSearch(&'static str),
    #[error("invalid clock setting: {0}")]
    InvalidClock(&'static str),
}

/// Runtime bundle for one loaded system
pub struct Scenario {
    pub parameters: Parameters,
    pub forces: AccelSet,
    clock: Clock,
    snapshot: SystemSnapshot,
    search: StabilitySearch,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let bodies = cfg
            .bodies
            .iter()
            .map(body_from_config)
            .collect::<Result<Vec<Body>, ScenarioError>>()?;

        let central = match &cfg.central {
            Some(name) => bodies
                .iter()
                .position(|b| &b.name == name)
                .ok_or_else(|| ScenarioError::UnknownCentral(name.clone()))?,
            None => 0,
        };

        let system = System { bodies, central };
        validate_system(&system)?;

        // Parameters (runtime) from IntegratorSettings
        let i_cfg = cfg.integrator;
        if i_cfg.substeps == 0 {
            return Err(ScenarioError::ZeroSubsteps);
        }
        if !(i_cfg.G.is_finite() && i_cfg.G > 0.0) {
            return Err(ScenarioError::InvalidConstant("G must be positive"));
        }
        if !(i_cfg.au_meters.is_finite() && i_cfg.au_meters > 0.0) {
            return Err(ScenarioError::InvalidConstant("au_meters must be positive"));
        }
        let parameters = Parameters {
            integrator: i_cfg.method,
            substeps: i_cfg.substeps,
            G: i_cfg.G,
            au_meters: i_cfg.au_meters,
        };

        let search = StabilitySearch::new(cfg.search)?;

        if !cfg.clock.multiplier.is_finite() {
            return Err(ScenarioError::InvalidClock("multiplier must be finite"));
        }
        let mut clock = Clock::new();
        clock.set_multiplier(cfg.clock.multiplier);
        if cfg.clock.paused {
            clock.toggle_pause();
        }

        // Forces: construct an AccelSet and register Newtonian gravity
        let forces = AccelSet::new().with(NewtonianGravity {
            G: parameters.G,
            au_meters: parameters.au_meters,
        });

        debug!(bodies = system.bodies.len(), central, "scenario built");

        Ok(Self {
            parameters,
            forces,
            clock,
            snapshot: SystemSnapshot::new(system),
            search,
        })
    }

    /// One frame with wall-clock timing
    pub fn tick(&mut self) -> Option<TrialResolved> {
        self.clock.tick();
        self.step_frame()
    }

    /// One frame that lasted `frame_secs` real seconds
    pub fn tick_with(&mut self, frame_secs: f64) -> Option<TrialResolved> {
        self.clock.tick_with(frame_secs);
        self.step_frame()
    }

    fn step_frame(&mut self) -> Option<TrialResolved> {
        self.search.begin_tick(&mut self.snapshot, &self.clock);

        let dt = self.clock.delta();
        if dt > 0.0 {
            let steps = advance_frame(self.snapshot.live_mut(), &self.forces, &self.parameters, dt);
            self.clock.advance_total_time(dt);
            self.clock.record_updates(steps);
        }
        self.clock.record_frame();

        self.search.end_tick(&mut self.snapshot, &mut self.clock)
    }

    pub fn start_search(&mut self) -> bool {
        self.search.start(&mut self.snapshot, &mut self.clock)
    }

    pub fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
    }

    pub fn set_multiplier(&mut self, value: f64) {
        self.clock.set_multiplier(value);
    }

    pub fn change_multiplier(&mut self, factor: f64) {
        self.clock.change_multiplier(factor);
    }

    /// Current live bodies, for display
    pub fn bodies(&self) -> &[Body] {
        &self.snapshot.live().bodies
    }

    /// Live bodies for user edits between frames
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.snapshot.live_mut().bodies
    }

    pub fn system(&self) -> &System {
        self.snapshot.live()
    }

    pub fn snapshot(&self) -> &SystemSnapshot {
        &self.snapshot
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn search(&self) -> &StabilitySearch {
        &self.search
    }
}

fn body_from_config(bc: &BodyConfig) -> Result<Body, ScenarioError> {
    let x = vec2(&bc.name, "x", &bc.x)?;
    let v = vec2(&bc.name, "v", &bc.v)?;
    if !(x.iter().all(|c| c.is_finite()) && v.iter().all(|c| c.is_finite()) && bc.m.is_finite()) {
        return Err(ScenarioError::NonFinite { name: bc.name.clone() });
    }
    if bc.m <= 0.0 {
        return Err(ScenarioError::NonPositiveMass { name: bc.name.clone(), mass: bc.m });
    }

    Ok(Body {
        name: bc.name.clone(),
        kind: match bc.kind {
            BodyKindConfig::Star => BodyKind::Star,
            BodyKindConfig::Planet => BodyKind::Planet,
        },
        x,
        v,
        m: bc.m,
        rotation_period: bc.rotation_period,
        rotation: 0.0,
    })
}

fn vec2(name: &str, field: &'static str, c: &[f64]) -> Result<NVec2, ScenarioError> {
    match c {
        [a, b] => Ok(NVec2::new(*a, *b)),
        _ => Err(ScenarioError::BadVector { name: name.to_string(), field, len: c.len() }),
    }
}

/// Reject body sets the force law cannot handle
fn validate_system(sys: &System) -> Result<(), ScenarioError> {
    if sys.bodies.is_empty() {
        return Err(ScenarioError::EmptySystem);
    }
    for (i, bi) in sys.bodies.iter().enumerate() {
        for bj in &sys.bodies[i + 1..] {
            if bi.x == bj.x {
                return Err(ScenarioError::CoincidentBodies {
                    first: bi.name.clone(),
                    second: bj.name.clone(),
                });
            }
        }
    }
    Ok(())
}
