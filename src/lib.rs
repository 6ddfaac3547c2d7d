pub mod simulation;
pub mod configuration;
pub mod search;
pub mod benchmark;

pub use simulation::states::{Body, BodyKind, System, NVec2};
pub use simulation::clock::Clock;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{symplectic_euler, velocity_verlet, advance_frame};
pub use simulation::params::{Parameters, G, AU_METERS};
pub use simulation::snapshot::SystemSnapshot;
pub use simulation::scenario::{Scenario, ScenarioError};

pub use configuration::config::{IntegratorConfig, ClockConfig, IntegratorSettings, SearchConfig, BodyConfig, ScenarioConfig};

pub use search::harness::{StabilitySearch, SearchPhase, TrialOutcome, TrialResolved};
pub use search::report::{SearchReport, MassSummary};

pub use benchmark::benchmark::bench_substeps;
