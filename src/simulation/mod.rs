pub mod states;
pub mod params;
pub mod clock;
pub mod forces;
pub mod integrator;
pub mod snapshot;
pub mod scenario;
