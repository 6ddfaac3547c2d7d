//! Fixed-step time integrators for the orbital system
//!
//! Provides a semi-implicit (symplectic) Euler step and a velocity-Verlet step,
//! both driven by `AccelSet` and `Parameters`, plus the per-frame sub-stepping
//! loop that splits one frame's simulated time into many small steps.
//!
//! Velocities are tracked in m/s and positions in AU, so every position update
//! divides by `params.au_meters`.

use super::states::{System, NVec2};
use super::forces::AccelSet;
use super::params::Parameters;
use crate::configuration::config::IntegratorConfig;

/// Advance the system by one step of semi-implicit Euler
/// v_n+1 = v_n + dt * a(x_n), then x_n+1 = x_n + dt * v_n+1
pub fn symplectic_euler(sys: &mut System, forces: &AccelSet, params: &Parameters, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    // Accelerations from the positions at the start of the step
    let mut acc = vec![NVec2::zeros(); n];
    forces.accumulate_accels(&*sys, &mut acc);

    // Kick: all velocities first
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += dt * *a;
    }

    // Drift with the new velocities, converting m to AU
    let scale = dt / params.au_meters;
    for b in sys.bodies.iter_mut() {
        b.x += scale * b.v;
    }

    spin(sys, dt);
}

/// Advance the system by one step using velocity-Verlet
/// Uses two force evaluations per step
pub fn velocity_verlet(sys: &mut System, forces: &AccelSet, params: &Parameters, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 {
        return;
    }
    let half_dt = 0.5 * dt;

    // a_n from x_n
    let mut a_old = vec![NVec2::zeros(); n];
    forces.accumulate_accels(&*sys, &mut a_old);

    // Kick: v_n+1/2 = v_n + (dt/2) * a_n
    for (b, a) in sys.bodies.iter_mut().zip(a_old.iter()) {
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    let scale = dt / params.au_meters;
    for b in sys.bodies.iter_mut() {
        b.x += scale * b.v;
    }

    // a_n+1 from x_n+1
    let mut a_new = vec![NVec2::zeros(); n];
    forces.accumulate_accels(&*sys, &mut a_new);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(a_new.iter()) {
        b.v += half_dt * *a;
    }

    spin(sys, dt);
}

/// Turn each rotating body about its axis; purely visual
fn spin(sys: &mut System, dt: f64) {
    for b in sys.bodies.iter_mut().filter(|b| b.rotation_period != 0) {
        b.rotation = (b.rotation + 360.0 / b.rotation_period as f64 * dt).rem_euclid(360.0);
    }
}

/// Advance the system through one frame of simulated time `frame_dt`
/// using `params.substeps` equal sub-steps of the configured integrator.
/// Returns how many sub-steps were taken.
pub fn advance_frame(sys: &mut System, forces: &AccelSet, params: &Parameters, frame_dt: f64) -> u64 {
    if frame_dt <= 0.0 || params.substeps == 0 {
        return 0;
    }

    let dt = frame_dt / params.substeps as f64;
    for _ in 0..params.substeps {
        match params.integrator {
            IntegratorConfig::SymplecticEuler => symplectic_euler(sys, forces, params, dt),
            IntegratorConfig::Verlet => velocity_verlet(sys, forces, params, dt),
        }
    }
    params.substeps as u64
}

/// True when every position and velocity component is a finite number
pub fn is_finite(sys: &System) -> bool {
    sys.bodies.iter().all(|b| {
        b.x.iter().all(|c| c.is_finite()) && b.v.iter().all(|c| c.is_finite())
    })
}
