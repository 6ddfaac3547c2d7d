use approx::assert_relative_eq;

use orbsim::simulation::integrator::{advance_frame, is_finite, symplectic_euler, velocity_verlet};
use orbsim::{AccelSet, Body, BodyKind, Clock, IntegratorConfig, NVec2, NewtonianGravity, Parameters, System};
use orbsim::{AU_METERS, G};

const SUN_MASS: f64 = 1.9885e30;
const EARTH_MASS: f64 = 5.972e24;
const EARTH_SPEED: f64 = 29_781.0;
const DAY: f64 = 86_400.0;

fn body(name: &str, kind: BodyKind, x: [f64; 2], v: [f64; 2], m: f64) -> Body {
    Body {
        name: name.to_string(),
        kind,
        x: NVec2::new(x[0], x[1]),
        v: NVec2::new(v[0], v[1]),
        m,
        rotation_period: 0,
        rotation: 0.0,
    }
}

/// Sun at the origin and a planet on the -x axis moving in -y
pub fn sun_planet(dist: f64, speed: f64) -> System {
    System::new(vec![
        body("Sun", BodyKind::Star, [0.0, 0.0], [0.0, 0.0], SUN_MASS),
        body("Earth", BodyKind::Planet, [-dist, 0.0], [0.0, -speed], EARTH_MASS),
    ])
}

/// Default physics parameters for tests
pub fn test_params(substeps: u32) -> Parameters {
    Parameters {
        substeps,
        ..Parameters::default()
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(gravity(p))
}

fn gravity(p: &Parameters) -> NewtonianGravity {
    NewtonianGravity {
        G: p.G,
        au_meters: p.au_meters,
    }
}

fn total_energy(sys: &System, p: &Parameters) -> f64 {
    sys.kinetic_energy() + gravity(p).potential_energy(sys)
}

/// Largest relative energy error seen while stepping for `duration` seconds
fn max_energy_drift(dt: f64, duration: f64) -> f64 {
    let p = test_params(1);
    let forces = gravity_set(&p);
    let mut sys = sun_planet(1.0, 0.8 * EARTH_SPEED);
    let e0 = total_energy(&sys, &p);

    let steps = (duration / dt).round() as usize;
    let mut worst: f64 = 0.0;
    for _ in 0..steps {
        symplectic_euler(&mut sys, &forces, &p, dt);
        let drift = ((total_energy(&sys, &p) - e0) / e0).abs();
        worst = worst.max(drift);
    }
    worst
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = sun_planet(1.0, 0.0);
    let p = test_params(1);
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys, &mut acc);

    let f_sun = acc[0] * sys.bodies[0].m;
    let f_earth = acc[1] * sys.bodies[1].m;
    let net = f_sun + f_earth;

    assert!(net.norm() < 1e-9 * f_sun.norm(), "Net force not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = sun_planet(2.0, 0.0);
    let p = test_params(1);
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys, &mut acc);

    let to_sun = sys.bodies[0].x - sys.bodies[1].x;
    assert!(acc[1].dot(&to_sun) > 0.0, "Planet is not pulled toward the sun");
    assert!(acc[0].dot(&to_sun) < 0.0, "Sun is not pulled toward the planet");
}

#[test]
fn gravity_magnitude_uses_meters() {
    let sys = sun_planet(1.0, 0.0);
    let p = test_params(1);
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys, &mut acc);

    let expected = G * SUN_MASS / (AU_METERS * AU_METERS);
    assert_relative_eq!(acc[1].norm(), expected, max_relative = 1e-12);
}

#[test]
fn gravity_inverse_square_law() {
    let p = test_params(1);
    let forces = gravity_set(&p);

    let mut acc_r = vec![NVec2::zeros(); 2];
    let mut acc_2r = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sun_planet(1.0, 0.0), &mut acc_r);
    forces.accumulate_accels(&sun_planet(2.0, 0.0), &mut acc_2r);

    let ratio = acc_r[1].norm() / acc_2r[1].norm();
    assert_relative_eq!(ratio, 4.0, max_relative = 1e-12);
}

#[test]
fn gravity_single_body_feels_nothing() {
    let sys = System::new(vec![body("Sun", BodyKind::Star, [0.3, 0.1], [0.0, 0.0], SUN_MASS)]);
    let p = test_params(1);

    let mut acc = vec![NVec2::new(1.0, 1.0)];
    gravity_set(&p).accumulate_accels(&sys, &mut acc);

    assert_eq!(acc[0], NVec2::zeros());
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn euler_converts_velocity_to_au() {
    let mut sys = System::new(vec![body("Probe", BodyKind::Planet, [0.0, 0.0], [1.0e6, -2.0e6], 1.0)]);
    let p = test_params(1);

    symplectic_euler(&mut sys, &gravity_set(&p), &p, AU_METERS / 1.0e6);

    assert_relative_eq!(sys.bodies[0].x.x, 1.0, max_relative = 1e-12);
    assert_relative_eq!(sys.bodies[0].x.y, -2.0, max_relative = 1e-12);
}

#[test]
fn euler_updates_velocity_before_position() {
    let mut sys = sun_planet(1.0, 0.0);
    let p = test_params(1);
    let dt = 3600.0;

    symplectic_euler(&mut sys, &gravity_set(&p), &p, dt);

    // Planet started at rest, so it only moves if the new velocity was used
    let a = G * SUN_MASS / (AU_METERS * AU_METERS);
    assert_relative_eq!(sys.bodies[1].v.x, a * dt, max_relative = 1e-9);
    assert_relative_eq!(sys.bodies[1].x.x, -1.0 + a * dt * dt / AU_METERS, max_relative = 1e-12);
}

#[test]
fn rotation_advances_with_period() {
    let mut spinning = body("Earth", BodyKind::Planet, [-1.0, 0.0], [0.0, 0.0], EARTH_MASS);
    spinning.rotation_period = 86_400;
    let still = body("Moon", BodyKind::Planet, [-2.0, 0.0], [0.0, 0.0], 7.3e22);
    let mut sys = System::new(vec![spinning, still]);
    let p = test_params(1);

    symplectic_euler(&mut sys, &gravity_set(&p), &p, 21_600.0);
    assert_relative_eq!(sys.bodies[0].rotation, 90.0, epsilon = 1e-9);
    assert_eq!(sys.bodies[1].rotation, 0.0);

    // Wraps into [0, 360)
    symplectic_euler(&mut sys, &gravity_set(&p), &p, 86_400.0);
    assert_relative_eq!(sys.bodies[0].rotation, 90.0, epsilon = 1e-9);
}

#[test]
fn advance_frame_counts_substeps() {
    let mut sys = sun_planet(1.0, EARTH_SPEED);
    let p = test_params(250);
    let forces = gravity_set(&p);

    assert_eq!(advance_frame(&mut sys, &forces, &p, DAY), 250);

    let before = sys.clone();
    assert_eq!(advance_frame(&mut sys, &forces, &p, 0.0), 0);
    assert_eq!(sys, before);
}

#[test]
fn momentum_is_conserved() {
    // Give the sun the opposite momentum so the pair starts near rest
    let mut sys = sun_planet(1.0, EARTH_SPEED);
    sys.bodies[0].v = NVec2::new(0.0, EARTH_MASS * EARTH_SPEED / SUN_MASS);
    let p = test_params(1);
    let forces = gravity_set(&p);

    let p0 = sys.total_momentum();
    for _ in 0..10_000 {
        symplectic_euler(&mut sys, &forces, &p, 3600.0);
    }
    let p1 = sys.total_momentum();

    let scale = EARTH_MASS * EARTH_SPEED;
    assert!((p1 - p0).norm() < 1e-9 * scale, "Momentum drifted by {:?}", p1 - p0);
}

#[test]
fn energy_drift_is_bounded_and_first_order() {
    let year = 365.25 * DAY;
    let coarse = max_energy_drift(3600.0, year);
    let fine = max_energy_drift(1800.0, year);

    assert!(coarse < 1e-2, "Energy drift {} above tolerance", coarse);
    assert!(fine < coarse, "Halving dt did not reduce drift: {} vs {}", fine, coarse);
}

#[test]
fn earth_orbit_closes_after_one_year() {
    let mut sys = sun_planet(1.0, EARTH_SPEED);
    let p = test_params(1000); // dt = 1/1000 day
    let forces = gravity_set(&p);

    for _ in 0..365 {
        advance_frame(&mut sys, &forces, &p, DAY);
    }
    advance_frame(&mut sys, &forces, &p, 0.25 * DAY);

    let r = sys.bodies[1].distance_from_origin();
    assert!((r - 1.0).abs() < 0.05, "Planet ended at {} AU", r);
    // Back near the starting point on the -x side
    assert!(sys.bodies[1].x.x < -0.9);
}

#[test]
fn verlet_keeps_circular_radius() {
    let mut sys = sun_planet(1.0, EARTH_SPEED);
    let p = Parameters {
        integrator: IntegratorConfig::Verlet,
        substeps: 24,
        ..Parameters::default()
    };
    let forces = gravity_set(&p);

    for _ in 0..365 {
        advance_frame(&mut sys, &forces, &p, DAY);
    }

    let r = sys.bodies[1].distance_from_origin();
    assert!((r - 1.0).abs() < 0.01, "Planet drifted to {} AU", r);
}

#[test]
fn velocity_verlet_moves_bodies() {
    let mut sys = sun_planet(1.0, EARTH_SPEED);
    let p = test_params(1);
    let before = sys.bodies[1].x;

    velocity_verlet(&mut sys, &gravity_set(&p), &p, 3600.0);

    assert!((sys.bodies[1].x - before).norm() > 0.0);
    assert!(sys.bodies[1].v.x > 0.0, "Planet velocity not bent toward the sun");
}

#[test]
fn finite_check_flags_nan() {
    let mut sys = sun_planet(1.0, EARTH_SPEED);
    assert!(is_finite(&sys));

    sys.bodies[1].v.y = f64::NAN;
    assert!(!is_finite(&sys));

    sys.bodies[1].v.y = 0.0;
    sys.bodies[0].x.x = f64::INFINITY;
    assert!(!is_finite(&sys));
}

// ==================================================================================
// Clock tests
// ==================================================================================

#[test]
fn clock_clamps_long_frames() {
    let mut clock = Clock::new();

    assert_eq!(clock.tick_with(0.2), 0.05);
    assert_eq!(clock.tick_with(-1.0), 0.0);
    assert_eq!(clock.tick_with(0.01), 0.01);
}

#[test]
fn clock_wall_tick_is_bounded() {
    let mut clock = Clock::new();

    assert_eq!(clock.tick(), 0.0);
    let d = clock.tick();
    assert!((0.0..=0.05).contains(&d));
}

#[test]
fn clock_multiplier_and_pause() {
    let mut clock = Clock::new();
    clock.tick_with(0.02);
    clock.set_multiplier(10.0);
    assert_relative_eq!(clock.delta(), 0.2, max_relative = 1e-12);

    clock.change_multiplier(0.5);
    assert_relative_eq!(clock.multiplier(), 5.0, max_relative = 1e-12);
    assert_relative_eq!(clock.delta(), 0.1, max_relative = 1e-12);

    clock.toggle_pause();
    assert!(clock.is_paused());
    assert_eq!(clock.delta(), 0.0);
    assert_eq!(clock.delta_unscaled(true), 0.0);
    assert_eq!(clock.delta_unscaled(false), 0.02);

    clock.toggle_pause();
    assert_relative_eq!(clock.delta(), 0.1, max_relative = 1e-12);
}

#[test]
fn clock_total_time_can_be_rewound() {
    let mut clock = Clock::new();
    clock.advance_total_time(100.0);
    clock.advance_total_time(50.0);
    assert_eq!(clock.total_time(), 150.0);

    clock.set_total_time(100.0);
    assert_eq!(clock.total_time(), 100.0);
}

#[test]
fn clock_counts_frames_per_second() {
    let mut clock = Clock::new();

    // 1/32 s frames sum exactly; the 33rd frame crosses one second
    for _ in 0..33 {
        clock.tick_with(0.03125);
        clock.record_frame();
        clock.record_updates(10);
    }

    assert_eq!(clock.fps(), 32);
    assert_eq!(clock.ups(), 320);
}
