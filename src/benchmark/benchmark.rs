use std::time::Instant;
use crate::simulation::states::{Body, BodyKind, System, NVec2};
use crate::simulation::params::{Parameters, AU_METERS};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::advance_frame;
use crate::configuration::config::IntegratorConfig;

/// Helper to build a star with `n - 1` planets on roughly circular orbits
fn make_system(n: usize) -> System {
    let star_mass = 1.9885e30;
    let mut bodies = Vec::with_capacity(n);

    bodies.push(Body {
        name: "star".to_string(),
        kind: BodyKind::Star,
        x: NVec2::zeros(),
        v: NVec2::zeros(),
        m: star_mass,
        rotation_period: 0,
        rotation: 0.0,
    });

    for i in 1..n {
        let i_f = i as f64;
        // deterministic placement, no rand needed
        let r = 0.4 + 0.7 * i_f;
        let angle = i_f * 2.39996;
        let v_circ = (crate::simulation::params::G * star_mass / (r * AU_METERS)).sqrt();

        bodies.push(Body {
            name: format!("planet-{i}"),
            kind: BodyKind::Planet,
            x: NVec2::new(r * angle.cos(), r * angle.sin()),
            v: NVec2::new(-v_circ * angle.sin(), v_circ * angle.cos()),
            m: 5.0e24,
            rotation_period: 86_400,
            rotation: 0.0,
        });
    }

    System::new(bodies)
}

/// Time one sub-stepped frame for a range of body counts and both integrators
pub fn bench_substeps() {
    let ns = [2, 5, 10, 20, 40];
    let frames = 5; // frames per measurement
    let frame_dt = 86_400.0; // one simulated day per frame

    println!("N,euler_ms_per_frame,verlet_ms_per_frame");

    for n in ns {
        let template = make_system(n);

        let mut row = Vec::with_capacity(2);
        for method in [IntegratorConfig::SymplecticEuler, IntegratorConfig::Verlet] {
            let params = Parameters {
                integrator: method,
                ..Parameters::default()
            };
            let forces = AccelSet::new().with(NewtonianGravity {
                G: params.G,
                au_meters: params.au_meters,
            });
            let mut sys = template.clone();

            // Warm up
            advance_frame(&mut sys, &forces, &params, frame_dt);

            let t0 = Instant::now();
            for _ in 0..frames {
                advance_frame(&mut sys, &forces, &params, frame_dt);
            }
            row.push(t0.elapsed().as_secs_f64() * 1000.0 / frames as f64);
        }

        println!("{},{:.4},{:.4}", n, row[0], row[1]);
    }
}
