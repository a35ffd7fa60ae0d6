use std::time::Instant;

use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::{leapfrog_step, rk4_step};
use crate::simulation::states::{Body, NVec2};

/// Helper to build a manual body set of size `n`
fn make_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec2::new((i_f * 0.37).sin() * 5.0, (i_f * 0.13).cos() * 5.0);
            let v = NVec2::new(-(i_f * 0.21).cos(), (i_f * 0.29).sin());
            Body::new(format!("b{i}"), 1.0, x, v)
        })
        .collect()
}

/// Time RK4 against leapfrog for 2..=10 bodies
/// Paste output directly into a spreadsheet to graph
pub fn bench_integrators() {
    let steps = 20_000;
    let gravity = NewtonianGravity::new(1.0, 0.01, 0.05);
    let dt = 0.0005;

    println!("N,rk4_us,leapfrog_us");

    for n in 2..=10 {
        let template = make_bodies(n);

        let mut bodies = template.clone();
        let t0 = Instant::now();
        for _ in 0..steps {
            rk4_step(&mut bodies, &gravity, dt);
        }
        let rk4_us = t0.elapsed().as_secs_f64() * 1e6 / steps as f64;

        let mut bodies = template;
        let t1 = Instant::now();
        for _ in 0..steps {
            leapfrog_step(&mut bodies, &gravity, dt);
        }
        let leapfrog_us = t1.elapsed().as_secs_f64() * 1e6 / steps as f64;

        println!("{},{:.3},{:.3}", n, rk4_us, leapfrog_us);
    }
}
