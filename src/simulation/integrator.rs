//! Fixed-step time integrators for the point-mass system
//!
//! Provides classical RK4 and a kick-drift-kick leapfrog, both driven by an
//! [`Acceleration`] kernel. Each step leaves the start-of-step acceleration
//! in `Body::acc` (and `m * acc` in `Body::force`) for the adaptive timestep
//! controller and diagnostics.
//! Fewer than two bodies means no forces, so both steps no-op.

use nalgebra::DVector;

use super::forces::Acceleration;
use super::params::IntegrationMethod;
use super::states::{Body, NVec2};

/// Advance `bodies` by `dt` with the selected method
pub fn integrate<A: Acceleration + ?Sized>(method: IntegrationMethod, bodies: &mut [Body], forces: &A, dt: f64) {
    match method {
        IntegrationMethod::Rk4 => rk4_step(bodies, forces, dt),
        IntegrationMethod::Leapfrog => leapfrog_step(bodies, forces, dt),
    }
}

/// Advance by one step using velocity–Verlet (kick-drift-kick)
/// Two force evaluations per step: once at x_n, once at x_n+1
pub fn leapfrog_step<A: Acceleration + ?Sized>(bodies: &mut [Body], forces: &A, dt: f64) {
    let n = bodies.len();
    if n < 2 {
        return;
    }

    let half_dt = 0.5 * dt;
    let m: Vec<f64> = bodies.iter().map(|b| b.m).collect();
    let mut x: Vec<NVec2> = bodies.iter().map(|b| b.x).collect();

    // a_n from x_n
    let mut a = vec![NVec2::zeros(); n];
    forces.acceleration(&x, &m, &mut a);

    // Kick: v_n+1/2 = v_n + (dt/2) a_n
    for (b, a) in bodies.iter_mut().zip(a.iter()) {
        b.acc = *a;
        b.force = b.m * *a;
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt v_n+1/2
    for (b, x) in bodies.iter_mut().zip(x.iter_mut()) {
        b.x += dt * b.v;
        *x = b.x;
    }

    // a_n+1 from x_n+1
    forces.acceleration(&x, &m, &mut a);

    // Kick: v_n+1 = v_n+1/2 + (dt/2) a_n+1
    for (b, a) in bodies.iter_mut().zip(a.iter()) {
        b.v += half_dt * *a;
    }
}

/// Advance by one step using classical 4th-order Runge–Kutta
///
/// The state vector is (x, y, vx, vy) per body in insertion order. The
/// intermediate stages only evaluate accelerations at hypothetical positions;
/// bodies are written once, after the final combination.
pub fn rk4_step<A: Acceleration + ?Sized>(bodies: &mut [Body], forces: &A, dt: f64) {
    let n = bodies.len();
    if n < 2 {
        return;
    }

    let m: Vec<f64> = bodies.iter().map(|b| b.m).collect();
    let state = pack_state(bodies);
    let mut eval = Derivatives::new(n);

    let k1 = eval.at(&state, &m, forces);
    let a1 = eval.a.clone();
    let k2 = eval.at(&(&state + (0.5 * dt) * &k1), &m, forces);
    let k3 = eval.at(&(&state + (0.5 * dt) * &k2), &m, forces);
    let k4 = eval.at(&(&state + dt * &k3), &m, forces);

    let next = state + (dt / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4);

    for (i, (b, a)) in bodies.iter_mut().zip(a1).enumerate() {
        let s = 4 * i;
        b.x = NVec2::new(next[s], next[s + 1]);
        b.v = NVec2::new(next[s + 2], next[s + 3]);
        b.force = b.m * a;
        b.acc = a;
    }
}

fn pack_state(bodies: &[Body]) -> DVector<f64> {
    DVector::from_iterator(
        4 * bodies.len(),
        bodies.iter().flat_map(|b| [b.x.x, b.x.y, b.v.x, b.v.y]),
    )
}

/// Scratch buffers for evaluating d(state)/dt
struct Derivatives {
    x: Vec<NVec2>,
    a: Vec<NVec2>,
}

impl Derivatives {
    fn new(n: usize) -> Self {
        Self {
            x: vec![NVec2::zeros(); n],
            a: vec![NVec2::zeros(); n],
        }
    }

    /// dx/dt = v, dv/dt = a(x). Leaves the accelerations in `self.a`
    fn at<A: Acceleration + ?Sized>(&mut self, state: &DVector<f64>, m: &[f64], forces: &A) -> DVector<f64> {
        for (i, x) in self.x.iter_mut().enumerate() {
            *x = NVec2::new(state[4 * i], state[4 * i + 1]);
        }
        forces.acceleration(&self.x, m, &mut self.a);

        let mut out = DVector::zeros(state.len());
        for (i, a) in self.a.iter().enumerate() {
            let s = 4 * i;
            out[s] = state[s + 2];
            out[s + 1] = state[s + 3];
            out[s + 2] = a.x;
            out[s + 3] = a.y;
        }
        out
    }
}
