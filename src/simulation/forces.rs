//! Softened Newtonian gravity for the point-mass engine
//!
//! Two views of the same force law:
//! - [`Acceleration`] is the O(n²) kernel the integrators call at every
//!   substep, working on plain position/mass slices so RK4 can evaluate
//!   hypothetical states without touching the bodies
//! - [`NewtonianGravity::pair_force`] / [`NewtonianGravity::apply_forces`]
//!   work on live bodies and raise collision flags for close pairs

use log::trace;

use crate::simulation::diagnostics::History;
use crate::simulation::states::{Body, CollisionEvent, NVec2};

/// Acceleration sources operating on a set of positions and masses
/// Implementations overwrite `out[i]` with the total acceleration of body i
pub trait Acceleration {
    fn acceleration(&self, x: &[NVec2], m: &[f64], out: &mut [NVec2]);
}

/// 2D Newtonian gravity with softening
/// r² = |dx|² + ε², so the force stays finite as long as ε > 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub eps2: f64, // softening length squared
    pub collision_threshold: f64, // unsoftened separation for a collision
}

impl NewtonianGravity {
    pub fn new(g: f64, softening: f64, collision_threshold: f64) -> Self {
        Self {
            g,
            eps2: softening * softening,
            collision_threshold,
        }
    }

    /// Force exerted on `bi` by `bj`: G·mi·mj / r² along (xj - xi) / r
    pub fn pair_force(&self, bi: &Body, bj: &Body) -> NVec2 {
        let r = bj.x - bi.x;
        let d2 = r.norm_squared() + self.eps2;
        let inv_d = d2.sqrt().recip();
        let magnitude = self.g * (bi.m * bj.m) / d2;
        magnitude * inv_d * r
    }

    /// Force on `bodies[i]` from `bodies[j]`, flagging both bodies and logging
    /// an event when their unsoftened separation is below the threshold
    pub fn interact(
        &self,
        bodies: &mut [Body],
        i: usize,
        j: usize,
        t: f64,
        events: &mut History<CollisionEvent>,
    ) -> NVec2 {
        let force = self.pair_force(&bodies[i], &bodies[j]);
        self.check_collision(bodies, i, j, t, events);
        force
    }

    /// Flag `bodies[i]` and `bodies[j]` and log one event if they are closer
    /// than the collision threshold. Returns whether they were
    pub fn check_collision(
        &self,
        bodies: &mut [Body],
        i: usize,
        j: usize,
        t: f64,
        events: &mut History<CollisionEvent>,
    ) -> bool {
        let separation = (bodies[j].x - bodies[i].x).norm();
        if separation >= self.collision_threshold {
            return false;
        }

        let (bi, bj) = pair_mut(bodies, i, j);
        bi.flag_collision();
        bj.flag_collision();
        trace!("collision at t = {t:.5}: {} / {} (r = {separation:.5})", bi.name, bj.name);
        events.push(CollisionEvent {
            t,
            first: bi.name.clone(),
            second: bj.name.clone(),
        });
        true
    }

    /// Collision pass over every unordered pair, without touching forces
    pub fn detect_collisions(&self, bodies: &mut [Body], t: f64, events: &mut History<CollisionEvent>) -> usize {
        let n = bodies.len();
        let mut hits = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if self.check_collision(bodies, i, j, t, events) {
                    hits += 1;
                }
            }
        }
        hits
    }

    /// Recompute the net force on every body from the current positions
    /// Each unordered pair is evaluated once and applied equal and opposite
    pub fn apply_forces(&self, bodies: &mut [Body], t: f64, events: &mut History<CollisionEvent>) {
        for b in bodies.iter_mut() {
            b.force = NVec2::zeros();
        }

        let n = bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let f = self.interact(bodies, i, j, t, events);
                bodies[i].force += f;
                bodies[j].force -= f;
            }
        }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, x: &[NVec2], m: &[f64], out: &mut [NVec2]) {
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }

        let n = x.len();
        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                // r is the displacement vector from i to j
                // i feels a pull along +r, j feels a pull along -r
                let r = x[j] - x[i];

                // Softened squared distance: d2 = |r|^2 + eps^2
                // Stays positive for coincident bodies as long as eps > 0
                let d2 = r.norm_squared() + self.eps2;

                // 1 / |r_soft|, then 1 / |r_soft|^3 as in a = G m r / |r|^3
                let inv_d = d2.sqrt().recip();
                let inv_d3 = inv_d * inv_d * inv_d;

                // coef = G / |r_soft|^3, shared by both sides of the pair
                let coef = self.g * inv_d3;

                // a_i +=  G * m_j * r / |r_soft|^3  (toward j)
                // a_j += -G * m_i * r / |r_soft|^3  (toward i)
                out[i] += coef * m[j] * r;
                out[j] -= coef * m[i] * r;
            }
        }
    }
}

/// Borrow two distinct bodies mutably
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i != j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
