//! Core state types for the three-body simulation.
//!
//! Defines the 2D point-mass `Body` and the `CollisionEvent` record:
//! - `Body` holds kinematic state (`x`, `v`), mass, the force/acceleration
//!   last recorded by an integrator, and the collision flag with its timer
//! - `radius` and `color` are display-only and never touch the physics

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Time (simulated) after which a raised collision flag clears itself
pub const COLLISION_DECAY: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub force: NVec2, // net force at the start of the last step
    pub acc: NVec2, // acceleration recorded by the integrator
    pub radius: f64, // display radius
    pub color: [u8; 3], // display color
    pub collision_detected: bool,
    pub collision_timer: f64,
}

impl Body {
    pub fn new(name: impl Into<String>, m: f64, x: NVec2, v: NVec2) -> Self {
        Self {
            name: name.into(),
            x,
            v,
            m,
            force: NVec2::zeros(),
            acc: NVec2::zeros(),
            radius: 5.0,
            color: [255, 255, 255],
            collision_detected: false,
            collision_timer: 0.0,
        }
    }

    /// Attach display radius and color
    pub fn with_look(mut self, radius: f64, color: [u8; 3]) -> Self {
        self.radius = radius;
        self.color = color;
        self
    }

    pub fn speed(&self) -> f64 {
        self.v.norm()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn momentum(&self) -> NVec2 {
        self.m * self.v
    }

    /// Raise the collision flag. A flag that is already up keeps its timer
    pub fn flag_collision(&mut self) {
        self.collision_detected = true;
    }

    /// Advance the collision decay timer by `dt`, clearing the flag once
    /// it has been up for longer than [`COLLISION_DECAY`]
    pub fn decay_collision(&mut self, dt: f64) {
        if !self.collision_detected {
            return;
        }
        self.collision_timer += dt;
        if self.collision_timer > COLLISION_DECAY {
            self.collision_detected = false;
            self.collision_timer = 0.0;
        }
    }
}

/// A close encounter between two bodies, logged at simulated time `t`
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    pub t: f64,
    pub first: String,
    pub second: String,
}
