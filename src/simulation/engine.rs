//! Simulation driver
//!
//! [`Simulation`] owns the bodies, the clock, the pause state and the
//! diagnostic histories. One [`Simulation::step`] call runs, in order:
//! collision pass → integrator → center of mass → adaptive dt →
//! conserved-quantity sample every [`SAMPLE_INTERVAL`] steps → clock advance.

use anyhow::{ensure, Result};
use log::{debug, info};

use super::diagnostics::{energy_drift_percent, ConservationStatus, ConservedQuantities, History};
use super::forces::NewtonianGravity;
use super::integrator::integrate;
use super::params::{IntegrationMethod, PhysicsSettings};
use super::states::{Body, CollisionEvent, NVec2};
use super::timestep::next_timestep;

/// Conserved quantities are sampled on every n-th step
pub const SAMPLE_INTERVAL: u64 = 10;

/// Bounds for the steps-per-frame multiplier used by [`Simulation::advance`]
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct Simulation {
    settings: PhysicsSettings,
    gravity: NewtonianGravity,
    bodies: Vec<Body>,
    initial: Vec<(NVec2, NVec2)>, // (x, v) at insertion, for restart()
    time: f64,
    steps: u64,
    paused: bool,
    dt: f64,
    speed_carry: f64,
    energy: History<f64>,
    momentum: History<f64>,
    angular_momentum: History<f64>,
    collisions: History<CollisionEvent>,
    com: NVec2,
    com_v: NVec2,
}

impl Simulation {
    /// Create an empty simulation with gravitational constant `g`
    pub fn new(settings: PhysicsSettings, g: f64) -> Result<Self> {
        settings.validate()?;
        ensure!(g.is_finite() && g > 0.0, "gravitational constant must be positive, got {g}");

        Ok(Self {
            gravity: NewtonianGravity::new(g, settings.softening, settings.collision_threshold),
            dt: settings.base_dt,
            settings,
            bodies: Vec::new(),
            initial: Vec::new(),
            time: 0.0,
            steps: 0,
            paused: false,
            speed_carry: 0.0,
            energy: History::default(),
            momentum: History::default(),
            angular_momentum: History::default(),
            collisions: History::default(),
            com: NVec2::zeros(),
            com_v: NVec2::zeros(),
        })
    }

    /// Append a body. Its slot is its insertion index
    pub fn add_body(&mut self, body: Body) -> Result<usize> {
        ensure!(
            body.m.is_finite() && body.m > 0.0,
            "body {:?} must have a positive mass, got {}",
            body.name,
            body.m
        );
        ensure!(
            body.x.iter().chain(body.v.iter()).all(|c| c.is_finite()),
            "body {:?} has a non-finite initial state",
            body.name
        );

        debug!("adding body {:?} (m = {}) at slot {}", body.name, body.m, self.bodies.len());
        self.initial.push((body.x, body.v));
        self.bodies.push(body);
        self.update_center_of_mass();
        Ok(self.bodies.len() - 1)
    }

    /// Advance one physics tick. No-op while paused
    pub fn step(&mut self) {
        if self.paused {
            return;
        }
        let dt = self.dt;

        self.gravity.detect_collisions(&mut self.bodies, self.time, &mut self.collisions);
        integrate(self.settings.method, &mut self.bodies, &self.gravity, dt);
        for b in self.bodies.iter_mut() {
            b.decay_collision(dt);
        }

        self.update_center_of_mass();

        if self.settings.adaptive_timestep {
            self.dt = next_timestep(&self.bodies, &self.settings, self.dt);
        }

        if self.settings.conservation_check && self.steps % SAMPLE_INTERVAL == 0 {
            self.sample_conserved();
        }

        self.time += dt;
        self.steps += 1;
    }

    /// Run one rendered frame's worth of steps at the given speed multiplier:
    /// the whole part of `speed` (at least one) plus an extra step each time
    /// the fractional parts add up to one
    pub fn advance(&mut self, speed: f64) -> usize {
        if self.paused {
            return 0;
        }
        let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        let mut n = (speed.trunc() as usize).max(1);

        self.speed_carry += speed.fract();
        if self.speed_carry >= 1.0 {
            self.speed_carry -= 1.0;
            n += 1;
        }

        for _ in 0..n {
            self.step();
        }
        n
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("simulation {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Clear the clock, dt, histories and collision state
    /// Bodies keep their current positions and velocities
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.steps = 0;
        self.dt = self.settings.base_dt;
        self.speed_carry = 0.0;
        self.energy.clear();
        self.momentum.clear();
        self.angular_momentum.clear();
        self.collisions.clear();
        for b in self.bodies.iter_mut() {
            b.collision_detected = false;
            b.collision_timer = 0.0;
        }
        info!("simulation reset at current body state");
    }

    /// [`reset`](Self::reset), then put every body back at its initial state
    /// and resume, as if the scenario had just been built
    pub fn restart(&mut self) {
        self.reset();
        self.paused = false;
        for (b, (x, v)) in self.bodies.iter_mut().zip(self.initial.iter()) {
            b.x = *x;
            b.v = *v;
            b.force = NVec2::zeros();
            b.acc = NVec2::zeros();
        }
        self.update_center_of_mass();
        info!("simulation restarted from initial conditions");
    }

    /// Totals for the current body state
    pub fn conserved_quantities(&self) -> ConservedQuantities {
        ConservedQuantities::measure(&self.bodies, self.gravity.g, self.settings.softening)
    }

    fn sample_conserved(&mut self) {
        if self.bodies.len() < 2 {
            return;
        }
        let q = self.conserved_quantities();
        self.energy.push(q.total_energy());
        self.momentum.push(q.momentum.norm());
        self.angular_momentum.push(q.angular_momentum.abs());
    }

    /// Mass-weighted mean position and velocity, recomputed from scratch
    fn update_center_of_mass(&mut self) {
        let total: f64 = self.bodies.iter().map(|b| b.m).sum();
        if self.bodies.is_empty() || total <= 0.0 {
            return;
        }
        let (mx, mv) = self
            .bodies
            .iter()
            .fold((NVec2::zeros(), NVec2::zeros()), |(mx, mv), b| (mx + b.m * b.x, mv + b.m * b.v));
        self.com = mx / total;
        self.com_v = mv / total;
    }

    pub fn energy_drift_percent(&self) -> f64 {
        energy_drift_percent(&self.energy)
    }

    pub fn conservation_status(&self) -> ConservationStatus {
        ConservationStatus::classify(self.energy_drift_percent())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Body at insertion slot `slot`, for follow-by-slot cameras
    pub fn body(&self, slot: usize) -> Option<&Body> {
        self.bodies.get(slot)
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    pub fn gravity(&self) -> &NewtonianGravity {
        &self.gravity
    }

    pub fn g(&self) -> f64 {
        self.gravity.g
    }

    pub fn method(&self) -> IntegrationMethod {
        self.settings.method
    }

    pub fn method_name(&self) -> &'static str {
        self.settings.method.name()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn center_of_mass(&self) -> NVec2 {
        self.com
    }

    pub fn center_of_mass_velocity(&self) -> NVec2 {
        self.com_v
    }

    pub fn energy_history(&self) -> &History<f64> {
        &self.energy
    }

    pub fn momentum_history(&self) -> &History<f64> {
        &self.momentum
    }

    pub fn angular_momentum_history(&self) -> &History<f64> {
        &self.angular_momentum
    }

    pub fn collision_events(&self) -> &History<CollisionEvent> {
        &self.collisions
    }
}
