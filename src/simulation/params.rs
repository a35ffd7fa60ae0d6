//! Numerical and physical parameters for the simulation
//!
//! `PhysicsSettings` holds the per-simulation settings, fixed at construction:
//! - integration method and adaptive timestep switch,
//! - base/min/max step sizes and the adaptive error tolerance,
//! - collision threshold and softening length,
//! - whether conserved quantities are sampled

use anyhow::{ensure, Result};
use log::warn;
use std::fmt;

/// Which integrator advances the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationMethod {
    /// Classical 4th-order Runge–Kutta. Accurate per step, not symplectic
    #[default]
    Rk4,
    /// Kick-drift-kick leapfrog. 2nd order, symplectic
    Leapfrog,
}

impl IntegrationMethod {
    /// Parse a method name. Unknown names fall back to RK4
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "rk4" => Self::Rk4,
            "leapfrog" | "verlet" => Self::Leapfrog,
            other => {
                warn!("unknown integration method {other:?}, falling back to RK4");
                Self::Rk4
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rk4 => "RK4",
            Self::Leapfrog => "Leapfrog",
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsSettings {
    pub method: IntegrationMethod,
    pub adaptive_timestep: bool,
    pub base_dt: f64, // initial step size
    pub min_dt: f64, // adaptive lower bound
    pub max_dt: f64, // adaptive upper bound
    pub error_tolerance: f64, // adaptive target, dt = sqrt(tol / a_max)
    pub collision_threshold: f64, // unsoftened separation that flags a collision
    pub softening: f64, // softening length epsilon
    pub conservation_check: bool, // sample energy/momentum every 10th step
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            method: IntegrationMethod::Rk4,
            adaptive_timestep: true,
            base_dt: 0.0005,
            min_dt: 0.0001,
            max_dt: 0.002,
            error_tolerance: 1e-8,
            collision_threshold: 0.05,
            softening: 0.01,
            conservation_check: true,
        }
    }
}

impl PhysicsSettings {
    /// Check the step bounds and lengths are usable
    pub fn validate(&self) -> Result<()> {
        let all = [
            self.base_dt,
            self.min_dt,
            self.max_dt,
            self.error_tolerance,
            self.collision_threshold,
            self.softening,
        ];
        ensure!(all.iter().all(|v| v.is_finite()), "physics settings must be finite: {self:?}");
        ensure!(self.min_dt > 0.0, "min_dt must be positive, got {}", self.min_dt);
        ensure!(
            self.min_dt <= self.base_dt && self.base_dt <= self.max_dt,
            "expected min_dt <= base_dt <= max_dt, got {} / {} / {}",
            self.min_dt,
            self.base_dt,
            self.max_dt
        );
        ensure!(self.softening >= 0.0, "softening must be >= 0, got {}", self.softening);
        ensure!(
            self.collision_threshold >= 0.0,
            "collision_threshold must be >= 0, got {}",
            self.collision_threshold
        );
        ensure!(self.error_tolerance > 0.0, "error_tolerance must be positive");
        if self.softening == 0.0 {
            warn!("softening is zero, coincident bodies will produce infinite forces");
        }
        Ok(())
    }
}
