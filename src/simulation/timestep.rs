//! Adaptive timestep control.
//!
//! A cheap stiffness proxy rather than an error estimator: the next step is
//! sized from the peak acceleration the integrator last recorded,
//!
//! ```text
//! dt_next = clamp(sqrt(tolerance / max|a|), min_dt, max_dt)
//! ```
//!
//! Steps are never rejected or retried.

use super::params::PhysicsSettings;
use super::states::Body;

/// Largest recorded acceleration magnitude across `bodies`
pub fn max_acceleration(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.acc.norm()).fold(0.0, f64::max)
}

/// Propose the next step size. A zero peak acceleration leaves `current` as is
pub fn next_timestep(bodies: &[Body], settings: &PhysicsSettings, current: f64) -> f64 {
    let a_max = max_acceleration(bodies);
    if a_max > 0.0 {
        (settings.error_tolerance / a_max)
            .sqrt()
            .clamp(settings.min_dt, settings.max_dt)
    } else {
        current
    }
}
