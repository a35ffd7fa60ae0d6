pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, CollisionEvent, NVec2};
pub use simulation::params::{IntegrationMethod, PhysicsSettings};
pub use simulation::forces::{Acceleration, NewtonianGravity};
pub use simulation::integrator::{integrate, leapfrog_step, rk4_step};
pub use simulation::diagnostics::{ConservationStatus, ConservedQuantities, History};
pub use simulation::engine::Simulation;
pub use simulation::scenario::{build_scenario, Preset};

pub use configuration::config::{BodyConfig, PhysicsConfig, ScenarioConfig};

pub use benchmark::benchmark::bench_integrators;
