//! Build fully-initialized simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime
//! [`Simulation`] with its bodies, `G` and validated physics settings.
//! The built-in [`Preset`]s are plain `ScenarioConfig` values fed through
//! the same path, so a preset and its YAML twin build identical states.

use anyhow::{Context, Result};
use log::debug;

use crate::configuration::config::{BodyConfig, PhysicsConfig, ScenarioConfig};
use crate::simulation::engine::Simulation;
use crate::simulation::states::{Body, NVec2};

/// Build a simulation from a scenario description
pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Simulation> {
    let settings = cfg.physics.to_settings();
    let mut sim = Simulation::new(settings, cfg.g)
        .with_context(|| format!("invalid physics for scenario {:?}", cfg.name))?;

    // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
    for bc in &cfg.bodies {
        let body = Body::new(bc.name.clone(), bc.m, NVec2::new(bc.x[0], bc.x[1]), NVec2::new(bc.v[0], bc.v[1]))
            .with_look(bc.radius, bc.color);
        sim.add_body(body)
            .with_context(|| format!("invalid body in scenario {:?}", cfg.name))?;
    }

    debug!(
        "built scenario {:?}: {} bodies, G = {}, {} at dt = {}",
        cfg.name,
        sim.bodies().len(),
        sim.g(),
        sim.method_name(),
        sim.dt()
    );
    Ok(sim)
}

/// The built-in initial conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Three equal unit masses on the periodic figure-eight orbit
    FigureEight,
    /// Heavy star, planet and moon
    SolarSystem,
    /// Two unequal stars with a light captured planet
    BinaryCapture,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::FigureEight, Preset::SolarSystem, Preset::BinaryCapture];

    pub fn name(self) -> &'static str {
        match self {
            Preset::FigureEight => "Enhanced Figure-8",
            Preset::SolarSystem => "Solar System",
            Preset::BinaryCapture => "Binary Capture",
        }
    }

    /// Preset bound to a number key ('1', '2', '3')
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Preset::FigureEight),
            '2' => Some(Preset::SolarSystem),
            '3' => Some(Preset::BinaryCapture),
            _ => None,
        }
    }

    pub fn build(self) -> Result<Simulation> {
        build_scenario(&self.config())
    }

    pub fn config(self) -> ScenarioConfig {
        match self {
            Preset::FigureEight => ScenarioConfig {
                name: self.name().into(),
                g: 1.0,
                physics: physics("RK4", 0.0008),
                bodies: vec![
                    body("Alpha", 1.0, [-0.97000436, 0.24208753], [0.4662036850, 0.4323657300], 6.0, [255, 80, 80]),
                    body("Beta", 1.0, [-0.97000436, -0.24208753], [0.4662036850, -0.4323657300], 6.0, [80, 255, 80]),
                    body("Gamma", 1.0, [0.97000436, 0.0], [-0.93240737, 0.0], 6.0, [80, 80, 255]),
                ],
            },
            Preset::SolarSystem => ScenarioConfig {
                name: self.name().into(),
                g: 10.0,
                physics: physics("Leapfrog", 0.001),
                bodies: vec![
                    body("Sun", 333_000.0, [0.0, 0.0], [0.0, 0.0], 12.0, [255, 255, 100]),
                    body("Earth", 1.0, [4.0, 0.0], [0.0, 3.2], 4.0, [80, 150, 255]),
                    body("Moon", 0.012, [4.3, 0.0], [0.0, 4.1], 2.0, [200, 200, 200]),
                ],
            },
            Preset::BinaryCapture => ScenarioConfig {
                name: self.name().into(),
                g: 8.0,
                physics: physics("RK4", 0.0005),
                bodies: vec![
                    body("Star A", 50.0, [-1.5, 0.0], [0.0, 2.0], 8.0, [255, 200, 100]),
                    body("Star B", 30.0, [2.5, 0.0], [0.0, -3.3], 6.0, [100, 200, 255]),
                    body("Planet", 1.0, [0.0, 4.0], [1.8, 0.0], 3.0, [150, 255, 150]),
                ],
            },
        }
    }
}

fn physics(method: &str, base_dt: f64) -> PhysicsConfig {
    PhysicsConfig {
        integration_method: Some(method.into()),
        adaptive_timestep: Some(true),
        base_dt: Some(base_dt),
        ..PhysicsConfig::default()
    }
}

fn body(name: &str, m: f64, x: [f64; 2], v: [f64; 2], radius: f64, color: [u8; 3]) -> BodyConfig {
    BodyConfig {
        name: name.into(),
        x,
        v,
        m,
        radius,
        color,
    }
}
