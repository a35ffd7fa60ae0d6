//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`PhysicsConfig`]  – integrator and step-size settings, every field optional
//! - [`BodyConfig`]     – initial state (and display look) of each body
//! - [`ScenarioConfig`] – top-level wrapper with the name and constant `G`
//!
//! # YAML format
//!
//! ```yaml
//! name: "Figure-8"
//! G: 1.0
//!
//! physics:
//!   integration_method: "RK4"   # or "Leapfrog"; anything else falls back to RK4
//!   adaptive_timestep: true
//!   base_dt: 0.0008
//!   min_dt: 0.0001
//!   max_dt: 0.002
//!   collision_threshold: 0.05
//!   softening: 0.01
//!
//! bodies:
//!   - name: Alpha
//!     x: [ -0.97000436, 0.24208753 ]
//!     v: [ 0.466203685, 0.43236573 ]
//!     m: 1.0
//!     radius: 6
//!     color: [ 255, 80, 80 ]
//! ```
//!
//! Missing physics fields take the values of `PhysicsSettings::default()`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::simulation::params::{IntegrationMethod, PhysicsSettings};

/// Optional overrides for [`PhysicsSettings`]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PhysicsConfig {
    pub integration_method: Option<String>,
    pub adaptive_timestep: Option<bool>,
    pub base_dt: Option<f64>,
    pub min_dt: Option<f64>,
    pub max_dt: Option<f64>,
    pub error_tolerance: Option<f64>,
    pub collision_threshold: Option<f64>,
    pub softening: Option<f64>,
    pub conservation_check: Option<bool>,
}

impl PhysicsConfig {
    /// Fill the gaps from the defaults. Not validated here
    pub fn to_settings(&self) -> PhysicsSettings {
        let d = PhysicsSettings::default();
        PhysicsSettings {
            method: self
                .integration_method
                .as_deref()
                .map(IntegrationMethod::from_name)
                .unwrap_or(d.method),
            adaptive_timestep: self.adaptive_timestep.unwrap_or(d.adaptive_timestep),
            base_dt: self.base_dt.unwrap_or(d.base_dt),
            min_dt: self.min_dt.unwrap_or(d.min_dt),
            max_dt: self.max_dt.unwrap_or(d.max_dt),
            error_tolerance: self.error_tolerance.unwrap_or(d.error_tolerance),
            collision_threshold: self.collision_threshold.unwrap_or(d.collision_threshold),
            softening: self.softening.unwrap_or(d.softening),
            conservation_check: self.conservation_check.unwrap_or(d.conservation_check),
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub x: [f64; 2], // initial position
    pub v: [f64; 2], // initial velocity
    pub m: f64, // mass, must be positive
    #[serde(default = "default_radius")]
    pub radius: f64, // display radius
    #[serde(default = "default_color")]
    pub color: [u8; 3], // display color
}

fn default_radius() -> f64 {
    5.0
}

fn default_color() -> [u8; 3] {
    [255, 255, 255]
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    #[serde(default)]
    pub physics: PhysicsConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("failed to parse scenario YAML")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("failed to open scenario {}", path.display()))?;
        serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }
}
