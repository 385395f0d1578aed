//! Settings management

use anyhow::{Context, Result};
use ember_core::WorldConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldConfig,
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Steps to run before exiting.
    pub frames: u64,
    /// Entities spawned into the demo scene.
    pub scene_size: usize,
    /// Log frame and system timings every this many frames (0 disables).
    pub report_every: u64,
    /// Fraction of velocity lost per second.
    pub drag: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frames: 600,
            scene_size: 1000,
            report_every: 120,
            drag: 0.1,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
