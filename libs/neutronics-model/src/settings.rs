//! # Simulation Settings
//!
//! Batch and particle counts, the source list and the run mode. Defaults
//! are the fusion fixed-source settings: 500 batches of 100 000 particles
//! with photon transport enabled.

use crate::error::ModelError;
use crate::source::Source;
use config::constants::{DEFAULT_BATCHES, DEFAULT_PARTICLES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    #[default]
    FixedSource,
    /// Transport coupled with a depletion schedule
    Depletion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub batches: u32,
    pub particles: u64,
    pub sources: Vec<Source>,
    pub run_mode: RunMode,
    pub photon_transport: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            batches: DEFAULT_BATCHES,
            particles: DEFAULT_PARTICLES,
            sources: Vec::new(),
            run_mode: RunMode::FixedSource,
            photon_transport: true,
        }
    }
}

impl SimulationSettings {
    pub fn batches(mut self, batches: u32) -> Self {
        self.batches = batches;
        self
    }

    pub fn particles(mut self, particles: u64) -> Self {
        self.particles = particles;
        self
    }

    /// Appends a source.
    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    pub fn photon_transport(mut self, enabled: bool) -> Self {
        self.photon_transport = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.batches == 0 {
            return Err(ModelError::Settings("batches must be positive".into()));
        }
        if self.particles == 0 {
            return Err(ModelError::Settings("particles must be positive".into()));
        }
        if self.sources.is_empty() {
            return Err(ModelError::Settings("at least one source is required".into()));
        }
        Ok(())
    }

    /// Fraction of particles drawn from each source.
    pub fn source_weights(&self) -> Vec<f64> {
        let total: f64 = self.sources.iter().map(|s| s.strength).sum();
        self.sources.iter().map(|s| s.strength / total).collect()
    }
}
