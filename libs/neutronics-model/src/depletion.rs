//! # Depletion Schedule
//!
//! Ordered irradiation steps and the external reaction-chain file. The
//! chain is opaque here: only its path travels with the model, and the
//! driver checks it exists before exporting.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One irradiation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepletionStep {
    /// Step length in seconds
    pub duration: f64,
    /// Source particles per second
    pub source_rate: f64,
}

/// Path to a reaction-chain file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionChain {
    path: PathBuf,
}

impl ReactionChain {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionSchedule {
    steps: Vec<DepletionStep>,
    chain: ReactionChain,
}

impl DepletionSchedule {
    /// Builds a schedule from `(duration, source_rate)` pairs.
    ///
    /// ```rust
    /// use neutronics_model::{DepletionSchedule, ReactionChain};
    /// use config::constants::SECONDS_PER_YEAR;
    ///
    /// let schedule = DepletionSchedule::new(
    ///     ReactionChain::new("chain_endfb71_pwr.xml"),
    ///     [(SECONDS_PER_YEAR, 1e9)],
    /// )?;
    /// assert_eq!(schedule.steps().len(), 1);
    /// # Ok::<(), neutronics_model::ModelError>(())
    /// ```
    pub fn new(
        chain: ReactionChain,
        steps: impl IntoIterator<Item = (f64, f64)>,
    ) -> Result<Self, ModelError> {
        let steps: Vec<DepletionStep> = steps
            .into_iter()
            .map(|(duration, source_rate)| DepletionStep {
                duration,
                source_rate,
            })
            .collect();
        if steps.is_empty() {
            return Err(ModelError::Schedule("no time steps".into()));
        }
        for (i, step) in steps.iter().enumerate() {
            if !(step.duration.is_finite() && step.duration > 0.0) {
                return Err(ModelError::Schedule(format!(
                    "step {i}: duration must be positive, got {}",
                    step.duration
                )));
            }
            if !(step.source_rate.is_finite() && step.source_rate >= 0.0) {
                return Err(ModelError::Schedule(format!(
                    "step {i}: source rate must be non-negative, got {}",
                    step.source_rate
                )));
            }
        }
        Ok(Self { steps, chain })
    }

    /// Builds a schedule from parallel lists of durations and source rates.
    pub fn from_lists(
        chain: ReactionChain,
        time_steps: &[f64],
        source_rates: &[f64],
    ) -> Result<Self, ModelError> {
        if time_steps.len() != source_rates.len() {
            return Err(ModelError::Schedule(format!(
                "{} time steps but {} source rates",
                time_steps.len(),
                source_rates.len()
            )));
        }
        Self::new(chain, time_steps.iter().copied().zip(source_rates.iter().copied()))
    }

    pub fn steps(&self) -> &[DepletionStep] {
        &self.steps
    }

    pub fn chain(&self) -> &ReactionChain {
        &self.chain
    }

    /// Cumulative time at the end of each step.
    pub fn end_times(&self) -> Vec<f64> {
        self.steps
            .iter()
            .scan(0.0, |t, step| {
                *t += step.duration;
                Some(*t)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::SECONDS_PER_YEAR;

    fn chain() -> ReactionChain {
        ReactionChain::new("chain_endfb71_pwr.xml")
    }

    #[test]
    fn test_one_year_step() {
        let schedule = DepletionSchedule::from_lists(chain(), &[SECONDS_PER_YEAR], &[1e9]).unwrap();
        assert_eq!(
            schedule.steps(),
            &[DepletionStep {
                duration: 31_536_000.0,
                source_rate: 1e9
            }]
        );
        assert_eq!(schedule.end_times(), vec![31_536_000.0]);
    }

    #[test]
    fn test_invalid_schedules() {
        assert!(DepletionSchedule::new(chain(), Vec::new()).is_err());
        assert!(DepletionSchedule::new(chain(), [(0.0, 1e9)]).is_err());
        assert!(DepletionSchedule::new(chain(), [(1.0, -1.0)]).is_err());
        assert!(DepletionSchedule::from_lists(chain(), &[1.0, 2.0], &[1e9]).is_err());
    }

    #[test]
    fn test_chain_existence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.xml");
        let chain = ReactionChain::new(&path);
        assert!(!chain.exists());
        std::fs::write(&path, "<depletion_chain/>").unwrap();
        assert!(chain.exists());
    }
}
