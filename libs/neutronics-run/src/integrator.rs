//! # Predictor Integrator
//!
//! Explicit first-order depletion: each step runs one transport solve
//! with the start-of-step inventories, scales the per-source-particle
//! rates by the step's source rate and advances the inventories to the
//! end of the step. There is no corrector pass, so accuracy rests on the
//! step lengths the caller chose.

use crate::deck::Deck;
use crate::engine::{scale_rates, DepletionSolver, Inventories, ReactionRates, TransportEngine};
use crate::error::{EngineFault, ResultError};
use neutronics_model::DepletionSchedule;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Outcome of one depletion step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub start_time: f64,
    pub end_time: f64,
    pub source_rate: f64,
    pub statepoint: PathBuf,
    /// Reactions per atom per second
    pub reaction_rates: ReactionRates,
    /// Inventories at `end_time`
    pub inventories: Inventories,
}

/// Inventory history written to `depletion_results.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionHistory {
    pub chain: PathBuf,
    pub initial: Inventories,
    pub steps: Vec<StepRecord>,
}

impl DepletionHistory {
    /// Inventories after the last step.
    pub fn final_inventories(&self) -> &Inventories {
        self.steps.last().map_or(&self.initial, |s| &s.inventories)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ResultError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ResultError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ResultError::format(path, e))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ResultError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ResultError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| ResultError::format(path, e))?;
        writer.flush().map_err(|e| ResultError::io(path, e))
    }
}

pub struct PredictorIntegrator<'a> {
    schedule: &'a DepletionSchedule,
}

impl<'a> PredictorIntegrator<'a> {
    pub fn new(schedule: &'a DepletionSchedule) -> Self {
        Self { schedule }
    }

    /// Runs every step of the schedule, starting from `initial`.
    ///
    /// The first engine fault ends the run and is returned unchanged.
    pub fn integrate(
        &self,
        deck: &Deck,
        initial: Inventories,
        transport: &mut dyn TransportEngine,
        solver: &mut dyn DepletionSolver,
    ) -> Result<DepletionHistory, EngineFault> {
        let chain = self.schedule.chain();
        let mut current = initial.clone();
        let mut time = 0.0;
        let mut steps = Vec::with_capacity(self.schedule.steps().len());

        for step in self.schedule.steps() {
            let solution = transport.solve(deck, &current)?;
            let rates = scale_rates(&solution.reaction_rates, step.source_rate);
            let next = solver.advance(chain, &current, &rates, step)?;

            steps.push(StepRecord {
                start_time: time,
                end_time: time + step.duration,
                source_rate: step.source_rate,
                statepoint: solution.statepoint,
                reaction_rates: rates,
                inventories: next.clone(),
            });
            time += step.duration;
            current = next;
        }

        Ok(DepletionHistory {
            chain: chain.path().to_path_buf(),
            initial,
            steps,
        })
    }
}
