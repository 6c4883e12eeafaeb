//! # Simulation Driver
//!
//! Moves one [`Model`] through the run lifecycle:
//!
//! ```text
//! Configured ──export──▶ Exported ──run──▶ Running ──▶ Completed
//!      ▲          │                          │
//!      └──────────┘ (export errors)          └──▶ Failed (engine fault)
//! ```
//!
//! Every stage appends to a [`TraceDiagnostic`] log, starting with the
//! model's own findings.

use crate::deck::Deck;
use crate::engine::{DepletionSolver, TransportEngine};
use crate::error::DriverError;
use crate::integrator::PredictorIntegrator;
use crate::results::{open_result, ResultHandle};
use config::constants::DEPLETION_RESULTS_FILE_NAME;
use neutronics_model::{Model, RunMode};
use pipeline_types::{Diagnostic, Severity, Stage, TraceDiagnostic};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Configured,
    Exported,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverState::Configured => "configured",
            DriverState::Exported => "exported",
            DriverState::Running => "running",
            DriverState::Completed => "completed",
            DriverState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Artifacts of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub statepoint: PathBuf,
    pub depletion_results: Option<PathBuf>,
    pub transport_solves: usize,
    pub depletion_steps: usize,
}

pub struct SimulationDriver {
    model: Model,
    state: DriverState,
    deck: Option<Deck>,
    outcome: Option<RunOutcome>,
    trace: Vec<TraceDiagnostic>,
}

impl SimulationDriver {
    pub fn new(model: Model) -> Self {
        let trace = model.diagnostics().to_vec();
        Self {
            model,
            state: DriverState::Configured,
            deck: None,
            outcome: None,
            trace,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    pub fn trace(&self) -> &[TraceDiagnostic] {
        &self.trace
    }

    /// Writes the deck into `dir`. Allowed before a run; exporting again
    /// overwrites the previous deck.
    ///
    /// # Errors
    ///
    /// `Export` on unresolved references, leaving the state unchanged.
    pub fn export(&mut self, dir: impl AsRef<Path>) -> Result<&Deck, DriverError> {
        self.expect_state("export", &[DriverState::Configured, DriverState::Exported])?;
        let dir = dir.as_ref();

        let deck = match Deck::export(&self.model, dir) {
            Ok(deck) => deck,
            Err(e) => {
                self.record(Stage::Export, Diagnostic::new(Severity::Error, e.to_string()));
                return Err(e.into());
            }
        };
        self.trace.push(
            TraceDiagnostic::new(Stage::Export, Diagnostic::info("deck written"))
                .with_file(dir.display().to_string()),
        );
        self.state = DriverState::Exported;
        Ok(&*self.deck.insert(deck))
    }

    /// Runs the exported deck. Fixed-source models need only `transport`;
    /// depletion models also need `solver`.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless exported
    /// - `MissingSolver` for a depletion model without a solver
    /// - `Engine` with the fault exactly as the engine reported it; the
    ///   driver is then `Failed`
    pub fn run(
        &mut self,
        transport: &mut dyn TransportEngine,
        solver: Option<&mut dyn DepletionSolver>,
    ) -> Result<&RunOutcome, DriverError> {
        self.expect_state("run", &[DriverState::Exported])?;
        if self.model.run_mode() == RunMode::Depletion && solver.is_none() {
            return Err(DriverError::MissingSolver);
        }
        let Some(deck) = self.deck.take() else {
            return Err(DriverError::InvalidTransition {
                operation: "run",
                state: self.state,
            });
        };

        self.state = DriverState::Running;
        let result = self.execute(&deck, transport, solver);
        self.deck = Some(deck);

        match result {
            Ok(outcome) => {
                self.state = DriverState::Completed;
                Ok(&*self.outcome.insert(outcome))
            }
            Err(DriverError::Engine(fault)) => {
                self.state = DriverState::Failed;
                let stage = match self.model.run_mode() {
                    RunMode::Depletion => Stage::Depletion,
                    RunMode::FixedSource => Stage::Transport,
                };
                self.record(stage, Diagnostic::new(Severity::Error, fault.to_string()));
                Err(DriverError::Engine(fault))
            }
            Err(e) => {
                self.state = DriverState::Failed;
                self.record(Stage::Results, Diagnostic::new(Severity::Error, e.to_string()));
                Err(e)
            }
        }
    }

    /// Opens the result file of a completed run.
    pub fn open_result(&self) -> Result<ResultHandle, DriverError> {
        self.expect_state("open results", &[DriverState::Completed])?;
        let Some(deck) = self.deck.as_ref() else {
            return Err(DriverError::InvalidTransition {
                operation: "open results",
                state: self.state,
            });
        };
        Ok(open_result(deck.dir(), deck.batches())?)
    }

    fn execute(
        &mut self,
        deck: &Deck,
        transport: &mut dyn TransportEngine,
        solver: Option<&mut dyn DepletionSolver>,
    ) -> Result<RunOutcome, DriverError> {
        let initial = deck.initial_inventories();

        let (Some(schedule), Some(solver)) = (deck.depletion(), solver) else {
            let solution = transport.solve(deck, &initial)?;
            self.trace.push(
                TraceDiagnostic::new(Stage::Transport, Diagnostic::info("transport solve finished"))
                    .with_file(solution.statepoint.display().to_string()),
            );
            return Ok(RunOutcome {
                statepoint: solution.statepoint,
                depletion_results: None,
                transport_solves: 1,
                depletion_steps: 0,
            });
        };

        let history = PredictorIntegrator::new(schedule).integrate(deck, initial, transport, solver)?;
        let path = deck.dir().join(DEPLETION_RESULTS_FILE_NAME);
        history.write(&path)?;
        for (i, step) in history.steps.iter().enumerate() {
            self.trace.push(
                TraceDiagnostic::new(
                    Stage::Depletion,
                    Diagnostic::info(format!(
                        "step {} of {} advanced to t = {} s",
                        i + 1,
                        history.steps.len(),
                        step.end_time
                    )),
                )
                .with_file(step.statepoint.display().to_string()),
            );
        }

        let steps = history.steps.len();
        Ok(RunOutcome {
            statepoint: deck.statepoint_path(),
            depletion_results: Some(path),
            transport_solves: steps,
            depletion_steps: steps,
        })
    }

    fn expect_state(&self, operation: &'static str, allowed: &[DriverState]) -> Result<(), DriverError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(DriverError::InvalidTransition {
                operation,
                state: self.state,
            })
        }
    }

    fn record(&mut self, stage: Stage, diagnostic: Diagnostic) {
        self.trace.push(TraceDiagnostic::new(stage, diagnostic));
    }
}
