//! # Neutronics Run
//!
//! Turns a validated [`neutronics_model::Model`] into files an engine can
//! read, drives the engine through a fixed-source or depletion run and
//! reads the scored tallies back.
//!
//! ## Example
//!
//! ```rust,no_run
//! use neutronics_run::{CommandEngine, SimulationDriver};
//! # fn run(model: neutronics_model::Model) -> Result<(), neutronics_run::DriverError> {
//! let mut driver = SimulationDriver::new(model);
//! driver.export("deck")?;
//! driver.run(&mut CommandEngine::new("transport"), None)?;
//! let result = driver.open_result()?;
//! let heating = result.get_tally("heating_on_3D_mesh")?;
//! neutronics_run::export_to_grid_format(heating, "heating.vtk")?;
//! # Ok(())
//! # }
//! ```

pub mod deck;
pub mod driver;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod results;

pub use deck::{Deck, DeckSettings};
pub use driver::{DriverState, RunOutcome, SimulationDriver};
pub use engine::{
    scale_rates, CommandEngine, DepletionSolver, Inventories, ReactionRates, TransportEngine,
    TransportSolution,
};
pub use error::{DriverError, EngineFault, ExportError, ResultError};
pub use integrator::{DepletionHistory, PredictorIntegrator, StepRecord};
pub use results::{export_to_grid_format, open_result, ResultHandle, StatePoint, TallyResult};
