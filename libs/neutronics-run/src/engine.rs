//! # Engine Seams
//!
//! Transport and depletion physics live outside this workspace. The
//! driver talks to them through two traits: [`TransportEngine`] turns a
//! deck plus material inventories into a result file and reaction rates,
//! [`DepletionSolver`] advances inventories over one time step.
//!
//! [`CommandEngine`] runs an external transport executable in the deck
//! directory.

use crate::deck::Deck;
use crate::error::EngineFault;
use config::constants::{INVENTORIES_FILE_NAME, REACTION_RATES_FILE_NAME};
use neutronics_model::{DepletionStep, Inventory, ReactionChain};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Atom inventories keyed by volume tag.
pub type Inventories = BTreeMap<String, Inventory>;

/// Reaction rates keyed by volume tag, then element symbol. Transport
/// returns them per source particle and per atom.
pub type ReactionRates = BTreeMap<String, BTreeMap<String, f64>>;

/// What one transport calculation leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSolution {
    pub statepoint: PathBuf,
    pub reaction_rates: ReactionRates,
}

pub trait TransportEngine {
    /// Runs one transport calculation for `deck` using `inventories` as the
    /// composition of the depletable materials.
    fn solve(&mut self, deck: &Deck, inventories: &Inventories) -> Result<TransportSolution, EngineFault>;
}

pub trait DepletionSolver {
    /// Returns the inventories at the end of `step`. `rates` are already
    /// scaled to reactions per atom per second.
    fn advance(
        &mut self,
        chain: &ReactionChain,
        inventories: &Inventories,
        rates: &ReactionRates,
        step: &DepletionStep,
    ) -> Result<Inventories, EngineFault>;
}

/// Multiplies every rate by `factor`.
pub fn scale_rates(rates: &ReactionRates, factor: f64) -> ReactionRates {
    rates
        .iter()
        .map(|(tag, by_element)| {
            let scaled = by_element.iter().map(|(e, r)| (e.clone(), r * factor)).collect();
            (tag.clone(), scaled)
        })
        .collect()
}

/// External transport executable.
///
/// Inventories are written to `inventories.json` in the deck directory
/// before the program starts, and output left by an earlier solve is
/// removed. After a zero exit the program must have written the
/// statepoint file; `reaction_rates.json` is optional.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl TransportEngine for CommandEngine {
    fn solve(&mut self, deck: &Deck, inventories: &Inventories) -> Result<TransportSolution, EngineFault> {
        let statepoint = deck.statepoint_path();
        let rates_path = deck.dir().join(REACTION_RATES_FILE_NAME);
        remove_stale(&statepoint)?;
        remove_stale(&rates_path)?;
        write_inventories(&deck.dir().join(INVENTORIES_FILE_NAME), inventories)?;

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(deck.dir())
            .output()
            .map_err(|source| EngineFault::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(EngineFault::Exit {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !statepoint.is_file() {
            return Err(EngineFault::MissingOutput(statepoint));
        }

        let reaction_rates = if rates_path.is_file() {
            read_rates(&rates_path)?
        } else {
            ReactionRates::new()
        };

        Ok(TransportSolution {
            statepoint,
            reaction_rates,
        })
    }
}

fn remove_stale(path: &Path) -> Result<(), EngineFault> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(EngineFault::Internal(format!("cannot remove {}: {e}", path.display()))),
    }
}

fn write_inventories(path: &Path, inventories: &Inventories) -> Result<(), EngineFault> {
    let io = |e: std::io::Error| EngineFault::Internal(format!("cannot write {}: {e}", path.display()));
    let file = File::create(path).map_err(io)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, inventories).map_err(|source| EngineFault::Output {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io)
}

fn read_rates(path: &Path) -> Result<ReactionRates, EngineFault> {
    let file = File::open(path).map_err(|_| EngineFault::MissingOutput(path.to_path_buf()))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| EngineFault::Output {
        path: path.to_path_buf(),
        source,
    })
}
