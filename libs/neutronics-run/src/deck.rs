//! # Deck
//!
//! The on-disk form of a [`Model`]: four JSON documents in one directory,
//! read by the transport engine. Export checks every cross-reference the
//! engine would otherwise trip over.
//!
//! ```text
//! <dir>/
//!   geometry.json    mesh path, tags, corners, vacuum boundary
//!   materials.json   one entry per tag
//!   settings.json    batches, particles, sources, run mode, schedule
//!   tallies.json     mesh tally requests
//! ```

use crate::engine::Inventories;
use crate::error::ExportError;
use config::constants::{
    statepoint_file_name, GEOMETRY_FILE_NAME, MATERIALS_FILE_NAME, SETTINGS_FILE_NAME,
    TALLIES_FILE_NAME,
};
use neutronics_model::{BoundMaterial, DagmcGeometry, DepletionSchedule, Model, SimulationSettings, TallySet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Contents of `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSettings {
    #[serde(flatten)]
    pub simulation: SimulationSettings,
    pub depletion: Option<DepletionSchedule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    dir: PathBuf,
    pub geometry: DagmcGeometry,
    pub materials: Vec<BoundMaterial>,
    pub settings: DeckSettings,
    pub tallies: TallySet,
}

impl Deck {
    /// Validates `model` and writes its deck into `dir`, creating the
    /// directory and replacing existing deck files.
    ///
    /// # Errors
    ///
    /// - `UnboundGeometryTag` when a geometry volume has no material
    /// - `UnknownMaterialTag` when a material is bound to a tag the
    ///   geometry lacks
    /// - `MissingMeshFile`, `MissingChain` for absent input files
    pub fn export(model: &Model, dir: impl AsRef<Path>) -> Result<Self, ExportError> {
        let dir = dir.as_ref();
        check_tags(model)?;

        let mesh_path = model.geometry.mesh_path();
        if !mesh_path.is_file() {
            return Err(ExportError::MissingMeshFile(mesh_path.to_path_buf()));
        }
        if let Some(schedule) = model.depletion() {
            if !schedule.chain().exists() {
                return Err(ExportError::MissingChain(schedule.chain().path().to_path_buf()));
            }
        }

        let deck = Self {
            dir: dir.to_path_buf(),
            geometry: model.geometry.clone(),
            materials: model.materials.entries().to_vec(),
            settings: DeckSettings {
                simulation: model.settings().clone(),
                depletion: model.depletion().cloned(),
            },
            tallies: model.tallies.clone(),
        };

        fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
        write_json(&dir.join(GEOMETRY_FILE_NAME), &deck.geometry)?;
        write_json(&dir.join(MATERIALS_FILE_NAME), &deck.materials)?;
        write_json(&dir.join(SETTINGS_FILE_NAME), &deck.settings)?;
        write_json(&dir.join(TALLIES_FILE_NAME), &deck.tallies)?;
        Ok(deck)
    }

    /// Reads a deck written by [`Deck::export`].
    pub fn read(dir: impl AsRef<Path>) -> Result<Self, ExportError> {
        let dir = dir.as_ref();
        Ok(Self {
            dir: dir.to_path_buf(),
            geometry: read_json(&dir.join(GEOMETRY_FILE_NAME))?,
            materials: read_json(&dir.join(MATERIALS_FILE_NAME))?,
            settings: read_json(&dir.join(SETTINGS_FILE_NAME))?,
            tallies: read_json(&dir.join(TALLIES_FILE_NAME))?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn batches(&self) -> u32 {
        self.settings.simulation.batches
    }

    /// Where the engine is expected to leave its result file.
    pub fn statepoint_path(&self) -> PathBuf {
        self.dir.join(statepoint_file_name(self.batches()))
    }

    pub fn depletion(&self) -> Option<&DepletionSchedule> {
        self.settings.depletion.as_ref()
    }

    /// Atom inventories of the depletable materials, keyed by tag.
    pub fn initial_inventories(&self) -> Inventories {
        self.materials
            .iter()
            .filter(|m| m.material.is_depletable())
            .filter_map(|m| m.material.atom_inventory().map(|inv| (m.tag.clone(), inv)))
            .collect()
    }
}

fn check_tags(model: &Model) -> Result<(), ExportError> {
    let geometry: BTreeSet<&str> = model.geometry.tags().iter().map(String::as_str).collect();
    let materials: BTreeSet<&str> = model.materials.tags().collect();

    let unbound: Vec<String> = model
        .geometry
        .tags()
        .iter()
        .filter(|tag| !materials.contains(tag.as_str()))
        .cloned()
        .collect();
    if !unbound.is_empty() {
        return Err(ExportError::UnboundGeometryTag(unbound));
    }

    let unknown: Vec<String> = model
        .materials
        .tags()
        .filter(|tag| !geometry.contains(tag))
        .map(str::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(ExportError::UnknownMaterialTag(unknown));
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| ExportError::format(path, e))?;
    writer.flush().map_err(|e| ExportError::io(path, e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ExportError> {
    let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| ExportError::format(path, e))
}
