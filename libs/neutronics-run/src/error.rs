//! # Run Errors
//!
//! Errors raised while exporting a deck, running the engines and reading
//! results back. Engine faults are passed through unchanged: nothing here
//! retries or falls back.

use crate::driver::DriverState;
use std::path::PathBuf;
use thiserror::Error;

/// Deck export failures: unresolved references or file I/O.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Geometry volumes without a material
    #[error("Geometry tags without a material: {}", .0.join(", "))]
    UnboundGeometryTag(Vec<String>),

    /// Materials bound to tags the geometry does not contain
    #[error("Material tags missing from the geometry: {}", .0.join(", "))]
    UnknownMaterialTag(Vec<String>),

    #[error("Volume mesh file {0} does not exist")]
    MissingMeshFile(PathBuf),

    #[error("Reaction chain file {0} does not exist")]
    MissingChain(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed deck file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reported by a transport or depletion engine.
#[derive(Debug, Error)]
pub enum EngineFault {
    #[error("Failed to start engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Engine '{program}' exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },

    /// The engine finished without writing an expected file
    #[error("Engine output {0} is missing")]
    MissingOutput(PathBuf),

    #[error("Malformed engine output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Fault raised inside an in-process engine
    #[error("Engine fault: {0}")]
    Internal(String),
}

/// Result file lookup and conversion failures.
#[derive(Debug, Error)]
pub enum ResultError {
    #[error("Result file {0} does not exist")]
    NotFound(PathBuf),

    #[error("No tally named '{name}' (available: {})", .available.join(", "))]
    NameNotFound { name: String, available: Vec<String> },

    /// Value arrays do not match the tally resolution
    #[error("Tally '{name}' has {found} values, expected {expected}")]
    Shape {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Zero or overflowing mesh resolution
    #[error("Tally '{name}' has invalid resolution {resolution:?}")]
    Resolution { name: String, resolution: [u32; 3] },

    #[error("Malformed result file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write VTK file {path}: {source}")]
    Vtk {
        path: PathBuf,
        #[source]
        source: vtkio::Error,
    },
}

/// Errors returned by [`crate::SimulationDriver`].
#[derive(Debug, Error)]
pub enum DriverError {
    /// Operation not allowed in the current state
    #[error("Cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: DriverState,
    },

    /// Depletion runs need a depletion solver
    #[error("Depletion run requested without a depletion solver")]
    MissingSolver,

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Engine(#[from] EngineFault),

    #[error(transparent)]
    Result(#[from] ResultError),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }
}

impl ResultError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn vtk(path: impl Into<PathBuf>, source: vtkio::Error) -> Self {
        Self::Vtk {
            path: path.into(),
            source,
        }
    }
}
