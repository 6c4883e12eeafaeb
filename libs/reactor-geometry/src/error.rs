//! # Geometry Errors
//!
//! Error types for shape definition, assembly and volume mesh export.
//!
//! ## Error Policy
//!
//! - No retry with adjusted parameters: a failed cut or mesh is fatal
//! - Files written before a failure are left on disk

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while defining shapes or combining them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// Profile has too few points, zero area, or non-finite coordinates
    #[error("Degenerate profile for '{shape}': {message}")]
    DegenerateProfile { shape: String, message: String },

    /// Two non-adjacent profile edges cross or touch
    #[error("Profile of '{shape}' self-intersects between edges {first} and {second}")]
    SelfIntersecting {
        shape: String,
        first: usize,
        second: usize,
    },

    /// A scalar parameter (radius, distance, angle) is out of range
    #[error("Invalid parameter '{parameter}' for '{shape}': {message}")]
    InvalidParameter {
        shape: String,
        parameter: &'static str,
        message: String,
    },

    /// Shape names must be non-empty and free of whitespace
    #[error("Invalid shape name '{0}'")]
    InvalidName(String),

    /// A shape with this name is already registered
    #[error("Shape '{0}' is already defined")]
    DuplicateName(String),

    /// Handle does not belong to this registry
    #[error("Unknown shape handle #{0}")]
    UnknownShape(usize),

    /// An assembly needs at least one member
    #[error("Assembly has no shapes")]
    EmptyAssembly,

    /// The same shape was listed twice in an assembly
    #[error("Shape '{0}' appears more than once in the assembly")]
    DuplicateMember(String),

    /// The cut tool does not overlap the shape it should cut
    #[error("Cut shape '{tool}' does not intersect '{target}'")]
    CutDoesNotIntersect { target: String, tool: String },

    /// The cut removed the whole shape
    #[error("Cutting '{tool}' from '{target}' leaves no volume")]
    EmptyAfterCut { target: String, tool: String },
}

impl GeometryError {
    /// Creates a degenerate profile error.
    pub fn degenerate(shape: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DegenerateProfile {
            shape: shape.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(
        shape: impl Into<String>,
        parameter: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            shape: shape.into(),
            parameter,
            message: message.into(),
        }
    }
}

/// Errors raised while meshing an assembly.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshingError {
    /// Sizes must be finite, positive and ordered
    #[error("Invalid mesh sizes: min {min_size}, max {max_size}")]
    InvalidSizes { min_size: f64, max_size: f64 },

    /// Tessellation produced no triangles
    #[error("Tessellation of '{0}' produced an empty mesh")]
    EmptyMesh(String),

    /// Too many vertices
    #[error("Too many vertices in '{shape}': {count} (max: {max})")]
    TooManyVertices {
        shape: String,
        count: usize,
        max: usize,
    },

    /// Too many triangles
    #[error("Too many triangles in '{shape}': {count} (max: {max})")]
    TooManyTriangles {
        shape: String,
        count: usize,
        max: usize,
    },
}

/// Errors raised by [`crate::export_volume_mesh`] and volume mesh file I/O.
#[derive(Debug, Error)]
pub enum VolumeMeshError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Meshing(#[from] MeshingError),

    /// Filesystem failure while reading or writing a mesh artifact
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mesh file could not be encoded or decoded
    #[error("Malformed volume mesh file {path}: {source}")]
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

impl VolumeMeshError {
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
