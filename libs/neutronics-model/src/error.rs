//! # Model Errors
//!
//! Errors raised while declaring materials, binding them to volume tags and
//! configuring sources, tallies and settings.

use reactor_geometry::VolumeMeshError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Empty, negative, mixed-basis or unknown-element composition
    #[error("Invalid composition for material '{material}': {message}")]
    Composition { material: String, message: String },

    /// Density missing, zero, negative or non-finite
    #[error("Invalid density for material '{material}': {message}")]
    Density { material: String, message: String },

    /// Depletable materials need a positive volume
    #[error("Depletable material '{0}' has no positive volume")]
    MissingVolume(String),

    /// Handle not minted by this catalog
    #[error("Unknown material handle #{0}")]
    UnknownMaterial(usize),

    /// Volume tags have the form `mat_<name>`
    #[error("Invalid volume tag '{0}': expected 'mat_<name>'")]
    InvalidTag(String),

    /// Mesh volumes left without a material
    #[error("Mesh tags without a material: {}", .0.join(", "))]
    UnboundTag(Vec<String>),

    #[error("Tag '{0}' is bound more than once")]
    DuplicateBinding(String),

    /// Invalid space, angle or energy distribution, or source strength
    #[error("Invalid source distribution: {0}")]
    Distribution(String),

    /// Tally box with zero, negative or non-finite extent
    #[error("Invalid tally bounding box: {0}")]
    Bounds(String),

    #[error("Invalid tally resolution {0:?}: every component must be positive")]
    Resolution([u32; 3]),

    #[error("Tally mesh of {cells} cells exceeds the limit of {max}")]
    TooManyCells { cells: u64, max: u64 },

    #[error("Unknown tally quantity '{0}'")]
    UnknownQuantity(String),

    #[error("Tally name '{0}' is already used")]
    DuplicateTally(String),

    #[error("Invalid simulation settings: {0}")]
    Settings(String),

    #[error("Invalid depletion schedule: {0}")]
    Schedule(String),

    #[error(transparent)]
    MeshFile(#[from] VolumeMeshError),
}

impl ModelError {
    pub fn composition(material: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Composition {
            material: material.into(),
            message: message.into(),
        }
    }

    pub fn density(material: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Density {
            material: material.into(),
            message: message.into(),
        }
    }
}
