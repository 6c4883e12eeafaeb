//! # Model Geometry
//!
//! Reference to a tagged volume mesh file, with its tags and corners, and
//! an optional vacuum sphere enclosing everything.

use crate::error::ModelError;
use config::constants::VACUUM_BOUNDARY_SCALE;
use glam::DVec3;
use reactor_geometry::{BoundingBox, MeshFile, VolumeMesh};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sphere whose surface is a vacuum boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VacuumSphere {
    pub center: DVec3,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DagmcGeometry {
    mesh_path: PathBuf,
    tags: Vec<String>,
    bounds: BoundingBox,
    vacuum_boundary: Option<VacuumSphere>,
}

impl DagmcGeometry {
    /// Uses the summary returned by the exporter.
    pub fn from_mesh_file(mesh_file: &MeshFile) -> Self {
        Self {
            mesh_path: mesh_file.path.clone(),
            tags: mesh_file.tags.clone(),
            bounds: mesh_file.bounds,
            vacuum_boundary: None,
        }
    }

    /// Reads tags and corners from an existing mesh file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let mesh = VolumeMesh::read(path)?;
        let bounds = mesh
            .bounds()
            .ok_or_else(|| ModelError::Bounds(format!("mesh file {} has no vertices", path.display())))?;
        Ok(Self {
            mesh_path: path.to_path_buf(),
            tags: mesh.tags(),
            bounds,
            vacuum_boundary: None,
        })
    }

    /// Encloses the geometry in a vacuum sphere centred on its bounds.
    pub fn with_vacuum_sphere(mut self) -> Self {
        self.vacuum_boundary = Some(VacuumSphere {
            center: self.bounds.center(),
            radius: self.bounds.circumradius() * VACUUM_BOUNDARY_SCALE,
        });
        self
    }

    pub fn mesh_path(&self) -> &Path {
        &self.mesh_path
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Lower and upper corners of the geometry.
    pub fn corners(&self) -> BoundingBox {
        self.bounds
    }

    pub fn vacuum_boundary(&self) -> Option<VacuumSphere> {
        self.vacuum_boundary
    }
}
