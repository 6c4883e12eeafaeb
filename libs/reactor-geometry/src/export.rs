//! # Volume Mesh Export
//!
//! Tessellates an [`Assembly`], applies cuts and writes the tagged volume
//! mesh file.
//!
//! ## Pipeline
//!
//! ```text
//! MeshingOptions::validate → feature-size warnings
//!     → par_iter(members): tessellate → cut
//!     → VolumeMesh::write → MeshFile
//! ```
//!
//! Members are tessellated on the rayon pool and collected in assembly
//! order, so the file is identical between runs.

use crate::bounds::BoundingBox;
use crate::error::{GeometryError, MeshingError, VolumeMeshError};
use crate::mesh::SurfaceMesh;
use crate::ops::boolean::difference;
use crate::registry::{Assembly, AssemblyMember};
use crate::volume_mesh::{TaggedVolume, VolumeMesh};
use config::constants::{material_tag, DEFAULT_MAX_MESH_SIZE, DEFAULT_MIN_MESH_SIZE, EPSILON};
use pipeline_types::Diagnostic;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Element size limits for meshing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshingOptions {
    pub min_size: f64,
    pub max_size: f64,
}

impl Default for MeshingOptions {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_MESH_SIZE,
            max_size: DEFAULT_MAX_MESH_SIZE,
        }
    }
}

impl MeshingOptions {
    pub fn new(min_size: f64, max_size: f64) -> Self {
        Self { min_size, max_size }
    }

    /// Requires `0 < min_size <= max_size`, both finite.
    pub fn validate(&self) -> Result<(), MeshingError> {
        let ok = self.min_size.is_finite()
            && self.max_size.is_finite()
            && self.min_size > 0.0
            && self.min_size <= self.max_size;
        if ok {
            Ok(())
        } else {
            Err(MeshingError::InvalidSizes {
                min_size: self.min_size,
                max_size: self.max_size,
            })
        }
    }
}

/// Reference to a written mesh file.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshFile {
    pub path: PathBuf,
    /// Volume tags in assembly order
    pub tags: Vec<String>,
    pub bounds: BoundingBox,
    pub diagnostics: Vec<Diagnostic>,
}

/// Meshes `assembly` and writes it to `path`, replacing any existing file.
///
/// # Errors
///
/// - `MeshingError` for invalid sizes, empty or oversized meshes
/// - `GeometryError::CutDoesNotIntersect` / `EmptyAfterCut` from cuts
/// - `VolumeMeshError::Io` / `Format` when writing fails
pub fn export_volume_mesh(
    assembly: &Assembly,
    options: MeshingOptions,
    path: impl AsRef<Path>,
) -> Result<MeshFile, VolumeMeshError> {
    options.validate()?;
    let path = path.as_ref();

    let diagnostics = feature_size_warnings(assembly, &options);

    let meshes = assembly
        .members()
        .par_iter()
        .map(|member| tessellate_member(member, options.max_size))
        .collect::<Result<Vec<_>, _>>()?;

    let volumes: Vec<TaggedVolume> = assembly
        .members()
        .iter()
        .zip(meshes)
        .enumerate()
        .map(|(i, (member, mesh))| TaggedVolume {
            id: i as u32 + 1,
            tag: material_tag(member.shape.name()),
            shape: member.shape.name().to_string(),
            color: member.shape.color(),
            mesh,
        })
        .collect();

    let volume_mesh = VolumeMesh::new(volumes);
    let bounds = volume_mesh
        .bounds()
        .ok_or_else(|| MeshingError::EmptyMesh("assembly".into()))?;
    volume_mesh.write(path)?;

    Ok(MeshFile {
        path: path.to_path_buf(),
        tags: volume_mesh.tags(),
        bounds,
        diagnostics,
    })
}

fn feature_size_warnings(assembly: &Assembly, options: &MeshingOptions) -> Vec<Diagnostic> {
    assembly
        .members()
        .iter()
        .filter_map(|member| {
            let feature = member.shape.feature_size();
            (options.min_size >= feature / 2.0).then(|| {
                Diagnostic::warning(format!(
                    "min mesh size {} is not below half the smallest feature ({feature})",
                    options.min_size
                ))
                .with_subject(member.shape.name())
                .with_hint("decrease min_size to resolve this shape")
            })
        })
        .collect()
}

fn tessellate_member(member: &AssemblyMember, max_size: f64) -> Result<SurfaceMesh, VolumeMeshError> {
    let name = member.shape.name();
    let mut mesh = member.shape.tessellate(max_size)?;

    if let Some(tool) = &member.cut {
        let tool_mesh = tessellate_member(tool, max_size)?;
        mesh = apply_cut(name, tool.shape.name(), &mesh, &tool_mesh)?;
    }

    if mesh.is_empty() {
        return Err(MeshingError::EmptyMesh(name.to_string()).into());
    }
    mesh.check_limits(name)?;
    Ok(mesh)
}

fn apply_cut(
    target: &str,
    tool: &str,
    target_mesh: &SurfaceMesh,
    tool_mesh: &SurfaceMesh,
) -> Result<SurfaceMesh, GeometryError> {
    let overlaps = match (target_mesh.bounding_box(), tool_mesh.bounding_box()) {
        (Some(a), Some(b)) => a.intersection(&b).is_some(),
        _ => false,
    };
    if !overlaps {
        return Err(GeometryError::CutDoesNotIntersect {
            target: target.to_string(),
            tool: tool.to_string(),
        });
    }

    let result = difference(target_mesh, tool_mesh);
    if result.is_empty() || result.signed_volume() <= EPSILON {
        return Err(GeometryError::EmptyAfterCut {
            target: target.to_string(),
            tool: tool.to_string(),
        });
    }
    Ok(result)
}
