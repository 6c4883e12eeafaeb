//! # Surface Mesh
//!
//! Closed triangle surface bounding one tagged volume.

use crate::bounds::BoundingBox;
use crate::error::MeshingError;
use config::constants::{EPSILON, MAX_TRIANGLES, MAX_VERTICES};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A triangle mesh with outward-facing (counter-clockwise) triangles.
///
/// # Example
///
/// ```rust
/// use reactor_geometry::SurfaceMesh;
/// use glam::DVec3;
///
/// let mut mesh = SurfaceMesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Corner positions of triangle `index`.
    pub fn triangle_corners(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Axis-aligned bounds of all vertices, `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Positive for a closed mesh with outward-facing triangles.
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let a = self.vertices[t[0] as usize];
                let b = self.vertices[t[1] as usize];
                let c = self.vertices[t[2] as usize];
                a.dot(b.cross(c))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        (0..self.triangles.len())
            .map(|i| {
                let [a, b, c] = self.triangle_corners(i);
                (b - a).cross(c - a).length() * 0.5
            })
            .sum()
    }

    /// Appends another mesh, offsetting its indices.
    pub fn merge(&mut self, other: &SurfaceMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }

    /// Drops triangles with repeated indices or (near) zero area.
    ///
    /// Revolving a profile that touches the axis produces such slivers.
    pub fn remove_degenerate_triangles(&mut self) {
        let vertices = &self.vertices;
        self.triangles.retain(|t| {
            if t[0] == t[1] || t[1] == t[2] || t[0] == t[2] {
                return false;
            }
            let a = vertices[t[0] as usize];
            let b = vertices[t[1] as usize];
            let c = vertices[t[2] as usize];
            (b - a).cross(c - a).length() > EPSILON
        });
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No degenerate triangles (zero area)
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;
        self.triangles.iter().all(|t| {
            if t.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            if t[0] == t[1] || t[1] == t[2] || t[0] == t[2] {
                return false;
            }
            let a = self.vertices[t[0] as usize];
            let b = self.vertices[t[1] as usize];
            let c = self.vertices[t[2] as usize];
            (b - a).cross(c - a).length() > EPSILON
        })
    }

    /// Enforces the global vertex/triangle limits.
    pub fn check_limits(&self, shape: &str) -> Result<(), MeshingError> {
        if self.vertices.len() > MAX_VERTICES {
            return Err(MeshingError::TooManyVertices {
                shape: shape.to_string(),
                count: self.vertices.len(),
                max: MAX_VERTICES,
            });
        }
        if self.triangles.len() > MAX_TRIANGLES {
            return Err(MeshingError::TooManyTriangles {
                shape: shape.to_string(),
                count: self.triangles.len(),
                max: MAX_TRIANGLES,
            });
        }
        Ok(())
    }
}
