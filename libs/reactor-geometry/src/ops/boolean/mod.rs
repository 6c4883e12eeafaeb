//! # Boolean Cut
//!
//! Subtracts one closed surface mesh from another using BSP trees.
//!
//! ## Algorithm
//!
//! csg.js difference:
//! `a.invert(); a.clip_to(b); b.clip_to(a); b.invert(); b.clip_to(a); b.invert(); a.build(b); a.invert()`
//!
//! ## Example
//!
//! ```rust
//! use reactor_geometry::ops::boolean::difference;
//! use reactor_geometry::SurfaceMesh;
//!
//! let a = SurfaceMesh::new();
//! let b = SurfaceMesh::new();
//! assert!(difference(&a, &b).is_empty());
//! ```

mod bsp;
mod plane;
mod polygon;


use crate::mesh::SurfaceMesh;
use bsp::BspNode;
use polygon::Polygon;

/// Returns `a` with the volume of `b` removed.
///
/// Both inputs must be closed with outward-facing triangles.
pub fn difference(a: &SurfaceMesh, b: &SurfaceMesh) -> SurfaceMesh {
    let polys_a = mesh_to_polygons(a);
    if polys_a.is_empty() {
        return SurfaceMesh::new();
    }
    let polys_b = mesh_to_polygons(b);
    if polys_b.is_empty() {
        return a.clone();
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    bsp_a.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.build(bsp_b.all_polygons());
    bsp_a.invert();

    polygons_to_mesh(&bsp_a.all_polygons())
}

fn mesh_to_polygons(mesh: &SurfaceMesh) -> Vec<Polygon> {
    (0..mesh.triangle_count())
        .filter_map(|i| Polygon::from_vertices(mesh.triangle_corners(i).to_vec()))
        .collect()
}

/// Fan-triangulates the (convex) result polygons.
fn polygons_to_mesh(polygons: &[Polygon]) -> SurfaceMesh {
    let mut mesh = SurfaceMesh::new();
    for polygon in polygons {
        let vertices = polygon.vertices();
        if vertices.len() < 3 {
            continue;
        }
        let base = mesh.vertex_count() as u32;
        for &v in vertices {
            mesh.add_vertex(v);
        }
        for i in 1..(vertices.len() as u32 - 1) {
            mesh.add_triangle(base, base + i, base + i + 1);
        }
    }
    mesh.remove_degenerate_triangles();
    mesh
}
