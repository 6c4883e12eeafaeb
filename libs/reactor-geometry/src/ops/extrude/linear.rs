//! # Linear Extrusion
//!
//! Extrudes a profile along its workplane normal. The solid spans
//! `distance / 2` on each side of the workplane.

use crate::error::GeometryError;
use crate::mesh::SurfaceMesh;
use crate::profile::Profile;
use crate::workplane::Workplane;

/// Extrudes `profile` by `distance`, centred on `workplane`.
///
/// # Example
///
/// ```rust
/// use reactor_geometry::ops::extrude::extrude_profile;
/// use reactor_geometry::{Profile, Workplane};
/// use glam::DVec2;
///
/// let square = Profile::new("square", &[
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ]).unwrap();
/// let mesh = extrude_profile("square", &square, Workplane::XY, 2.0).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn extrude_profile(
    shape: &str,
    profile: &Profile,
    workplane: Workplane,
    distance: f64,
) -> Result<SurfaceMesh, GeometryError> {
    if !(distance.is_finite() && distance > 0.0) {
        return Err(GeometryError::invalid_parameter(
            shape,
            "distance",
            format!("extrusion distance must be positive, got {distance}"),
        ));
    }

    let n = profile.len();
    let half = distance / 2.0;
    let mut mesh = SurfaceMesh::with_capacity(2 * n, 2 * n + 2 * n.saturating_sub(2));

    // Bottom ring [0, n), top ring [n, 2n)
    for &p in profile.points() {
        mesh.add_vertex(workplane.to_model(p, -half));
    }
    for &p in profile.points() {
        mesh.add_vertex(workplane.to_model(p, half));
    }

    // Side quads, outward for a counter-clockwise profile
    for i in 0..n {
        let j = (i + 1) % n;
        let (b0, b1) = (i as u32, j as u32);
        let (t0, t1) = ((n + i) as u32, (n + j) as u32);
        mesh.add_triangle(b0, b1, t1);
        mesh.add_triangle(b0, t1, t0);
    }

    // Caps: top faces +normal, bottom is reversed
    let top = n as u32;
    for [a, b, c] in profile.triangulate() {
        mesh.add_triangle(a, c, b);
        mesh.add_triangle(top + a, top + b, top + c);
    }

    Ok(mesh)
}
