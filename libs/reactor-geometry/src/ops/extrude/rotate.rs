//! # Rotate Extrusion
//!
//! Revolves a profile about the v axis of its workplane.
//!
//! ## Algorithm
//!
//! 1. The profile `u` coordinate is the distance from the axis (must be >= 0)
//! 2. The profile is copied at `segments + 1` angular steps (or `segments`
//!    for a full turn, which wraps around)
//! 3. Each profile edge generates a band of quads between steps
//! 4. Partial revolutions are closed with two profile caps

use crate::error::GeometryError;
use crate::mesh::SurfaceMesh;
use crate::profile::Profile;
use crate::workplane::Workplane;
use config::constants::EPSILON;

/// Revolves `profile` by `angle_degrees` using `segments` angular steps.
pub fn revolve_profile(
    shape: &str,
    profile: &Profile,
    workplane: Workplane,
    angle_degrees: f64,
    segments: u32,
) -> Result<SurfaceMesh, GeometryError> {
    if !(angle_degrees > 0.0 && angle_degrees <= 360.0) {
        return Err(GeometryError::invalid_parameter(
            shape,
            "rotation_angle",
            format!("rotation angle must be in (0, 360], got {angle_degrees}"),
        ));
    }
    if profile.min_u() < -EPSILON {
        return Err(GeometryError::invalid_parameter(
            shape,
            "points",
            "revolved profile crosses the rotation axis",
        ));
    }

    let segments = segments.max(1);
    let full_turn = (angle_degrees - 360.0).abs() < 1e-6;
    let steps = if full_turn { segments } else { segments + 1 };
    let angle = angle_degrees.to_radians();

    let n = profile.len();
    let mut mesh = SurfaceMesh::with_capacity(n * steps as usize, n * segments as usize * 2 + 2 * n);

    for step in 0..steps {
        let theta = angle * step as f64 / segments as f64;
        for &p in profile.points() {
            mesh.add_vertex(workplane.revolve(p, theta));
        }
    }

    for step in 0..segments {
        let base = step as usize * n;
        let next = if full_turn && step == segments - 1 {
            0
        } else {
            (step as usize + 1) * n
        };
        for i in 0..n {
            let j = (i + 1) % n;
            let a = (base + i) as u32;
            let b = (base + j) as u32;
            let c = (next + j) as u32;
            let d = (next + i) as u32;
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(a, c, d);
        }
    }

    if !full_turn {
        let end = (segments as usize * n) as u32;
        for [a, b, c] in profile.triangulate() {
            mesh.add_triangle(a, c, b);
            mesh.add_triangle(end + a, end + b, end + c);
        }
    }

    // Edges lying on the axis collapse into slivers
    mesh.remove_degenerate_triangles();
    Ok(mesh)
}
