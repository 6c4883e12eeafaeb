//! # Extrusion Operations
//!
//! Algorithms turning a [`Profile`](crate::profile::Profile) into a closed
//! surface mesh:
//! - **extrude_profile**: sweep along the workplane normal, symmetric about the plane
//! - **revolve_profile**: revolve about the workplane's v axis
//!
//! Both emit outward-facing triangles so the result can be fed to the
//! boolean cut directly.

mod linear;
mod rotate;


pub use linear::extrude_profile;
pub use rotate::revolve_profile;
