//! # Reactor Geometry
//!
//! Shape registry, assembly builder and tagged volume mesh export.
//!
//! ## Architecture
//!
//! ```text
//! ShapeSpec → ShapeRegistry → Assembly → export_volume_mesh → VolumeMesh file
//! ```
//!
//! ## Algorithms
//!
//! Pure Rust, no CAD kernel:
//! - **Extrusion**: symmetric linear sweep and revolution of 2D profiles
//! - **Triangulation**: ear clipping for caps
//! - **Cuts**: BSP trees (csg.js difference)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use reactor_geometry::{export_volume_mesh, MeshingOptions, ShapeRegistry, ShapeSpec};
//!
//! let mut registry = ShapeRegistry::new();
//! let part = registry.define_shape(ShapeSpec::extrude_polygon(
//!     "grey_part",
//!     [(-1.15, -1.25), (1.15, -1.25), (1.15, 1.75), (-1.15, 1.75)],
//!     1.2,
//! ))?;
//! let assembly = registry.build_assembly(&[part])?;
//! let mesh_file = export_volume_mesh(&assembly, MeshingOptions::default(), "dagmc.json")?;
//! assert_eq!(mesh_file.tags, vec!["mat_grey_part"]);
//! # Ok::<(), reactor_geometry::VolumeMeshError>(())
//! ```

pub mod bounds;
pub mod error;
pub mod export;
pub mod mesh;
pub mod ops;
pub mod profile;
pub mod registry;
pub mod shape;
pub mod volume_mesh;
pub mod workplane;

pub use bounds::BoundingBox;
pub use error::{GeometryError, MeshingError, VolumeMeshError};
pub use export::{export_volume_mesh, MeshFile, MeshingOptions};
pub use mesh::SurfaceMesh;
pub use profile::Profile;
pub use registry::{Assembly, AssemblyMember, ShapeRegistry};
pub use shape::{Shape, ShapeGeometry, ShapeHandle, ShapeSpec};
pub use volume_mesh::{TaggedVolume, VolumeMesh};
pub use workplane::Workplane;
