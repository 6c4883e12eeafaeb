//! # Configuration Constants
//!
//! Centralized constants for the neutronics pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Meshing**: Default element sizes and tessellation limits
//! - **Naming**: Volume tag and tally naming conventions
//! - **Artifacts**: File names exchanged between stages
//! - **Simulation**: Default batch/particle counts and physical constants

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance used when validating 2D profiles (areas, coincident points,
/// segment crossings).
pub const PROFILE_EPSILON: f64 = 1e-9;

/// Plane-classification tolerance for BSP boolean cuts.
///
/// Coarser than [`EPSILON`] so that vertices produced by earlier splits
/// are still recognised as lying on the splitting plane.
pub const BSP_EPSILON: f64 = 1e-5;

// =============================================================================
// MESHING CONSTANTS
// =============================================================================

/// Default minimum mesh element size (model units).
pub const DEFAULT_MIN_MESH_SIZE: f64 = 1.0;

/// Default maximum mesh element size (model units).
pub const DEFAULT_MAX_MESH_SIZE: f64 = 2.0;

/// Minimum number of segments used to approximate a full circle.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_SEGMENTS;
///
/// let computed = 3;
/// assert_eq!(computed.max(MIN_SEGMENTS), MIN_SEGMENTS);
/// ```
pub const MIN_SEGMENTS: u32 = 8;

/// Maximum number of segments used to approximate a full circle.
pub const MAX_SEGMENTS: u32 = 1000;

/// Maximum number of vertices in a single tessellated volume.
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of triangles in a single tessellated volume.
pub const MAX_TRIANGLES: usize = 10_000_000;

/// Maximum number of cells accepted for a single mesh tally.
pub const MAX_TALLY_CELLS: u64 = 100_000_000;

/// Red zone left free when the BSP recursion grows the stack.
pub const STACK_RED_ZONE_BYTES: usize = 256 * 1024;

/// Bytes of stack allocated per growth step during BSP recursion.
///
/// # Examples
/// ```
/// use config::constants::{STACK_GROWTH_BYTES, STACK_RED_ZONE_BYTES};
/// assert!(STACK_GROWTH_BYTES > STACK_RED_ZONE_BYTES);
/// ```
pub const STACK_GROWTH_BYTES: usize = 8 * 1024 * 1024;

/// Default shape color (RGB, grey).
pub const DEFAULT_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

// =============================================================================
// NAMING CONSTANTS
// =============================================================================

/// Prefix of every volume tag written to the volume mesh file.
pub const MATERIAL_TAG_PREFIX: &str = "mat_";

/// Suffix appended to the quantity name of a default-named 3D mesh tally.
pub const MESH_TALLY_SUFFIX: &str = "_on_3D_mesh";

// =============================================================================
// ARTIFACT CONSTANTS
// =============================================================================

/// Default file name of the tagged volume mesh.
pub const MESH_FILE_NAME: &str = "dagmc.json";

/// Default file name of the volume mesh visualization export.
pub const MESH_VTK_FILE_NAME: &str = "dagmc.vtk";

/// Stem of the result (statepoint) file.
pub const STATEPOINT_PREFIX: &str = "statepoint";

/// Extension of the result (statepoint) file.
pub const RESULT_EXTENSION: &str = "json";

/// Deck document holding the geometry reference.
pub const GEOMETRY_FILE_NAME: &str = "geometry.json";

/// Deck document holding the material set.
pub const MATERIALS_FILE_NAME: &str = "materials.json";

/// Deck document holding the run settings.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Deck document holding the tally requests.
pub const TALLIES_FILE_NAME: &str = "tallies.json";

/// File written by the depletion integrator with the inventory history.
pub const DEPLETION_RESULTS_FILE_NAME: &str = "depletion_results.json";

/// File an external engine writes per-source-particle reaction rates to.
pub const REACTION_RATES_FILE_NAME: &str = "reaction_rates.json";

/// File handed to an external engine with the start-of-step inventories.
pub const INVENTORIES_FILE_NAME: &str = "inventories.json";

// =============================================================================
// SIMULATION CONSTANTS
// =============================================================================

/// Default number of batches.
pub const DEFAULT_BATCHES: u32 = 500;

/// Default number of particles per batch.
pub const DEFAULT_PARTICLES: u64 = 100_000;

/// Seconds in a 365-day year.
pub const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Radius scale of the vacuum boundary sphere relative to the radius of the
/// sphere circumscribing the geometry bounds.
pub const VACUUM_BOUNDARY_SCALE: f64 = 1.2;

/// Avogadro constant (1/mol).
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Atoms per cm³ for a density of 1 atom/barn-cm.
pub const ATOMS_PER_BARN_CM: f64 = 1e24;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Number of segments used to tessellate an arc.
///
/// Each segment is at most `max_size` long; the count for a full circle is
/// clamped to `MIN_SEGMENTS..=MAX_SEGMENTS` and scaled by the swept angle.
///
/// # Example
///
/// ```rust
/// use config::constants::{compute_segments, MIN_SEGMENTS};
///
/// // Small radius, coarse mesh: falls back to the minimum.
/// assert_eq!(compute_segments(0.95, 360.0, 2.0), MIN_SEGMENTS);
/// // Half a revolution uses half the segments (rounded up).
/// assert_eq!(compute_segments(100.0, 180.0, 1.0), 315);
/// ```
pub fn compute_segments(radius: f64, angle_degrees: f64, max_size: f64) -> u32 {
    let full_circle = if max_size > 0.0 {
        ((2.0 * std::f64::consts::PI * radius) / max_size).ceil() as u32
    } else {
        MAX_SEGMENTS
    };
    let full_circle = full_circle.clamp(MIN_SEGMENTS, MAX_SEGMENTS);
    let fraction = (angle_degrees / 360.0).clamp(0.0, 1.0);
    ((full_circle as f64 * fraction).ceil() as u32).max(1)
}

/// Volume tag for a shape name.
///
/// ```rust
/// use config::constants::material_tag;
/// assert_eq!(material_tag("blue_part"), "mat_blue_part");
/// ```
pub fn material_tag(shape_name: &str) -> String {
    format!("{MATERIAL_TAG_PREFIX}{shape_name}")
}

/// Default name of a 3D mesh tally scoring `quantity`.
///
/// ```rust
/// use config::constants::mesh_tally_name;
/// assert_eq!(mesh_tally_name("heating"), "heating_on_3D_mesh");
/// ```
pub fn mesh_tally_name(quantity: &str) -> String {
    format!("{quantity}{MESH_TALLY_SUFFIX}")
}

/// Result file name for a run of `batches` batches.
///
/// The driver writes, and the extractor opens, exactly this name.
pub fn statepoint_file_name(batches: u32) -> String {
    format!("{STATEPOINT_PREFIX}.{batches}.{RESULT_EXTENSION}")
}
