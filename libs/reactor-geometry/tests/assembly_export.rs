//! End-to-end export of the three-part test assembly: a grey block with a
//! cylindrical hole, and two revolved rings sitting in the hole.

use approx::assert_relative_eq;
use config::constants::{MESH_FILE_NAME, MESH_VTK_FILE_NAME};
use glam::DVec3;
use reactor_geometry::{
    export_volume_mesh, MeshingOptions, ShapeHandle, ShapeRegistry, ShapeSpec, VolumeMesh, Workplane,
};
use std::f64::consts::SQRT_2;

struct Parts {
    registry: ShapeRegistry,
    grey: ShapeHandle,
    red: ShapeHandle,
    blue: ShapeHandle,
}

fn define_parts() -> Parts {
    let mut registry = ShapeRegistry::new();
    let hole = registry
        .define_shape(ShapeSpec::extrude_circle("part0.stl", (0.0, 0.0), 0.95, 1.2).workplane(Workplane::XZ))
        .unwrap();
    // Defined but never assembled
    registry
        .define_shape(ShapeSpec::extrude_circle("water", (0.0, 0.0), 0.6, 1.2))
        .unwrap();
    let grey = registry
        .define_shape(
            ShapeSpec::extrude_polygon(
                "grey_part",
                [(-1.15, -1.25), (1.15, -1.25), (1.15, 1.75), (-1.15, 1.75)],
                1.2,
            )
            .color([0.5, 0.5, 0.5])
            .cut(hole),
        )
        .unwrap();
    let red = registry
        .define_shape(
            ShapeSpec::rotate_polygon("red_part", [(0.75, -0.6), (0.95, -0.6), (0.95, 0.6), (0.75, 0.6)], 360.0)
                .workplane(Workplane::XY)
                .color([0.5, 0.0, 0.0]),
        )
        .unwrap();
    let blue = registry
        .define_shape(
            ShapeSpec::rotate_polygon("blue_part", [(0.6, -0.6), (0.75, -0.6), (0.75, 0.6), (0.6, 0.6)], 360.0)
                .workplane(Workplane::XY)
                .color([0.0, 0.0, 0.5]),
        )
        .unwrap();
    Parts {
        registry,
        grey,
        red,
        blue,
    }
}

/// Area of a regular octagon with circumradius `r`.
fn octagon_area(r: f64) -> f64 {
    2.0 * SQRT_2 * r * r
}

#[test]
fn test_tags_are_exactly_the_members() {
    let parts = define_parts();
    let assembly = parts
        .registry
        .build_assembly(&[parts.grey, parts.red, parts.blue])
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(MESH_FILE_NAME);

    let mesh_file = export_volume_mesh(&assembly, MeshingOptions::new(1.0, 2.0), &path).unwrap();

    assert_eq!(mesh_file.tags, vec!["mat_grey_part", "mat_red_part", "mat_blue_part"]);
    assert!(!mesh_file.tags.iter().any(|t| t.contains("part0") || t.contains("water")));
    assert_eq!(VolumeMesh::read(&path).unwrap().tags(), mesh_file.tags);
}

#[test]
fn test_bounds_match_grey_block() {
    let parts = define_parts();
    let assembly = parts
        .registry
        .build_assembly(&[parts.grey, parts.red, parts.blue])
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mesh_file =
        export_volume_mesh(&assembly, MeshingOptions::new(1.0, 2.0), dir.path().join(MESH_FILE_NAME)).unwrap();

    let expected_lower = DVec3::new(-1.15, -0.6, -1.25);
    let expected_upper = DVec3::new(1.15, 0.6, 1.75);
    assert!((mesh_file.bounds.lower - expected_lower).length() < 1e-9);
    assert!((mesh_file.bounds.upper - expected_upper).length() < 1e-9);
}

#[test]
fn test_volumes_after_cut() {
    let parts = define_parts();
    let assembly = parts
        .registry
        .build_assembly(&[parts.grey, parts.red, parts.blue])
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(MESH_FILE_NAME);
    export_volume_mesh(&assembly, MeshingOptions::new(1.0, 2.0), &path).unwrap();
    let mesh = VolumeMesh::read(&path).unwrap();

    // max_size 2 gives the minimum of 8 segments for every curve
    let grey = mesh.volume("mat_grey_part").unwrap().mesh.signed_volume();
    assert_relative_eq!(grey, (2.3 * 3.0 - octagon_area(0.95)) * 1.2, max_relative = 1e-6);

    let red = mesh.volume("mat_red_part").unwrap().mesh.signed_volume();
    assert_relative_eq!(red, (octagon_area(0.95) - octagon_area(0.75)) * 1.2, max_relative = 1e-9);

    let blue = mesh.volume("mat_blue_part").unwrap();
    assert_eq!(blue.id, 3);
    assert_eq!(blue.color, [0.0, 0.0, 0.5]);
}

#[test]
fn test_coarse_min_size_warns_per_shape() {
    let parts = define_parts();
    let assembly = parts
        .registry
        .build_assembly(&[parts.grey, parts.red, parts.blue])
        .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let coarse = export_volume_mesh(&assembly, MeshingOptions::new(1.0, 2.0), dir.path().join("a.json")).unwrap();
    let subjects: Vec<_> = coarse
        .diagnostics
        .iter()
        .filter(|d| d.is_warning())
        .filter_map(|d| d.subject.as_deref())
        .collect();
    assert_eq!(subjects, vec!["grey_part", "red_part", "blue_part"]);

    let fine = export_volume_mesh(&assembly, MeshingOptions::new(0.05, 2.0), dir.path().join("b.json")).unwrap();
    assert!(fine.diagnostics.is_empty());
}

#[test]
fn test_export_is_deterministic_and_overwrites() {
    let parts = define_parts();
    let assembly = parts
        .registry
        .build_assembly(&[parts.grey, parts.red, parts.blue])
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(MESH_FILE_NAME);
    std::fs::write(&path, "stale").unwrap();

    export_volume_mesh(&assembly, MeshingOptions::default(), &path).unwrap();
    let first = std::fs::read(&path).unwrap();
    export_volume_mesh(&assembly, MeshingOptions::default(), &path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), first);
}

#[test]
fn test_vtk_export_of_written_mesh() {
    let parts = define_parts();
    let assembly = parts.registry.build_assembly(&[parts.red, parts.blue]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(MESH_FILE_NAME);
    export_volume_mesh(&assembly, MeshingOptions::default(), &path).unwrap();

    let vtk = dir.path().join(MESH_VTK_FILE_NAME);
    VolumeMesh::read(&path).unwrap().write_vtk(&vtk).unwrap();
    let text = std::fs::read_to_string(vtk).unwrap();
    assert!(text.starts_with("# vtk DataFile"));
    assert!(text.contains("POLYDATA"));
    assert!(text.contains("volume_id"));
}

fn cut_l_block(hole_center: (f64, f64)) -> f64 {
    let mut registry = ShapeRegistry::new();
    let hole = registry
        .define_shape(ShapeSpec::extrude_circle("hole", hole_center, 0.2, 0.5))
        .unwrap();
    let block = registry
        .define_shape(
            ShapeSpec::extrude_polygon(
                "l_block",
                [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)],
                1.0,
            )
            .cut(hole),
        )
        .unwrap();
    let assembly = registry.build_assembly(&[block]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(MESH_FILE_NAME);
    export_volume_mesh(&assembly, MeshingOptions::new(1.0, 2.0), &path).unwrap();
    VolumeMesh::read(&path).unwrap().volume("mat_l_block").unwrap().mesh.signed_volume()
}

#[test]
fn test_cut_through_concave_extrusion() {
    // Hole well inside the L: the whole octagonal prism is removed.
    assert_relative_eq!(cut_l_block((0.5, 0.5)), 3.0 - 0.5 * octagon_area(0.2), max_relative = 1e-6);

    // Hole straddling the inner corner: only the part inside the L is removed.
    let outside_notch = 0.0024264068711928564;
    let volume = cut_l_block((0.9, 0.9));
    assert!(volume > 3.0 - 0.5 * octagon_area(0.2));
    assert_relative_eq!(volume, 3.0 - 0.5 * (octagon_area(0.2) - outside_notch), max_relative = 1e-6);
}
