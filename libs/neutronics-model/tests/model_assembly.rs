//! Builds models on top of an exported three-part mesh: grey block with
//! a hole, red and blue rings in the hole.

use neutronics_model::{
    define_source, define_tally, resolve_bindings, AngleDistribution, DagmcGeometry, DensityUnit,
    DepletionSchedule, EnergyDistribution, MaterialCatalog, MaterialHandle, MaterialSpec, Model, ModelError,
    ReactionChain, RunMode, SimulationSettings, SpaceDistribution, TallyKind, TallyQuantity, TallySet,
};
use pipeline_types::Stage;
use reactor_geometry::{export_volume_mesh, BoundingBox, MeshFile, MeshingOptions, ShapeRegistry, ShapeSpec, Workplane};
use std::path::Path;

fn export_parts(dir: &Path) -> MeshFile {
    let mut registry = ShapeRegistry::new();
    let hole = registry
        .define_shape(ShapeSpec::extrude_circle("part0.stl", (0.0, 0.0), 0.95, 1.2))
        .unwrap();
    let grey = registry
        .define_shape(
            ShapeSpec::extrude_polygon(
                "grey_part",
                [(-1.15, -1.25), (1.15, -1.25), (1.15, 1.75), (-1.15, 1.75)],
                1.2,
            )
            .cut(hole),
        )
        .unwrap();
    let red = registry
        .define_shape(
            ShapeSpec::rotate_polygon("red_part", [(0.75, -0.6), (0.95, -0.6), (0.95, 0.6), (0.75, 0.6)], 360.0)
                .workplane(Workplane::XY),
        )
        .unwrap();
    let blue = registry
        .define_shape(
            ShapeSpec::rotate_polygon("blue_part", [(0.6, -0.6), (0.75, -0.6), (0.75, 0.6), (0.6, 0.6)], 360.0)
                .workplane(Workplane::XY),
        )
        .unwrap();
    let assembly = registry.build_assembly(&[grey, red, blue]).unwrap();
    export_volume_mesh(&assembly, MeshingOptions::new(1.0, 2.0), dir.join("dagmc.json")).unwrap()
}

struct Materials {
    catalog: MaterialCatalog,
    w: MaterialHandle,
    zirconium: MaterialHandle,
    cr: MaterialHandle,
    copper: MaterialHandle,
}

fn materials() -> Materials {
    let mut catalog = MaterialCatalog::new();
    let w = catalog
        .define_material(
            MaterialSpec::new("w")
                .add_element("W", 1.0)
                .density(19.3, DensityUnit::GramsPerCc)
                .volume(5.0)
                .depletable(true),
        )
        .unwrap();
    let zirconium = catalog
        .define_material(
            MaterialSpec::new("zirconium")
                .add_element("zirconium", 1.0)
                .density(6.6, DensityUnit::GramsPerCc),
        )
        .unwrap();
    let cr = catalog
        .define_material(
            MaterialSpec::new("cr")
                .add_element("Cr", 1.0)
                .density(7.19, DensityUnit::GramsPerCc),
        )
        .unwrap();
    let copper = catalog
        .define_material(
            MaterialSpec::new("copper")
                .add_element("copper", 1.0)
                .density(8.96, DensityUnit::GramsPerCc)
                .volume(2.0)
                .depletable(true),
        )
        .unwrap();
    Materials {
        catalog,
        w,
        zirconium,
        cr,
        copper,
    }
}

fn settings() -> SimulationSettings {
    let source = define_source(
        SpaceDistribution::point((0.0, 0.0, 5.0)),
        AngleDistribution::Isotropic,
        EnergyDistribution::dt_line(),
    )
    .unwrap();
    SimulationSettings::default().source(source)
}

#[test]
fn test_each_part_binds_one_to_one() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_file = export_parts(dir.path());
    let m = materials();

    for blue_material in [m.cr, m.zirconium] {
        let bindings = vec![
            m.catalog.bind("mat_blue_part", blue_material).unwrap(),
            m.catalog.bind("mat_grey_part", m.w).unwrap(),
            m.catalog.bind("mat_red_part", m.copper).unwrap(),
        ];
        let set = resolve_bindings(&mesh_file.tags, &bindings, &m.catalog).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.diagnostics.is_empty());
    }
}

#[test]
fn test_depletable_volume_survives_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_file = export_parts(dir.path());
    let m = materials();
    let bindings = vec![
        m.catalog.bind("mat_blue_part", m.cr).unwrap(),
        m.catalog.bind("mat_grey_part", m.w).unwrap(),
        m.catalog.bind("mat_red_part", m.copper).unwrap(),
    ];
    let set = resolve_bindings(&mesh_file.tags, &bindings, &m.catalog).unwrap();
    assert_eq!(set.get("mat_grey_part").unwrap().volume(), Some(5.0));
    assert_eq!(set.get("mat_red_part").unwrap().volume(), Some(2.0));
    assert_eq!(set.depletable().count(), 2);
}

#[test]
fn test_missing_binding_names_the_tag() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_file = export_parts(dir.path());
    let m = materials();
    let bindings = vec![
        m.catalog.bind("mat_grey_part", m.w).unwrap(),
        m.catalog.bind("mat_red_part", m.copper).unwrap(),
    ];
    match resolve_bindings(&mesh_file.tags, &bindings, &m.catalog) {
        Err(ModelError::UnboundTag(tags)) => assert_eq!(tags, vec!["mat_blue_part"]),
        other => panic!("expected UnboundTag, got {other:?}"),
    }
}

#[test]
fn test_tally_over_geometry_corners() {
    let dir = tempfile::tempdir().unwrap();
    let geometry = DagmcGeometry::from_mesh_file(&export_parts(dir.path()));
    let corners = geometry.corners();

    let tally = define_tally(TallyKind::Mesh3D, [25, 5, 25], corners, TallyQuantity::Heating).unwrap();
    assert_eq!(tally.cell_count(), 3125);
    assert!(tally.cell_centroids().iter().all(|c| corners.contains_point(*c)));
}

#[test]
fn test_model_assembly_and_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_file = export_parts(dir.path());
    let m = materials();
    let bindings = vec![
        m.catalog.bind("mat_blue_part", m.zirconium).unwrap(),
        m.catalog.bind("mat_grey_part", m.w).unwrap(),
        m.catalog.bind("mat_red_part", m.copper).unwrap(),
    ];
    let set = resolve_bindings(&mesh_file.tags, &bindings, &m.catalog).unwrap();
    let geometry = DagmcGeometry::open(&mesh_file.path).unwrap().with_vacuum_sphere();
    assert_eq!(geometry.tags(), mesh_file.tags.as_slice());

    let corners = geometry.corners();
    let small = BoundingBox::new((-0.5, -0.5, -0.5), (0.5, 0.5, 0.5));
    let tallies = TallySet::from_tallies([
        define_tally(TallyKind::Mesh3D, [25, 5, 25], corners, TallyQuantity::Heating).unwrap(),
        define_tally(TallyKind::Mesh3D, [25, 5, 25], corners, TallyQuantity::NeutronEffectiveDose).unwrap(),
        define_tally(TallyKind::Mesh3D, [5, 5, 5], small, TallyQuantity::Flux).unwrap(),
    ])
    .unwrap();

    let model = Model::new(geometry, set, settings(), tallies).unwrap();
    assert_eq!(model.run_mode(), RunMode::FixedSource);
    let subjects: Vec<_> = model
        .diagnostics()
        .iter()
        .filter_map(|d| d.diagnostic.subject.as_deref())
        .collect();
    assert_eq!(subjects, vec!["flux_on_3D_mesh"]);
    assert_eq!(model.diagnostics()[0].stage, Stage::Tallies);

    let schedule = DepletionSchedule::new(ReactionChain::new(dir.path().join("chain.xml")), [(31_536_000.0, 1e9)]).unwrap();
    let model = model.with_depletion(schedule);
    assert_eq!(model.run_mode(), RunMode::Depletion);
    assert_eq!(model.depletion().unwrap().steps().len(), 1);
}

#[test]
fn test_model_rejects_settings_without_source() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_file = export_parts(dir.path());
    let m = materials();
    let bindings = vec![
        m.catalog.bind("mat_blue_part", m.cr).unwrap(),
        m.catalog.bind("mat_grey_part", m.w).unwrap(),
        m.catalog.bind("mat_red_part", m.copper).unwrap(),
    ];
    let set = resolve_bindings(&mesh_file.tags, &bindings, &m.catalog).unwrap();
    let result = Model::new(
        DagmcGeometry::from_mesh_file(&mesh_file),
        set,
        SimulationSettings::default(),
        TallySet::new(),
    );
    assert!(matches!(result, Err(ModelError::Settings(_))));
}

#[test]
fn test_depletion_mode_needs_a_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_file = export_parts(dir.path());
    let m = materials();
    let bindings = vec![
        m.catalog.bind("mat_blue_part", m.cr).unwrap(),
        m.catalog.bind("mat_grey_part", m.w).unwrap(),
        m.catalog.bind("mat_red_part", m.copper).unwrap(),
    ];
    let set = resolve_bindings(&mesh_file.tags, &bindings, &m.catalog).unwrap();
    let result = Model::new(
        DagmcGeometry::from_mesh_file(&mesh_file),
        set.clone(),
        settings().run_mode(RunMode::Depletion),
        TallySet::new(),
    );
    assert!(matches!(result, Err(ModelError::Settings(_))));

    let model = Model::new(DagmcGeometry::from_mesh_file(&mesh_file), set, settings(), TallySet::new()).unwrap();
    assert_eq!(model.run_mode(), RunMode::FixedSource);
    assert_eq!(model.settings().run_mode, RunMode::FixedSource);
    assert!(model.depletion().is_none());
}
