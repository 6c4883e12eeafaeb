//! Three-part reactor fixture and in-process engine doubles.

#![allow(dead_code)]

use config::constants::MESH_FILE_NAME;
use neutronics_model::{
    define_source, define_tally, resolve_bindings, AngleDistribution, DagmcGeometry, DensityUnit,
    DepletionStep, EnergyDistribution, MaterialCatalog, MaterialSpec, Model, ReactionChain,
    SimulationSettings, SpaceDistribution, TallyKind, TallyQuantity, TallySet,
};
use neutronics_run::{
    DepletionSolver, Deck, EngineFault, Inventories, ReactionRates, StatePoint, TallyResult,
    TransportEngine, TransportSolution,
};
use reactor_geometry::{export_volume_mesh, MeshFile, MeshingOptions, ShapeRegistry, ShapeSpec, Workplane};
use std::collections::BTreeMap;
use std::path::Path;

/// Reactions per atom per source particle reported for every element.
pub const RATE_PER_SOURCE_PARTICLE: f64 = 1e-24;

/// Grey block with a cylindrical hole holding the red and blue rings.
pub fn export_parts(dir: &Path) -> MeshFile {
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
    export_volume_mesh(&assembly, MeshingOptions::new(1.0, 2.0), dir.join(MESH_FILE_NAME)).unwrap()
}

/// Which material fills the blue part, and whether materials carry
/// volumes for depletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Chromium blue part, depletable tungsten and copper
    Depletion,
    /// Zirconium blue part, no volumes
    FixedSource,
}

pub fn model(mesh_file: &MeshFile, layout: Layout, batches: u32) -> Model {
    let depletion = layout == Layout::Depletion;
    let mut catalog = MaterialCatalog::new();
    let with_volume = |spec: MaterialSpec, volume: f64| {
        if depletion {
            spec.volume(volume).depletable(true)
        } else {
            spec
        }
    };

    let w = catalog
        .define_material(with_volume(
            MaterialSpec::new("w").add_element("W", 1.0).density(19.3, DensityUnit::GramsPerCc),
            5.0,
        ))
        .unwrap();
    let zirconium = catalog
        .define_material(MaterialSpec::new("zirconium").add_element("zirconium", 1.0).density(6.6, DensityUnit::GramsPerCc))
        .unwrap();
    let cr = catalog
        .define_material(MaterialSpec::new("cr").add_element("Cr", 1.0).density(7.19, DensityUnit::GramsPerCc))
        .unwrap();
    let copper = catalog
        .define_material(with_volume(
            MaterialSpec::new("copper").add_element("copper", 1.0).density(8.96, DensityUnit::GramsPerCc),
            2.0,
        ))
        .unwrap();

    let blue = if depletion { cr } else { zirconium };
    let bindings = vec![
        catalog.bind("mat_blue_part", blue).unwrap(),
        catalog.bind("mat_grey_part", w).unwrap(),
        catalog.bind("mat_red_part", copper).unwrap(),
    ];
    let materials = resolve_bindings(&mesh_file.tags, &bindings, &catalog).unwrap();
    assert_eq!(materials.len(), 3);

    let geometry = DagmcGeometry::from_mesh_file(mesh_file).with_vacuum_sphere();
    let corners = geometry.corners();
    let tallies = TallySet::from_tallies([
        define_tally(TallyKind::Mesh3D, [25, 5, 25], corners, TallyQuantity::Heating).unwrap(),
        define_tally(TallyKind::Mesh3D, [25, 5, 25], corners, TallyQuantity::NeutronEffectiveDose).unwrap(),
    ])
    .unwrap();

    let mut settings = SimulationSettings::default().batches(batches).particles(1000);
    for x in [0.0, -1.0, 1.0] {
        settings = settings.source(
            define_source(
                SpaceDistribution::point((x, 0.0, 5.0)),
                AngleDistribution::Isotropic,
                EnergyDistribution::dt_line(),
            )
            .unwrap(),
        );
    }

    Model::new(geometry, materials, settings, tallies).unwrap()
}

pub fn write_chain(dir: &Path) -> ReactionChain {
    let path = dir.join("chain_endfb71_pwr.xml");
    std::fs::write(&path, "<depletion_chain/>").unwrap();
    ReactionChain::new(path)
}

/// Scores a uniform value in every tally cell and reports the same rate
/// for every element of every inventory it is given.
#[derive(Default)]
pub struct FakeTransport {
    pub inventories_seen: Vec<Inventories>,
    pub fail_with: Option<String>,
}

impl TransportEngine for FakeTransport {
    fn solve(&mut self, deck: &Deck, inventories: &Inventories) -> Result<TransportSolution, EngineFault> {
        self.inventories_seen.push(inventories.clone());
        if let Some(message) = &self.fail_with {
            return Err(EngineFault::Internal(message.clone()));
        }

        let tallies = deck
            .tallies
            .iter()
            .map(|t| {
                let n = t.cell_count() as usize;
                TallyResult::new(t, vec![1.0; n], vec![0.1; n])
            })
            .collect();
        let statepoint = deck.statepoint_path();
        StatePoint {
            batches: deck.batches(),
            particles: deck.settings.simulation.particles,
            tallies,
        }
        .write(&statepoint)
        .map_err(|e| EngineFault::Internal(e.to_string()))?;

        let reaction_rates: ReactionRates = inventories
            .iter()
            .map(|(tag, inventory)| {
                let rates = inventory
                    .keys()
                    .map(|element| (element.clone(), RATE_PER_SOURCE_PARTICLE))
                    .collect::<BTreeMap<_, _>>();
                (tag.clone(), rates)
            })
            .collect();
        Ok(TransportSolution {
            statepoint,
            reaction_rates,
        })
    }
}

/// Pure first-order removal: every element decays at its reaction rate.
#[derive(Default)]
pub struct FakeDepletion {
    pub steps_seen: Vec<DepletionStep>,
}

impl DepletionSolver for FakeDepletion {
    fn advance(
        &mut self,
        _chain: &ReactionChain,
        inventories: &Inventories,
        rates: &ReactionRates,
        step: &DepletionStep,
    ) -> Result<Inventories, EngineFault> {
        self.steps_seen.push(*step);
        Ok(inventories
            .iter()
            .map(|(tag, inventory)| {
                let advanced = inventory
                    .iter()
                    .map(|(element, atoms)| {
                        let rate = rates.get(tag).and_then(|r| r.get(element)).copied().unwrap_or(0.0);
                        (element.clone(), atoms * (-rate * step.duration).exp())
                    })
                    .collect();
                (tag.clone(), advanced)
            })
            .collect())
    }
}
