//! # Neutronics Model
//!
//! Declarative model of a fixed-source or depletion neutronics run over a
//! tagged volume mesh.
//!
//! ## Modules
//!
//! - [`material`]: catalog of element compositions and tag bindings
//! - [`binding`]: resolution of mesh tags to materials
//! - [`source`], [`tally`], [`settings`]: what to simulate and what to score
//! - [`depletion`]: irradiation schedule and reaction chain
//! - [`model`]: the validated bundle handed to the driver

pub mod binding;
pub mod depletion;
pub mod element;
pub mod error;
pub mod geometry;
pub mod material;
pub mod model;
pub mod settings;
pub mod source;
pub mod tally;

pub use binding::{resolve_bindings, BoundMaterial, MaterialSet};
pub use depletion::{DepletionSchedule, DepletionStep, ReactionChain};
pub use error::ModelError;
pub use geometry::{DagmcGeometry, VacuumSphere};
pub use material::{
    Binding, Component, Density, DensityUnit, FractionKind, Inventory, Material, MaterialCatalog,
    MaterialHandle, MaterialSpec,
};
pub use model::Model;
pub use settings::{RunMode, SimulationSettings};
pub use source::{define_source, AngleDistribution, EnergyDistribution, Source, SpaceDistribution};
pub use tally::{define_tally, Axis, MeshTally, TallyKind, TallyQuantity, TallySet};
