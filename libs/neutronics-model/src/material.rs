//! # Material Catalog
//!
//! Named compositions of natural elements with a density, an optional
//! volume and a depletable flag.
//!
//! ## Example
//!
//! ```rust
//! use neutronics_model::{DensityUnit, MaterialCatalog, MaterialSpec};
//!
//! let mut catalog = MaterialCatalog::new();
//! let w = catalog.define_material(
//!     MaterialSpec::new("w")
//!         .add_element("W", 1.0)
//!         .density(19.3, DensityUnit::GramsPerCc)
//!         .volume(5.0)
//!         .depletable(true),
//! )?;
//! assert_eq!(catalog.material(w)?.volume(), Some(5.0));
//! # Ok::<(), neutronics_model::ModelError>(())
//! ```

use crate::element::{self, Element};
use crate::error::ModelError;
use config::constants::{ATOMS_PER_BARN_CM, AVOGADRO};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atoms per element symbol.
pub type Inventory = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityUnit {
    #[serde(rename = "g/cc")]
    GramsPerCc,
    #[serde(rename = "kg/m3")]
    KilogramsPerCubicMeter,
    #[serde(rename = "atom/b-cm")]
    AtomsPerBarnCm,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density {
    pub value: f64,
    pub unit: DensityUnit,
}

/// Basis of a component fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionKind {
    Atom,
    Weight,
}

/// One element of a composition, with its fraction as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub symbol: String,
    pub fraction: f64,
    pub kind: FractionKind,
}

/// Declaration consumed by [`MaterialCatalog::define_material`].
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSpec {
    name: String,
    components: Vec<(String, f64, FractionKind)>,
    density: Option<Density>,
    volume: Option<f64>,
    depletable: bool,
}

impl MaterialSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            density: None,
            volume: None,
            depletable: false,
        }
    }

    /// Adds an element by atom fraction.
    pub fn add_element(self, element: impl Into<String>, fraction: f64) -> Self {
        self.add_component(element, fraction, FractionKind::Atom)
    }

    /// Adds an element by weight fraction.
    pub fn add_element_weight(self, element: impl Into<String>, fraction: f64) -> Self {
        self.add_component(element, fraction, FractionKind::Weight)
    }

    pub fn add_component(mut self, element: impl Into<String>, fraction: f64, kind: FractionKind) -> Self {
        self.components.push((element.into(), fraction, kind));
        self
    }

    pub fn density(mut self, value: f64, unit: DensityUnit) -> Self {
        self.density = Some(Density { value, unit });
        self
    }

    /// Volume in cm³.
    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn depletable(mut self, depletable: bool) -> Self {
        self.depletable = depletable;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    name: String,
    components: Vec<Component>,
    density: Density,
    volume: Option<f64>,
    depletable: bool,
}

impl Material {
    fn from_spec(spec: MaterialSpec) -> Result<Self, ModelError> {
        let name = spec.name;
        if spec.components.is_empty() {
            return Err(ModelError::composition(&name, "no elements"));
        }

        let kind = spec.components[0].2;
        let mut components = Vec::with_capacity(spec.components.len());
        for (key, fraction, component_kind) in spec.components {
            let element = element::lookup(&key)
                .ok_or_else(|| ModelError::composition(&name, format!("unknown element '{key}'")))?;
            if !(fraction.is_finite() && fraction >= 0.0) {
                return Err(ModelError::composition(
                    &name,
                    format!("fraction of {} must be non-negative, got {fraction}", element.symbol),
                ));
            }
            if component_kind != kind {
                return Err(ModelError::composition(&name, "atom and weight fractions are mixed"));
            }
            components.push(Component {
                symbol: element.symbol.to_string(),
                fraction,
                kind,
            });
        }
        if components.iter().all(|c| c.fraction == 0.0) {
            return Err(ModelError::composition(&name, "all fractions are zero"));
        }

        let density = spec
            .density
            .ok_or_else(|| ModelError::density(&name, "density is not set"))?;
        if !(density.value.is_finite() && density.value > 0.0) {
            return Err(ModelError::density(
                &name,
                format!("density must be positive, got {}", density.value),
            ));
        }

        if let Some(volume) = spec.volume {
            if !(volume.is_finite() && volume > 0.0) {
                return Err(ModelError::MissingVolume(name));
            }
        }
        if spec.depletable && spec.volume.is_none() {
            return Err(ModelError::MissingVolume(name));
        }

        Ok(Self {
            name,
            components,
            density,
            volume: spec.volume,
            depletable: spec.depletable,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn volume(&self) -> Option<f64> {
        self.volume
    }

    pub fn is_depletable(&self) -> bool {
        self.depletable
    }

    fn elements(&self) -> impl Iterator<Item = (&'static Element, f64)> + '_ {
        self.components
            .iter()
            .filter_map(|c| element::lookup(&c.symbol).map(|e| (e, c.fraction)))
    }

    /// Normalized atom fraction per element symbol.
    pub fn atom_fractions(&self) -> BTreeMap<String, f64> {
        let raw: Vec<(&Element, f64)> = match self.components.first().map(|c| c.kind) {
            Some(FractionKind::Weight) => self
                .elements()
                .map(|(e, w)| (e, w / e.atomic_weight))
                .collect(),
            _ => self.elements().collect(),
        };
        let total: f64 = raw.iter().map(|(_, f)| f).sum();
        let mut fractions = BTreeMap::new();
        for (element, f) in raw {
            *fractions.entry(element.symbol.to_string()).or_insert(0.0) += f / total;
        }
        fractions
    }

    /// Atoms per cm³.
    pub fn number_density(&self) -> f64 {
        let fractions = self.atom_fractions();
        let mean_weight: f64 = fractions
            .iter()
            .filter_map(|(symbol, f)| element::lookup(symbol).map(|e| f * e.atomic_weight))
            .sum();
        match self.density.unit {
            DensityUnit::GramsPerCc => self.density.value * AVOGADRO / mean_weight,
            DensityUnit::KilogramsPerCubicMeter => self.density.value * 1e-3 * AVOGADRO / mean_weight,
            DensityUnit::AtomsPerBarnCm => self.density.value * ATOMS_PER_BARN_CM,
        }
    }

    /// Absolute atom count per element, `None` without a volume.
    pub fn atom_inventory(&self) -> Option<Inventory> {
        let volume = self.volume?;
        let total = self.number_density() * volume;
        Some(
            self.atom_fractions()
                .into_iter()
                .map(|(symbol, f)| (symbol, f * total))
                .collect(),
        )
    }
}

static NEXT_CATALOG_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a material inside the catalog that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle {
    catalog: u64,
    index: usize,
}

impl MaterialHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A volume tag bound to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub tag: String,
    pub material: MaterialHandle,
}

#[derive(Debug)]
pub struct MaterialCatalog {
    id: u64,
    materials: Vec<Material>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self {
            id: NEXT_CATALOG_ID.fetch_add(1, Ordering::Relaxed),
            materials: Vec::new(),
        }
    }

    /// Validates and stores a material. Names may repeat.
    pub fn define_material(&mut self, spec: MaterialSpec) -> Result<MaterialHandle, ModelError> {
        let material = Material::from_spec(spec)?;
        self.materials.push(material);
        Ok(MaterialHandle {
            catalog: self.id,
            index: self.materials.len() - 1,
        })
    }

    pub fn material(&self, handle: MaterialHandle) -> Result<&Material, ModelError> {
        if handle.catalog != self.id {
            return Err(ModelError::UnknownMaterial(handle.index));
        }
        self.materials
            .get(handle.index)
            .ok_or(ModelError::UnknownMaterial(handle.index))
    }

    /// Binds a `mat_<name>` tag to a material of this catalog.
    pub fn bind(&self, tag: impl Into<String>, material: MaterialHandle) -> Result<Binding, ModelError> {
        let tag = tag.into();
        if !is_valid_tag(&tag) {
            return Err(ModelError::InvalidTag(tag));
        }
        self.material(material)?;
        Ok(Binding { tag, material })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

fn is_valid_tag(tag: &str) -> bool {
    tag.strip_prefix(config::constants::MATERIAL_TAG_PREFIX)
        .is_some_and(|name| !name.is_empty() && !name.chars().any(char::is_whitespace))
}
