//! # Mesh Tallies
//!
//! Regular 3D mesh tallies over an axis-aligned box. Cells are indexed
//! with `x` varying fastest, then `y`, then `z`.
//!
//! ## Example
//!
//! ```rust
//! use neutronics_model::{define_tally, TallyKind, TallyQuantity};
//! use reactor_geometry::BoundingBox;
//!
//! let bounds = BoundingBox::new((-1.15, -0.6, -1.25), (1.15, 0.6, 1.75));
//! let tally = define_tally(TallyKind::Mesh3D, [25, 5, 25], bounds, TallyQuantity::Heating)?;
//! assert_eq!(tally.name(), "heating_on_3D_mesh");
//! assert_eq!(tally.cell_count(), 3125);
//! # Ok::<(), neutronics_model::ModelError>(())
//! ```

use crate::error::ModelError;
use config::constants::{mesh_tally_name, MAX_TALLY_CELLS};
use glam::DVec3;
use reactor_geometry::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mesh axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Scored quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TallyQuantity {
    #[serde(rename = "heating")]
    Heating,
    #[serde(rename = "neutron_effective_dose")]
    NeutronEffectiveDose,
    #[serde(rename = "photon_effective_dose")]
    PhotonEffectiveDose,
    #[serde(rename = "flux")]
    Flux,
    #[serde(rename = "damage-energy")]
    DamageEnergy,
    /// Tritium production
    #[serde(rename = "(n,Xt)")]
    TritiumProduction,
}

impl TallyQuantity {
    pub const ALL: [TallyQuantity; 6] = [
        TallyQuantity::Heating,
        TallyQuantity::NeutronEffectiveDose,
        TallyQuantity::PhotonEffectiveDose,
        TallyQuantity::Flux,
        TallyQuantity::DamageEnergy,
        TallyQuantity::TritiumProduction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TallyQuantity::Heating => "heating",
            TallyQuantity::NeutronEffectiveDose => "neutron_effective_dose",
            TallyQuantity::PhotonEffectiveDose => "photon_effective_dose",
            TallyQuantity::Flux => "flux",
            TallyQuantity::DamageEnergy => "damage-energy",
            TallyQuantity::TritiumProduction => "(n,Xt)",
        }
    }

    /// Whether scoring needs photon transport.
    pub fn needs_photons(self) -> bool {
        matches!(self, TallyQuantity::PhotonEffectiveDose)
    }
}

impl fmt::Display for TallyQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TallyQuantity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| ModelError::UnknownQuantity(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyKind {
    Mesh3D,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshTally {
    name: String,
    kind: TallyKind,
    resolution: [u32; 3],
    bounds: BoundingBox,
    quantity: TallyQuantity,
}

/// Validates a mesh tally named `<quantity>_on_3D_mesh`.
///
/// # Errors
///
/// - `Resolution` when any component is zero
/// - `Bounds` when the box has zero, negative or non-finite extent
/// - `TooManyCells` above the global cell limit
pub fn define_tally(
    kind: TallyKind,
    resolution: [u32; 3],
    bounding_box: BoundingBox,
    quantity: TallyQuantity,
) -> Result<MeshTally, ModelError> {
    if resolution.contains(&0) {
        return Err(ModelError::Resolution(resolution));
    }
    let (lower, upper) = (bounding_box.lower, bounding_box.upper);
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(ModelError::Bounds("corners are not finite".into()));
    }
    if upper.cmple(lower).any() {
        return Err(ModelError::Bounds(format!(
            "upper corner {upper} must exceed lower corner {lower} on every axis"
        )));
    }
    let cells = resolution.iter().map(|&n| n as u64).product::<u64>();
    if cells > MAX_TALLY_CELLS {
        return Err(ModelError::TooManyCells {
            cells,
            max: MAX_TALLY_CELLS,
        });
    }

    Ok(MeshTally {
        name: mesh_tally_name(quantity.as_str()),
        kind,
        resolution,
        bounds: bounding_box,
        quantity,
    })
}

impl MeshTally {
    /// Replaces the default name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TallyKind {
        self.kind
    }

    pub fn resolution(&self) -> [u32; 3] {
        self.resolution
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn quantity(&self) -> TallyQuantity {
        self.quantity
    }

    pub fn cell_count(&self) -> u64 {
        self.resolution.iter().map(|&n| n as u64).product()
    }

    pub fn cell_size(&self) -> DVec3 {
        let [nx, ny, nz] = self.resolution;
        self.bounds.extent() / DVec3::new(nx as f64, ny as f64, nz as f64)
    }

    /// Flat index of cell `(i, j, k)`.
    #[inline]
    pub fn cell_index(&self, i: u32, j: u32, k: u32) -> usize {
        let [nx, ny, _] = self.resolution;
        (k as usize * ny as usize + j as usize) * nx as usize + i as usize
    }

    /// Cell centers in flat index order.
    pub fn cell_centroids(&self) -> Vec<DVec3> {
        let [nx, ny, nz] = self.resolution;
        let size = self.cell_size();
        let mut centroids = Vec::with_capacity(self.cell_count() as usize);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let offset = DVec3::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5);
                    centroids.push(self.bounds.lower + offset * size);
                }
            }
        }
        centroids
    }

    /// Cell boundaries along one axis.
    pub fn edges(&self, axis: Axis) -> Vec<f64> {
        let a = axis.index();
        let n = self.resolution[a];
        let lower = self.bounds.lower[a];
        let step = self.cell_size()[a];
        (0..=n).map(|i| lower + step * i as f64).collect()
    }

    /// Whether the tally box covers `bounds`.
    pub fn encloses(&self, bounds: &BoundingBox) -> bool {
        self.bounds.contains(bounds)
    }
}

/// Tallies with unique names, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TallySet {
    tallies: Vec<MeshTally>,
}

impl TallySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tally: MeshTally) -> Result<(), ModelError> {
        if self.get(tally.name()).is_some() {
            return Err(ModelError::DuplicateTally(tally.name));
        }
        self.tallies.push(tally);
        Ok(())
    }

    /// Collects tallies, failing on the first repeated name.
    pub fn from_tallies(tallies: impl IntoIterator<Item = MeshTally>) -> Result<Self, ModelError> {
        let mut set = Self::new();
        for tally in tallies {
            set.add(tally)?;
        }
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&MeshTally> {
        self.tallies.iter().find(|t| t.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeshTally> {
        self.tallies.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tallies.iter().map(MeshTally::name).collect()
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}
