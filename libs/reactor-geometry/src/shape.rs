//! # Shapes
//!
//! Named solid primitives as declared by the caller ([`ShapeSpec`]) and as
//! stored in a registry after validation ([`Shape`]).
//!
//! ## Example
//!
//! ```rust
//! use reactor_geometry::{ShapeSpec, Workplane};
//!
//! let spec = ShapeSpec::rotate_polygon(
//!     "red_part",
//!     [(0.75, -0.6), (0.95, -0.6), (0.95, 0.6), (0.75, 0.6)],
//!     360.0,
//! )
//! .workplane(Workplane::XY)
//! .color([0.5, 0.0, 0.0]);
//! assert_eq!(spec.name(), "red_part");
//! ```

use crate::error::GeometryError;
use crate::mesh::SurfaceMesh;
use crate::ops::extrude::{extrude_profile, revolve_profile};
use crate::profile::Profile;
use crate::workplane::Workplane;
use config::constants::{compute_segments, DEFAULT_COLOR};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Identifies a shape inside the registry that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHandle {
    pub(crate) registry: u64,
    pub(crate) index: usize,
}

impl ShapeHandle {
    /// Position of the shape in registration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// The three primitive kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeGeometry {
    /// Circle centred on `center`, extruded by `distance`
    ExtrudeCircle {
        center: DVec2,
        radius: f64,
        distance: f64,
    },
    /// Straight-edged profile extruded by `distance`
    ExtrudePolygon { points: Vec<DVec2>, distance: f64 },
    /// Straight-edged profile revolved by `rotation_angle` degrees
    RotatePolygon {
        points: Vec<DVec2>,
        rotation_angle: f64,
    },
}

impl ShapeGeometry {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeGeometry::ExtrudeCircle { .. } => "extrude_circle",
            ShapeGeometry::ExtrudePolygon { .. } => "extrude_polygon",
            ShapeGeometry::RotatePolygon { .. } => "rotate_polygon",
        }
    }
}

/// Declaration of a shape, consumed by
/// [`ShapeRegistry::define_shape`](crate::ShapeRegistry::define_shape).
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    pub(crate) name: String,
    pub(crate) geometry: ShapeGeometry,
    pub(crate) workplane: Workplane,
    pub(crate) color: [f32; 3],
    pub(crate) cut: Option<ShapeHandle>,
}

fn collect_points<P: Into<DVec2>>(points: impl IntoIterator<Item = P>) -> Vec<DVec2> {
    points.into_iter().map(Into::into).collect()
}

impl ShapeSpec {
    fn new(name: impl Into<String>, geometry: ShapeGeometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            workplane: Workplane::default(),
            color: DEFAULT_COLOR,
            cut: None,
        }
    }

    pub fn extrude_circle(
        name: impl Into<String>,
        center: impl Into<DVec2>,
        radius: f64,
        distance: f64,
    ) -> Self {
        Self::new(
            name,
            ShapeGeometry::ExtrudeCircle {
                center: center.into(),
                radius,
                distance,
            },
        )
    }

    pub fn extrude_polygon<P: Into<DVec2>>(
        name: impl Into<String>,
        points: impl IntoIterator<Item = P>,
        distance: f64,
    ) -> Self {
        Self::new(
            name,
            ShapeGeometry::ExtrudePolygon {
                points: collect_points(points),
                distance,
            },
        )
    }

    pub fn rotate_polygon<P: Into<DVec2>>(
        name: impl Into<String>,
        points: impl IntoIterator<Item = P>,
        rotation_angle: f64,
    ) -> Self {
        Self::new(
            name,
            ShapeGeometry::RotatePolygon {
                points: collect_points(points),
                rotation_angle,
            },
        )
    }

    pub fn workplane(mut self, workplane: Workplane) -> Self {
        self.workplane = workplane;
        self
    }

    pub fn color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Subtracts `tool` from this shape when meshing.
    pub fn cut(mut self, tool: ShapeHandle) -> Self {
        self.cut = Some(tool);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A validated, immutable shape.
#[derive(Debug, Clone)]
pub struct Shape {
    name: String,
    geometry: ShapeGeometry,
    workplane: Workplane,
    color: [f32; 3],
    cut: Option<ShapeHandle>,
    /// Validated profile for polygon kinds
    profile: Option<Profile>,
}

impl Shape {
    /// Checks the geometric parameters of `spec`. Name and cut handle are
    /// checked by the registry.
    pub(crate) fn from_spec(spec: ShapeSpec) -> Result<Self, GeometryError> {
        let name = spec.name.as_str();
        let profile = match &spec.geometry {
            ShapeGeometry::ExtrudeCircle {
                center,
                radius,
                distance,
            } => {
                if !center.is_finite() {
                    return Err(GeometryError::degenerate(name, "non-finite circle center"));
                }
                if !(radius.is_finite() && *radius > 0.0) {
                    return Err(GeometryError::invalid_parameter(
                        name,
                        "radius",
                        format!("radius must be positive, got {radius}"),
                    ));
                }
                check_distance(name, *distance)?;
                None
            }
            ShapeGeometry::ExtrudePolygon { points, distance } => {
                let profile = Profile::new(name, points)?;
                check_distance(name, *distance)?;
                Some(profile)
            }
            ShapeGeometry::RotatePolygon {
                points,
                rotation_angle,
            } => {
                let profile = Profile::new(name, points)?;
                if !(*rotation_angle > 0.0 && *rotation_angle <= 360.0) {
                    return Err(GeometryError::invalid_parameter(
                        name,
                        "rotation_angle",
                        format!("rotation angle must be in (0, 360], got {rotation_angle}"),
                    ));
                }
                if profile.min_u() < 0.0 {
                    return Err(GeometryError::invalid_parameter(
                        name,
                        "points",
                        "revolved profile must not cross the rotation axis",
                    ));
                }
                Some(profile)
            }
        };

        Ok(Self {
            name: spec.name,
            geometry: spec.geometry,
            workplane: spec.workplane,
            color: spec.color,
            cut: spec.cut,
            profile,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn workplane(&self) -> Workplane {
        self.workplane
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn cut(&self) -> Option<ShapeHandle> {
        self.cut
    }

    /// Smallest dimension of the solid that the mesh has to resolve:
    /// shortest profile edge (or circle diameter) and extrusion distance.
    pub fn feature_size(&self) -> f64 {
        match (&self.geometry, &self.profile) {
            (ShapeGeometry::ExtrudeCircle { radius, distance, .. }, _) => (2.0 * radius).min(*distance),
            (ShapeGeometry::ExtrudePolygon { distance, .. }, Some(profile)) => {
                profile.min_edge_length().min(*distance)
            }
            (_, Some(profile)) => profile.min_edge_length(),
            (_, None) => f64::INFINITY,
        }
    }

    /// Closed triangle surface with edges no longer than `max_size` along
    /// curved directions.
    pub fn tessellate(&self, max_size: f64) -> Result<SurfaceMesh, GeometryError> {
        match (&self.geometry, &self.profile) {
            (
                ShapeGeometry::ExtrudeCircle {
                    center,
                    radius,
                    distance,
                },
                _,
            ) => {
                let segments = compute_segments(*radius, 360.0, max_size);
                let circle = Profile::circle(*center, *radius, segments);
                extrude_profile(&self.name, &circle, self.workplane, *distance)
            }
            (ShapeGeometry::ExtrudePolygon { distance, .. }, Some(profile)) => {
                extrude_profile(&self.name, profile, self.workplane, *distance)
            }
            (ShapeGeometry::RotatePolygon { rotation_angle, .. }, Some(profile)) => {
                let reach = profile.points().iter().map(|p| p.x).fold(0.0, f64::max);
                let segments = compute_segments(reach, *rotation_angle, max_size);
                revolve_profile(&self.name, profile, self.workplane, *rotation_angle, segments)
            }
            (_, None) => Err(GeometryError::degenerate(&self.name, "missing profile")),
        }
    }
}

fn check_distance(shape: &str, distance: f64) -> Result<(), GeometryError> {
    if distance.is_finite() && distance > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(
            shape,
            "distance",
            format!("extrusion distance must be positive, got {distance}"),
        ))
    }
}
