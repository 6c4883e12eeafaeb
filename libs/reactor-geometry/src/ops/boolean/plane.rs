//! # Plane for BSP Operations
//!
//! Oriented plane with point classification.

use config::constants::BSP_EPSILON;
use glam::DVec3;

/// Side of a plane a point or polygon lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Front,
    Back,
    Coplanar,
    /// Polygon has vertices on both sides
    Spanning,
}

/// A plane `normal · p = w` with unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Plane through three points, facing the side where they wind
    /// counter-clockwise. `None` for collinear points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a).try_normalize()?;
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn flip(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Positive in front, negative behind.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > BSP_EPSILON {
            Classification::Front
        } else if dist < -BSP_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}
