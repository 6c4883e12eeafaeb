//! # Axis-Aligned Bounds
//!
//! Bounding boxes for tessellated volumes, assemblies and tally meshes.

use config::constants::EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its lower and upper corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lower: DVec3,
    pub upper: DVec3,
}

impl BoundingBox {
    /// Creates a box from two corners. No ordering is enforced here;
    /// tally configuration validates the extent explicitly.
    pub fn new(lower: impl Into<DVec3>, upper: impl Into<DVec3>) -> Self {
        Self {
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (lower, upper) = iter.fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self { lower, upper })
    }

    /// Size along each axis.
    #[inline]
    pub fn extent(&self) -> DVec3 {
        self.upper - self.lower
    }

    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.lower + self.upper) * 0.5
    }

    /// Volume, zero for inverted boxes.
    pub fn volume(&self) -> f64 {
        let e = self.extent().max(DVec3::ZERO);
        e.x * e.y * e.z
    }

    /// Half of the space diagonal.
    pub fn circumradius(&self) -> f64 {
        self.extent().length() * 0.5
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }

    /// Overlap of two boxes, `None` unless it has positive volume.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let lower = self.lower.max(other.lower);
        let upper = self.upper.min(other.upper);
        let e = upper - lower;
        if e.x > EPSILON && e.y > EPSILON && e.z > EPSILON {
            Some(BoundingBox { lower, upper })
        } else {
            None
        }
    }

    /// True if `point` lies inside or on the boundary (within EPSILON).
    pub fn contains_point(&self, point: DVec3) -> bool {
        let lo = self.lower - DVec3::splat(EPSILON);
        let hi = self.upper + DVec3::splat(EPSILON);
        point.cmpge(lo).all() && point.cmple(hi).all()
    }

    /// True if `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.contains_point(other.lower) && self.contains_point(other.upper)
    }
}
