//! # Workplanes
//!
//! A workplane maps 2D profile coordinates `(u, v)` into model space.
//! Each plane is a right-handed frame: `u × v = normal`.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Workplane {
    /// u → X, v → Y, normal +Z
    XY,
    /// u → X, v → Z, normal −Y
    #[default]
    XZ,
    /// u → Y, v → Z, normal +X
    YZ,
}

impl Workplane {
    /// Returns the `(u, v, normal)` axes in model space.
    pub fn axes(self) -> (DVec3, DVec3, DVec3) {
        match self {
            Workplane::XY => (DVec3::X, DVec3::Y, DVec3::Z),
            Workplane::XZ => (DVec3::X, DVec3::Z, DVec3::NEG_Y),
            Workplane::YZ => (DVec3::Y, DVec3::Z, DVec3::X),
        }
    }

    /// Places a profile point `offset` units along the plane normal.
    #[inline]
    pub fn to_model(self, point: DVec2, offset: f64) -> DVec3 {
        let (u, v, n) = self.axes();
        u * point.x + v * point.y + n * offset
    }

    /// Revolves a profile point by `theta` radians about the plane's v axis.
    ///
    /// `point.x` is the distance from the axis, `point.y` the position
    /// along it. The sweep turns from `u` toward the normal.
    #[inline]
    pub fn revolve(self, point: DVec2, theta: f64) -> DVec3 {
        let (u, v, n) = self.axes();
        let (sin, cos) = theta.sin_cos();
        (u * cos + n * sin) * point.x + v * point.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_right_handed() {
        for plane in [Workplane::XY, Workplane::XZ, Workplane::YZ] {
            let (u, v, n) = plane.axes();
            assert!((u.cross(v) - n).length() < 1e-12, "{plane:?}");
        }
    }

    #[test]
    fn test_xz_maps_second_coordinate_to_z() {
        let p = Workplane::XZ.to_model(DVec2::new(1.15, 1.75), 0.6);
        assert!((p - DVec3::new(1.15, -0.6, 1.75)).length() < 1e-12);
    }

    #[test]
    fn test_revolve_about_y_for_xy_plane() {
        let p = Workplane::XY.revolve(DVec2::new(2.0, 0.5), std::f64::consts::FRAC_PI_2);
        assert!((p - DVec3::new(0.0, 0.5, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_default_is_xz() {
        assert_eq!(Workplane::default(), Workplane::XZ);
    }
}
