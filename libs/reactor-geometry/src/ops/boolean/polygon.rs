//! # Polygon for BSP Operations
//!
//! Convex planar polygon that can be split by a plane.

use super::plane::{Classification, Plane};
use glam::DVec3;

/// A convex polygon and the plane it lies in.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<DVec3>,
    plane: Plane,
}

/// Output buckets for [`Polygon::split`].
///
/// Coplanar polygons facing the splitting plane go to `coplanar_front`,
/// opposite-facing ones to `coplanar_back`.
#[derive(Debug, Default)]
pub struct SplitBuckets {
    pub coplanar_front: Vec<Polygon>,
    pub coplanar_back: Vec<Polygon>,
    pub front: Vec<Polygon>,
    pub back: Vec<Polygon>,
}

impl Polygon {
    /// `None` for fewer than three vertices or a degenerate leading triangle.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane = self.plane.flip();
    }

    fn classify(&self, plane: &Plane) -> Classification {
        let (mut front, mut back) = (false, false);
        for &v in &self.vertices {
            match plane.classify_point(v) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => {}
            }
        }
        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Sorts this polygon into `out` relative to `plane`, cutting it in two
    /// when it spans the plane. Pieces inherit this polygon's plane.
    pub fn split(self, plane: &Plane, out: &mut SplitBuckets) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            Classification::Front => out.front.push(self),
            Classification::Back => out.back.push(self),
            Classification::Spanning => {
                let n = self.vertices.len();
                let mut front_verts = Vec::with_capacity(n + 1);
                let mut back_verts = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let vi = self.vertices[i];
                    let vj = self.vertices[(i + 1) % n];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }
                    let crosses = matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crosses {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let hit = vi.lerp(vj, di / (di - dj));
                        front_verts.push(hit);
                        back_verts.push(hit);
                    }
                }

                if front_verts.len() >= 3 {
                    out.front.push(Polygon {
                        vertices: front_verts,
                        plane: self.plane,
                    });
                }
                if back_verts.len() >= 3 {
                    out.back.push(Polygon {
                        vertices: back_verts,
                        plane: self.plane,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(-1.0, -1.0, 0.0),
            DVec3::new(1.0, -1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(-1.0, 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_flip_reverses_winding() {
        let mut poly = square();
        let first = poly.vertices()[0];
        poly.flip();
        assert_eq!(poly.vertices()[3], first);
        assert!((poly.plane().normal() + DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_split_spanning_square() {
        let mut out = SplitBuckets::default();
        square().split(&Plane::new(DVec3::X, 0.0), &mut out);
        assert_eq!(out.front.len(), 1);
        assert_eq!(out.back.len(), 1);
        assert_eq!(out.front[0].vertices().len(), 4);
        assert!(out.front[0].vertices().iter().all(|v| v.x >= 0.0));
        // Pieces keep the parent plane
        assert_eq!(out.back[0].plane(), square().plane());
    }

    #[test]
    fn test_split_coplanar_by_orientation() {
        let mut out = SplitBuckets::default();
        square().split(&Plane::new(DVec3::Z, 0.0), &mut out);
        square().split(&Plane::new(DVec3::NEG_Z, 0.0), &mut out);
        assert_eq!(out.coplanar_front.len(), 1);
        assert_eq!(out.coplanar_back.len(), 1);
    }
}
