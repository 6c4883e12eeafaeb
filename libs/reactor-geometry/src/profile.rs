//! # 2D Profiles
//!
//! Closed, simple polygons that are extruded or revolved into solids.
//! A [`Profile`] is validated on construction and always stored
//! counter-clockwise.

use crate::error::GeometryError;
use config::constants::PROFILE_EPSILON;
use glam::DVec2;

/// A validated simple polygon in counter-clockwise order.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    points: Vec<DVec2>,
}

impl Profile {
    /// Validates `points` as a closed simple polygon.
    ///
    /// A repeated closing point is dropped. Fails on fewer than three
    /// points, non-finite coordinates, coincident consecutive points,
    /// zero area or self-intersection.
    pub fn new(shape: &str, points: &[DVec2]) -> Result<Self, GeometryError> {
        let mut points = points.to_vec();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(GeometryError::degenerate(
                shape,
                format!("profile needs at least 3 points, got {}", points.len()),
            ));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(GeometryError::degenerate(shape, "non-finite coordinate"));
        }

        let n = points.len();
        for i in 0..n {
            if points[i].distance(points[(i + 1) % n]) <= PROFILE_EPSILON {
                return Err(GeometryError::degenerate(
                    shape,
                    format!("points {} and {} coincide", i, (i + 1) % n),
                ));
            }
        }

        if let Some((first, second)) = find_self_intersection(&points) {
            return Err(GeometryError::SelfIntersecting {
                shape: shape.to_string(),
                first,
                second,
            });
        }

        let area = signed_area(&points);
        if area.abs() <= PROFILE_EPSILON {
            return Err(GeometryError::degenerate(shape, "profile has zero area"));
        }

        if area < 0.0 {
            points.reverse();
        }
        Ok(Self { points })
    }

    /// Regular polygon approximating a circle, counter-clockwise.
    pub fn circle(center: DVec2, radius: f64, segments: u32) -> Self {
        let segments = segments.max(3);
        let points = (0..segments)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / segments as f64;
                center + DVec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area (positive).
    pub fn area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Length of the shortest edge.
    pub fn min_edge_length(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| self.points[i].distance(self.points[(i + 1) % n]))
            .fold(f64::INFINITY, f64::min)
    }

    /// Smallest `u` coordinate, i.e. the closest approach to a revolution axis.
    pub fn min_u(&self) -> f64 {
        self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min)
    }

    /// Ear-clipping triangulation.
    ///
    /// Returns index triples in counter-clockwise order. Collinear
    /// leftovers that no ear can remove are fanned.
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let n = self.points.len();
        let mut remaining: Vec<usize> = (0..n).collect();
        let mut triangles = Vec::with_capacity(n.saturating_sub(2));

        while remaining.len() > 3 {
            let m = remaining.len();
            let ear = (0..m).find(|&i| {
                let prev = remaining[(i + m - 1) % m];
                let curr = remaining[i];
                let next = remaining[(i + 1) % m];
                is_ear(&self.points, &remaining, prev, curr, next)
            });
            match ear {
                Some(i) => {
                    let prev = remaining[(i + m - 1) % m];
                    let next = remaining[(i + 1) % m];
                    triangles.push([prev as u32, remaining[i] as u32, next as u32]);
                    remaining.remove(i);
                }
                None => break,
            }
        }

        for i in 1..remaining.len().saturating_sub(1) {
            triangles.push([
                remaining[0] as u32,
                remaining[i] as u32,
                remaining[i + 1] as u32,
            ]);
        }
        triangles
    }
}

/// Shoelace area, positive for counter-clockwise order.
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

/// First pair of non-adjacent edges that cross or touch.
fn find_self_intersection(points: &[DVec2]) -> Option<(usize, usize)> {
    let n = points.len();
    for i in 0..n {
        let (a1, a2) = (points[i], points[(i + 1) % n]);
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                continue;
            }
            let (b1, b2) = (points[j], points[(j + 1) % n]);
            if segments_intersect(a1, a2, b1, b2) {
                return Some((i, j));
            }
        }
    }
    None
}

#[inline]
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) - PROFILE_EPSILON
        && p.x <= a.x.max(b.x) + PROFILE_EPSILON
        && p.y >= a.y.min(b.y) - PROFILE_EPSILON
        && p.y <= a.y.max(b.y) + PROFILE_EPSILON
}

fn segments_intersect(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2) -> bool {
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);
    let eps = PROFILE_EPSILON;

    let straddles = |x: f64, y: f64| (x > eps && y < -eps) || (x < -eps && y > eps);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (d1.abs() <= eps && on_segment(q1, q2, p1))
        || (d2.abs() <= eps && on_segment(q1, q2, p2))
        || (d3.abs() <= eps && on_segment(p1, p2, q1))
        || (d4.abs() <= eps && on_segment(p1, p2, q2))
}

fn is_ear(points: &[DVec2], remaining: &[usize], prev: usize, curr: usize, next: usize) -> bool {
    let (a, b, c) = (points[prev], points[curr], points[next]);
    // reflex or collinear corner
    if orient(a, b, c) <= PROFILE_EPSILON {
        return false;
    }
    let m = remaining.len();
    !(0..m).any(|i| {
        let k = remaining[i];
        if k == prev || k == curr || k == next {
            return false;
        }
        let p = points[k];
        // only non-convex vertices can block an ear
        let before = points[remaining[(i + m - 1) % m]];
        let after = points[remaining[(i + 1) % m]];
        if orient(before, p, after) > PROFILE_EPSILON {
            return false;
        }
        let at_corner = [a, b, c].iter().any(|q| q.distance(p) <= PROFILE_EPSILON);
        !at_corner && inside_closed_triangle(p, a, b, c)
    })
}

/// Inside the triangle or on one of its edges.
fn inside_closed_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    orient(a, b, p) >= -PROFILE_EPSILON
        && orient(b, c, p) >= -PROFILE_EPSILON
        && orient(c, a, p) >= -PROFILE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<DVec2> {
        raw.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
    }

    fn grey_part() -> Vec<DVec2> {
        pts(&[(-1.15, -1.25), (1.15, -1.25), (1.15, 1.75), (-1.15, 1.75)])
    }

    #[test]
    fn test_rectangle_is_valid() {
        let profile = Profile::new("grey_part", &grey_part()).unwrap();
        assert_eq!(profile.len(), 4);
        assert!((profile.area() - 2.3 * 3.0).abs() < 1e-12);
        assert!((profile.min_edge_length() - 2.3).abs() < 1e-12);
    }

    #[test]
    fn test_clockwise_input_is_reversed() {
        let mut cw = grey_part();
        cw.reverse();
        let profile = Profile::new("cw", &cw).unwrap();
        assert!(profile.area() > 0.0);
    }

    #[test]
    fn test_closing_point_is_dropped() {
        let mut closed = grey_part();
        closed.push(closed[0]);
        let profile = Profile::new("closed", &closed).unwrap();
        assert_eq!(profile.len(), 4);
    }

    #[test]
    fn test_too_few_points() {
        let err = Profile::new("line", &pts(&[(0.0, 0.0), (1.0, 0.0)])).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateProfile { .. }));
    }

    #[test]
    fn test_zero_area() {
        let err = Profile::new("flat", &pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateProfile { .. }));
    }

    #[test]
    fn test_bowtie_self_intersects() {
        let bowtie = pts(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
        let err = Profile::new("bowtie", &bowtie).unwrap_err();
        assert_eq!(
            err,
            GeometryError::SelfIntersecting {
                shape: "bowtie".into(),
                first: 0,
                second: 2
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let bad = pts(&[(0.0, 0.0), (f64::NAN, 0.0), (0.0, 1.0)]);
        assert!(Profile::new("nan", &bad).is_err());
    }

    #[test]
    fn test_triangulate_convex() {
        let profile = Profile::new("grey_part", &grey_part()).unwrap();
        let tris = profile.triangulate();
        assert_eq!(tris.len(), 2);
        assert!((triangle_area_sum(&profile, &tris) - profile.area()).abs() < 1e-12);
    }

    fn triangle_area_sum(profile: &Profile, tris: &[[u32; 3]]) -> f64 {
        let p = profile.points();
        tris.iter()
            .map(|t| orient(p[t[0] as usize], p[t[1] as usize], p[t[2] as usize]) * 0.5)
            .sum()
    }

    #[test]
    fn test_triangulate_concave_l_shape() {
        // (1, 1) lies on the diagonal cut off by the ear at (0, 0)
        let l_shape = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let profile = Profile::new("l", &l_shape).unwrap();
        let tris = profile.triangulate();
        assert_eq!(tris.len(), 4);
        for t in &tris {
            let p = profile.points();
            assert!(orient(p[t[0] as usize], p[t[1] as usize], p[t[2] as usize]) > 0.0);
        }
        assert!((triangle_area_sum(&profile, &tris) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangulate_comb() {
        let comb = pts(&[
            (0.0, 0.0),
            (5.0, 0.0),
            (5.0, 2.0),
            (4.0, 2.0),
            (4.0, 1.0),
            (3.0, 1.0),
            (3.0, 2.0),
            (2.0, 2.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let profile = Profile::new("comb", &comb).unwrap();
        let tris = profile.triangulate();
        assert_eq!(tris.len(), 10);
        assert!((triangle_area_sum(&profile, &tris) - profile.area()).abs() < 1e-12);
        for t in &tris {
            let p = profile.points();
            assert!(orient(p[t[0] as usize], p[t[1] as usize], p[t[2] as usize]) > 0.0);
        }
    }

    #[test]
    fn test_circle_profile() {
        let circle = Profile::circle(DVec2::ZERO, 0.95, 16);
        assert_eq!(circle.len(), 16);
        assert!(circle.area() > 0.0);
        assert!(circle.area() < std::f64::consts::PI * 0.95 * 0.95);
    }
}
