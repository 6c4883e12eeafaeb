//! # BSP Tree
//!
//! Binary Space Partitioning tree for the boolean cut, following the
//! csg.js scheme by Evan Wallace.
//!
//! Each node holds a dividing plane, the polygons coplanar with it and
//! optional front/back subtrees. Deep trees (large curved meshes) recurse
//! through [`stacker::maybe_grow`].

use super::plane::Plane;
use super::polygon::{Polygon, SplitBuckets};
use config::constants::{STACK_GROWTH_BYTES, STACK_RED_ZONE_BYTES};
use stacker::maybe_grow;

#[derive(Debug, Clone, Default)]
pub struct BspNode {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    /// Inserts polygons, splitting them down the tree.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }
        maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROWTH_BYTES, || {
            let plane = *self.plane.get_or_insert_with(|| polygons[0].plane());
            let mut out = SplitBuckets::default();
            for polygon in polygons {
                polygon.split(&plane, &mut out);
            }
            self.polygons.append(&mut out.coplanar_front);
            self.polygons.append(&mut out.coplanar_back);

            if !out.front.is_empty() {
                self.front.get_or_insert_with(Default::default).build(out.front);
            }
            if !out.back.is_empty() {
                self.back.get_or_insert_with(Default::default).build(out.back);
            }
        });
    }

    /// Swaps solid and empty space.
    pub fn invert(&mut self) {
        maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROWTH_BYTES, || {
            for polygon in &mut self.polygons {
                polygon.flip();
            }
            self.plane = self.plane.map(|p| p.flip());
            if let Some(front) = self.front.as_mut() {
                front.invert();
            }
            if let Some(back) = self.back.as_mut() {
                back.invert();
            }
            std::mem::swap(&mut self.front, &mut self.back);
        });
    }

    /// Removes the parts of `polygons` that lie inside this solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };
        maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROWTH_BYTES, || {
            let mut out = SplitBuckets::default();
            for polygon in polygons {
                polygon.split(&plane, &mut out);
            }
            let mut front = out.front;
            front.append(&mut out.coplanar_front);
            let mut back = out.back;
            back.append(&mut out.coplanar_back);

            let mut kept = match &self.front {
                Some(node) => node.clip_polygons(front),
                None => front,
            };
            if let Some(node) = &self.back {
                kept.extend(node.clip_polygons(back));
            }
            kept
        })
    }

    /// Removes the parts of this tree's polygons inside `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROWTH_BYTES, || {
            self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
            if let Some(front) = self.front.as_mut() {
                front.clip_to(other);
            }
            if let Some(back) = self.back.as_mut() {
                back.clip_to(other);
            }
        });
    }

    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(&self, out: &mut Vec<Polygon>) {
        maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROWTH_BYTES, || {
            out.extend(self.polygons.iter().cloned());
            if let Some(front) = &self.front {
                front.collect_into(out);
            }
            if let Some(back) = &self.back {
                back.collect_into(out);
            }
        });
    }
}
