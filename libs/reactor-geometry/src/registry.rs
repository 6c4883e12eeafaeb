//! # Shape Registry
//!
//! Owns every declared shape and hands out [`ShapeHandle`]s. Cut
//! references are handles, so a shape can only cut with a shape defined
//! before it.

use crate::error::GeometryError;
use crate::shape::{Shape, ShapeHandle, ShapeSpec};
use config::constants::material_tag;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Append-only store of validated shapes.
#[derive(Debug)]
pub struct ShapeRegistry {
    id: u64,
    shapes: Vec<Shape>,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            shapes: Vec::new(),
        }
    }

    /// Validates and stores a shape.
    ///
    /// # Errors
    ///
    /// - `InvalidName` for an empty name or one containing whitespace
    /// - `DuplicateName` when the name is taken
    /// - `UnknownShape` when the cut handle is not from this registry
    /// - profile and parameter errors from the shape itself
    pub fn define_shape(&mut self, spec: ShapeSpec) -> Result<ShapeHandle, GeometryError> {
        if spec.name.is_empty() || spec.name.chars().any(char::is_whitespace) {
            return Err(GeometryError::InvalidName(spec.name));
        }
        if self.find(&spec.name).is_some() {
            return Err(GeometryError::DuplicateName(spec.name));
        }
        if let Some(tool) = spec.cut {
            self.shape(tool)?;
        }

        let shape = Shape::from_spec(spec)?;
        let handle = ShapeHandle {
            registry: self.id,
            index: self.shapes.len(),
        };
        self.shapes.push(shape);
        Ok(handle)
    }

    pub fn shape(&self, handle: ShapeHandle) -> Result<&Shape, GeometryError> {
        if handle.registry != self.id {
            return Err(GeometryError::UnknownShape(handle.index));
        }
        self.shapes
            .get(handle.index)
            .ok_or(GeometryError::UnknownShape(handle.index))
    }

    pub fn find(&self, name: &str) -> Option<ShapeHandle> {
        self.shapes
            .iter()
            .position(|s| s.name() == name)
            .map(|index| ShapeHandle {
                registry: self.id,
                index,
            })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Combines shapes into an ordered assembly.
    pub fn build_assembly(&self, members: &[ShapeHandle]) -> Result<Assembly, GeometryError> {
        if members.is_empty() {
            return Err(GeometryError::EmptyAssembly);
        }
        let mut seen = HashSet::with_capacity(members.len());
        let mut shapes = Vec::with_capacity(members.len());
        for &handle in members {
            let shape = self.shape(handle)?;
            if !seen.insert(handle) {
                return Err(GeometryError::DuplicateMember(shape.name().to_string()));
            }
            shapes.push(AssemblyMember {
                shape: shape.clone(),
                cut: self.cut_chain(handle)?,
            });
        }
        Ok(Assembly { members: shapes })
    }

    /// Cut tools are themselves shapes that may carry a cut.
    fn cut_chain(&self, handle: ShapeHandle) -> Result<Option<Box<AssemblyMember>>, GeometryError> {
        match self.shape(handle)?.cut() {
            Some(tool) => Ok(Some(Box::new(AssemblyMember {
                shape: self.shape(tool)?.clone(),
                cut: self.cut_chain(tool)?,
            }))),
            None => Ok(None),
        }
    }
}

/// A shape together with its resolved cut tool.
#[derive(Debug, Clone)]
pub struct AssemblyMember {
    pub shape: Shape,
    pub cut: Option<Box<AssemblyMember>>,
}

/// Ordered set of shapes exported together.
#[derive(Debug, Clone)]
pub struct Assembly {
    members: Vec<AssemblyMember>,
}

impl Assembly {
    pub fn members(&self) -> &[AssemblyMember] {
        &self.members
    }

    /// Volume tags in member order, `mat_<name>` each.
    pub fn tags(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| material_tag(m.shape.name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workplane::Workplane;

    fn circle(name: &str) -> ShapeSpec {
        ShapeSpec::extrude_circle(name, (0.0, 0.0), 0.95, 1.2)
    }

    fn square(name: &str) -> ShapeSpec {
        ShapeSpec::extrude_polygon(name, [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)], 1.2)
    }

    #[test]
    fn test_define_and_find() {
        let mut registry = ShapeRegistry::new();
        let handle = registry.define_shape(circle("part0")).unwrap();
        assert_eq!(registry.find("part0"), Some(handle));
        assert_eq!(registry.shape(handle).unwrap().workplane(), Workplane::XZ);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_and_duplicate_names() {
        let mut registry = ShapeRegistry::new();
        assert_eq!(
            registry.define_shape(circle("")).unwrap_err(),
            GeometryError::InvalidName(String::new())
        );
        assert!(matches!(
            registry.define_shape(circle("two words")),
            Err(GeometryError::InvalidName(_))
        ));
        registry.define_shape(circle("a")).unwrap();
        assert_eq!(
            registry.define_shape(square("a")).unwrap_err(),
            GeometryError::DuplicateName("a".into())
        );
    }

    #[test]
    fn test_cut_handle_from_other_registry_is_rejected() {
        let mut other = ShapeRegistry::new();
        let foreign = other.define_shape(circle("tool")).unwrap();

        let mut registry = ShapeRegistry::new();
        let err = registry.define_shape(square("target").cut(foreign)).unwrap_err();
        assert_eq!(err, GeometryError::UnknownShape(0));
    }

    #[test]
    fn test_assembly_rules() {
        let mut registry = ShapeRegistry::new();
        let tool = registry.define_shape(circle("tool")).unwrap();
        let target = registry.define_shape(square("target").cut(tool)).unwrap();

        assert_eq!(registry.build_assembly(&[]).unwrap_err(), GeometryError::EmptyAssembly);
        assert_eq!(
            registry.build_assembly(&[target, target]).unwrap_err(),
            GeometryError::DuplicateMember("target".into())
        );

        let assembly = registry.build_assembly(&[target]).unwrap();
        assert_eq!(assembly.tags(), vec!["mat_target".to_string()]);
        let cut = assembly.members()[0].cut.as_ref().unwrap();
        assert_eq!(cut.shape.name(), "tool");
    }
}
