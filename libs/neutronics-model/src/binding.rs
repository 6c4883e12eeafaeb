//! # Material-Tag Binding
//!
//! Resolves the volume tags of a mesh file against caller bindings. Every
//! mesh tag needs exactly one binding; bindings for tags the mesh does not
//! have are reported but tolerated.

use crate::error::ModelError;
use crate::material::{Binding, Material, MaterialCatalog};
use pipeline_types::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A mesh tag with its resolved material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundMaterial {
    pub tag: String,
    pub material: Material,
}

/// Materials for every mesh tag, in mesh order.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSet {
    entries: Vec<BoundMaterial>,
    pub diagnostics: Vec<Diagnostic>,
}

impl MaterialSet {
    pub fn entries(&self) -> &[BoundMaterial] {
        &self.entries
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.tag.as_str())
    }

    pub fn get(&self, tag: &str) -> Option<&Material> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| &e.material)
    }

    pub fn depletable(&self) -> impl Iterator<Item = &BoundMaterial> {
        self.entries.iter().filter(|e| e.material.is_depletable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Matches `mesh_tags` to `bindings`.
///
/// # Errors
///
/// - `DuplicateBinding` when one tag is bound twice
/// - `UnboundTag` listing every mesh tag without a binding
pub fn resolve_bindings<S: AsRef<str>>(
    mesh_tags: &[S],
    bindings: &[Binding],
    catalog: &MaterialCatalog,
) -> Result<MaterialSet, ModelError> {
    let mut by_tag = HashMap::with_capacity(bindings.len());
    for binding in bindings {
        if by_tag.insert(binding.tag.as_str(), binding.material).is_some() {
            return Err(ModelError::DuplicateBinding(binding.tag.clone()));
        }
    }

    let unbound: Vec<String> = mesh_tags
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag| !by_tag.contains_key(tag))
        .map(str::to_string)
        .collect();
    if !unbound.is_empty() {
        return Err(ModelError::UnboundTag(unbound));
    }

    let entries = mesh_tags
        .iter()
        .map(|tag| {
            let tag = tag.as_ref();
            let material = catalog.material(by_tag[tag])?.clone();
            Ok(BoundMaterial {
                tag: tag.to_string(),
                material,
            })
        })
        .collect::<Result<Vec<_>, ModelError>>()?;

    let present: HashSet<&str> = mesh_tags.iter().map(AsRef::as_ref).collect();
    let diagnostics = bindings
        .iter()
        .filter(|b| !present.contains(b.tag.as_str()))
        .map(|b| {
            Diagnostic::warning("binding refers to a tag that is not in the mesh")
                .with_subject(&b.tag)
                .with_hint("check the shape name or remove the binding")
        })
        .collect();

    Ok(MaterialSet { entries, diagnostics })
}
