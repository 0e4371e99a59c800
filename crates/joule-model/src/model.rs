// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! The source graph container.
use std::collections::BTreeMap;

use thiserror::Error;

use crate::ident::{Handle, ObjectType};
use crate::object::SourceObject;

/// Error returned by [`Model::insert`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An object with the same handle (same type and name) already exists.
    #[error("duplicate object: {ty} '{name}'")]
    DuplicateObject {
        /// Type tag of the rejected object.
        ty: ObjectType,
        /// Name of the rejected object.
        name: String,
    },
}

/// An in-memory source graph: the full set of domain objects for one
/// building-energy model.
///
/// Objects are keyed by [`Handle`]; per-type enumeration preserves
/// insertion order, which keeps translation runs deterministic for the
/// same construction sequence. The graph is read-only from the forward
/// translator's perspective — a translation run never mutates it.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Mapping from handle to the owned object.
    objects: BTreeMap<Handle, SourceObject>,
    /// Per-type handle lists, in insertion order.
    by_type: BTreeMap<ObjectType, Vec<Handle>>,
}

impl Model {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object, returning its handle.
    ///
    /// # Errors
    /// Returns [`ModelError::DuplicateObject`] if an object with the same
    /// handle is already present; the existing object is left untouched.
    pub fn insert(&mut self, object: SourceObject) -> Result<Handle, ModelError> {
        let handle = object.handle();
        if self.objects.contains_key(&handle) {
            return Err(ModelError::DuplicateObject {
                ty: object.ty(),
                name: object.name().to_owned(),
            });
        }
        self.by_type.entry(object.ty()).or_default().push(handle);
        self.objects.insert(handle, object);
        Ok(handle)
    }

    /// Returns the object with `handle`, if present.
    pub fn get(&self, handle: &Handle) -> Option<&SourceObject> {
        self.objects.get(handle)
    }

    /// Number of objects in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the graph holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates over every type tag present, in lexicographic order.
    pub fn types(&self) -> impl Iterator<Item = ObjectType> + '_ {
        self.by_type.keys().copied()
    }

    /// Iterates over all objects of `ty` in insertion order.
    pub fn objects_of_type(&self, ty: ObjectType) -> impl Iterator<Item = &SourceObject> {
        self.by_type
            .get(&ty)
            .into_iter()
            .flatten()
            .filter_map(|handle| self.objects.get(handle))
    }

    /// Iterates over all objects in handle order.
    pub fn objects(&self) -> impl Iterator<Item = &SourceObject> {
        self.objects.values()
    }
}
