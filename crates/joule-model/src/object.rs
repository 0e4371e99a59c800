// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Source objects: typed attributes and reference slots.

use std::collections::BTreeMap;

use crate::ident::{handle_for, Handle, ObjectType};

/// Scalar attribute value on a source object.
///
/// `Autosize` marks a numeric attribute whose value is left for the
/// downstream simulation engine to size; translators render it as the
/// literal autosize token rather than a number.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Attr {
    /// Free-form string value.
    Str(String),
    /// Signed integer value.
    Int(i64),
    /// Real-valued quantity.
    Real(f64),
    /// Boolean flag.
    Bool(bool),
    /// Numeric attribute deferred to downstream sizing.
    Autosize,
}

/// One node of the source graph.
///
/// Invariants
/// - `handle` is derived from `(ty, name)` and never changes.
/// - Attribute and reference slot keys are unique per object (map keyed).
/// - Reference slots hold zero or more target handles; the object does not
///   know whether its targets exist — the owning [`crate::Model`] and the
///   consuming translator resolve them.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceObject {
    handle: Handle,
    ty: ObjectType,
    name: String,
    attrs: BTreeMap<&'static str, Attr>,
    refs: BTreeMap<&'static str, Vec<Handle>>,
}

impl SourceObject {
    /// Starts building an object of type `ty` named `name`.
    pub fn build(ty: ObjectType, name: impl Into<String>) -> ObjectBuilder {
        ObjectBuilder {
            ty,
            name: name.into(),
            attrs: BTreeMap::new(),
            refs: BTreeMap::new(),
        }
    }

    /// The object's stable handle.
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// The object's type tag.
    #[must_use]
    pub fn ty(&self) -> ObjectType {
        self.ty
    }

    /// The object's user-visible name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw attribute stored under `key`, if any.
    pub fn attr(&self, key: &str) -> Option<&Attr> {
        self.attrs.get(key)
    }

    /// Returns the string attribute under `key`, if present and a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        match self.attrs.get(key) {
            Some(Attr::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer attribute under `key`, if present and an integer.
    pub fn attr_int(&self, key: &str) -> Option<i64> {
        match self.attrs.get(key) {
            Some(Attr::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the real attribute under `key`, if present and a real.
    ///
    /// An autosized attribute yields `None` here; check [`Self::is_autosized`]
    /// first when the field supports sizing.
    pub fn attr_real(&self, key: &str) -> Option<f64> {
        match self.attrs.get(key) {
            Some(Attr::Real(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean attribute under `key`, if present and a boolean.
    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        match self.attrs.get(key) {
            Some(Attr::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns `true` if the attribute under `key` is flagged autosized.
    #[must_use]
    pub fn is_autosized(&self, key: &str) -> bool {
        matches!(self.attrs.get(key), Some(Attr::Autosize))
    }

    /// Returns the first target of the reference slot `key`, if any.
    ///
    /// Use this for single-valued (required or optional) reference slots.
    pub fn reference(&self, key: &str) -> Option<Handle> {
        self.refs.get(key).and_then(|targets| targets.first().copied())
    }

    /// Returns all targets of the reference slot `key`, in slot order.
    ///
    /// An absent slot yields an empty slice.
    #[must_use]
    pub fn references(&self, key: &str) -> &[Handle] {
        self.refs.get(key).map_or(&[], Vec::as_slice)
    }

    /// Iterates over all reference slots `(slot, targets)` in key order.
    pub fn reference_slots(&self) -> impl Iterator<Item = (&'static str, &[Handle])> {
        self.refs.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

/// Builder for [`SourceObject`].
///
/// The handle is derived from the `(type, name)` pair at [`Self::finish`];
/// two objects of the same type and name collapse to the same handle and
/// the second insertion into a [`crate::Model`] is rejected.
#[derive(Debug)]
pub struct ObjectBuilder {
    ty: ObjectType,
    name: String,
    attrs: BTreeMap<&'static str, Attr>,
    refs: BTreeMap<&'static str, Vec<Handle>>,
}

impl ObjectBuilder {
    /// Sets a raw attribute value, replacing any previous value for `key`.
    pub fn attr(mut self, key: &'static str, value: Attr) -> Self {
        self.attrs.insert(key, value);
        self
    }

    /// Sets a string attribute.
    pub fn string(self, key: &'static str, value: impl Into<String>) -> Self {
        self.attr(key, Attr::Str(value.into()))
    }

    /// Sets an integer attribute.
    pub fn int(self, key: &'static str, value: i64) -> Self {
        self.attr(key, Attr::Int(value))
    }

    /// Sets a real attribute.
    pub fn real(self, key: &'static str, value: f64) -> Self {
        self.attr(key, Attr::Real(value))
    }

    /// Sets a boolean attribute.
    pub fn bool(self, key: &'static str, value: bool) -> Self {
        self.attr(key, Attr::Bool(value))
    }

    /// Flags a numeric attribute as autosized.
    pub fn autosize(self, key: &'static str) -> Self {
        self.attr(key, Attr::Autosize)
    }

    /// Sets a single-valued reference slot.
    pub fn reference(mut self, key: &'static str, target: Handle) -> Self {
        self.refs.insert(key, vec![target]);
        self
    }

    /// Sets a repeating reference slot from an ordered list of targets.
    pub fn references(mut self, key: &'static str, targets: impl IntoIterator<Item = Handle>) -> Self {
        self.refs.insert(key, targets.into_iter().collect());
        self
    }

    /// Finalises the object, deriving its handle from `(type, name)`.
    #[must_use]
    pub fn finish(self) -> SourceObject {
        let handle = handle_for(self.ty, &self.name);
        SourceObject {
            handle,
            ty: self.ty,
            name: self.name,
            attrs: self.attrs,
            refs: self.refs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE: ObjectType = ObjectType("Zone");

    #[test]
    fn builder_round_trips_attributes() {
        let obj = SourceObject::build(ZONE, "north")
            .real("volume", 250.0)
            .int("multiplier", 2)
            .bool("part_of_floor_area", true)
            .string("origin", "survey")
            .autosize("design_flow")
            .finish();
        assert_eq!(obj.attr_real("volume"), Some(250.0));
        assert_eq!(obj.attr_int("multiplier"), Some(2));
        assert_eq!(obj.attr_bool("part_of_floor_area"), Some(true));
        assert_eq!(obj.attr_str("origin"), Some("survey"));
        assert!(obj.is_autosized("design_flow"));
        assert_eq!(obj.attr_real("design_flow"), None);
        assert_eq!(obj.attr_real("absent"), None);
    }

    #[test]
    fn reference_slots_preserve_order() {
        let a = make_target("a");
        let b = make_target("b");
        let obj = SourceObject::build(ZONE, "north")
            .references("spaces", [b, a])
            .reference("schedule", a)
            .finish();
        assert_eq!(obj.references("spaces"), &[b, a]);
        assert_eq!(obj.reference("schedule"), Some(a));
        assert_eq!(obj.reference("absent"), None);
        assert!(obj.references("absent").is_empty());
    }

    #[test]
    fn same_type_and_name_derive_same_handle() {
        let x = SourceObject::build(ZONE, "north").finish();
        let y = SourceObject::build(ZONE, "north").real("volume", 1.0).finish();
        assert_eq!(x.handle(), y.handle());
    }

    fn make_target(label: &str) -> Handle {
        crate::ident::make_handle(label)
    }
}
