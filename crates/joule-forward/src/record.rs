// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Target-schema record types.

use std::collections::BTreeMap;

use joule_model::ObjectType;

/// Literal field value the target schema uses for sizes deferred to the
/// downstream simulation engine.
pub const AUTOSIZE: &str = "Autosize";

/// Scalar value stored in a record field or repeating-group cell.
///
/// `NameRef` carries the name of another record; the engine only ever
/// writes a `NameRef` after the referenced record has been fully
/// constructed and named, so a reference can never point at a record that
/// is absent from the finished store.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldValue {
    /// Free-form string value.
    Str(String),
    /// Signed integer value.
    Int(i64),
    /// Real-valued quantity.
    Real(f64),
    /// Boolean flag.
    Bool(bool),
    /// Name-based reference to another record.
    NameRef(String),
}

/// One flat record of the target schema.
///
/// Invariants
/// - `(ty, name)` identifies the record within a run; once the record is
///   appended to a [`crate::RecordStore`] its name never changes (later
///   records may safely hold a [`FieldValue::NameRef`] to it).
/// - Scalar fields are keyed by field name; repeating groups are an
///   ordered sequence of value rows (e.g. a list of
///   `(variable, aggregation)` pairs).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Record {
    ty: ObjectType,
    name: String,
    fields: BTreeMap<&'static str, FieldValue>,
    groups: Vec<Vec<FieldValue>>,
}

impl Record {
    /// Creates an empty record of type `ty` named `name`.
    pub fn new(ty: ObjectType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            fields: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    /// The record's type tag.
    #[must_use]
    pub fn ty(&self) -> ObjectType {
        self.ty
    }

    /// The record's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets a raw field value, replacing any previous value for `key`.
    pub fn set_field(&mut self, key: &'static str, value: FieldValue) -> &mut Self {
        self.fields.insert(key, value);
        self
    }

    /// Sets a string field.
    pub fn set_str(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        self.set_field(key, FieldValue::Str(value.into()))
    }

    /// Sets an integer field.
    pub fn set_int(&mut self, key: &'static str, value: i64) -> &mut Self {
        self.set_field(key, FieldValue::Int(value))
    }

    /// Sets a real field.
    pub fn set_real(&mut self, key: &'static str, value: f64) -> &mut Self {
        self.set_field(key, FieldValue::Real(value))
    }

    /// Sets a boolean field.
    pub fn set_bool(&mut self, key: &'static str, value: bool) -> &mut Self {
        self.set_field(key, FieldValue::Bool(value))
    }

    /// Sets a name-reference field.
    pub fn set_name_ref(&mut self, key: &'static str, name: impl Into<String>) -> &mut Self {
        self.set_field(key, FieldValue::NameRef(name.into()))
    }

    /// Sets the literal [`AUTOSIZE`] token on a numeric field.
    pub fn set_autosize(&mut self, key: &'static str) -> &mut Self {
        self.set_field(key, FieldValue::Str(AUTOSIZE.to_owned()))
    }

    /// Returns the field stored under `key`, if any.
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Iterates over all scalar fields `(key, value)` in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// Appends one row to the repeating group.
    pub fn push_group(&mut self, row: Vec<FieldValue>) -> &mut Self {
        self.groups.push(row);
        self
    }

    /// The repeating-group rows, in insertion order.
    #[must_use]
    pub fn groups(&self) -> &[Vec<FieldValue>] {
        &self.groups
    }

    /// Structural content comparison used by equality dedup.
    ///
    /// Two records have the same content when their type tags match and
    /// their scalar fields compare equal position by position. The name is
    /// deliberately excluded: at dedup time the candidate is not yet
    /// registered, and two independently named requests for the same
    /// configuration must collapse to one record.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.ty == other.ty && self.fields == other.fields
    }

    /// Replaces the group row at `index`, if it exists. Internal to
    /// singleton merging.
    pub(crate) fn replace_group(&mut self, index: usize, row: Vec<FieldValue>) {
        if let Some(slot) = self.groups.get_mut(index) {
            *slot = row;
        }
    }

    /// Replaces this record's fields and groups with `other`'s, keeping the
    /// identity `(ty, name)` untouched.
    ///
    /// Used by singleton merging, where the stored record's name must
    /// survive because earlier records may already reference it.
    pub(crate) fn adopt_content(&mut self, other: Self) {
        debug_assert_eq!(self.ty, other.ty, "adopt_content must not change the type tag");
        self.fields = other.fields;
        self.groups = other.groups;
    }
}
