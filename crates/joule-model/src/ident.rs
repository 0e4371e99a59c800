// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Identifier and hashing utilities.
use blake3::Hasher;

/// Canonical 256-bit hash used for object identity.
pub type Hash = [u8; 32];

/// Opaque, stable identifier for one object in the source graph.
///
/// A `Handle` is a 32-byte value derived from a domain-separated BLAKE3
/// hash via [`make_handle`]. Handles are unique within a [`crate::Model`]
/// (insertion rejects duplicates) and stable across runs for the same
/// `(type, name)` pair.
///
/// Tooling must not assume a handle is reversible back into a label; the
/// short hex rendering exists for diagnostics only.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handle(pub Hash);

impl Handle {
    /// Returns the canonical byte representation of this handle.
    #[must_use]
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    /// Short hex rendering (first 8 bytes) for log and error messages.
    #[must_use]
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[0..8])
    }
}

impl core::fmt::Display for Handle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.short_hex())
    }
}

/// Printable type tag for the logical kind of a source object.
///
/// Type tags are interned `&'static str` labels (e.g. `"Schedule"`,
/// `"CoilSystem:Cooling:Water"`); using a dedicated wrapper prevents
/// accidental mixing of type labels with field keys or record names.
/// Ordering is lexicographic on the label, which keeps per-type grouping
/// deterministic.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObjectType(pub &'static str);

impl ObjectType {
    /// Returns the printable label for this type tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl core::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

/// Produces a stable, domain-separated object handle (prefix `b"object:"`)
/// using BLAKE3.
pub fn make_handle(label: &str) -> Handle {
    let mut hasher = Hasher::new();
    hasher.update(b"object:");
    hasher.update(label.as_bytes());
    Handle(hasher.finalize().into())
}

/// Derives the canonical handle for a `(type, name)` pair.
///
/// The type label and name are joined with a NUL separator before hashing
/// so that `("Zone", "A B")` and `("Zone A", "B")` cannot collide.
pub(crate) fn handle_for(ty: ObjectType, name: &str) -> Handle {
    let mut hasher = Hasher::new();
    hasher.update(b"object:");
    hasher.update(ty.as_str().as_bytes());
    hasher.update(b"\0");
    hasher.update(name.as_bytes());
    Handle(hasher.finalize().into())
}
