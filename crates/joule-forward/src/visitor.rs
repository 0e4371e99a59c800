// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Leaf visitor contract and the per-type registry.

use rustc_hash::FxHashMap;
use thiserror::Error;

use joule_model::{Handle, ObjectType, SourceObject};

use crate::errlog::Severity;
use crate::record::Record;
use crate::translate::DependencyResolver;

/// What one leaf visitor invocation produced.
#[derive(Debug)]
pub enum VisitorOutcome {
    /// The object maps to a primary record, plus zero or more auxiliary
    /// records (e.g. a wrapper or companion list record).
    Produced {
        /// The object's own record; its name is frozen once emitted.
        primary: Record,
        /// Auxiliary records, emitted after the primary in the given order.
        aux: Vec<Record>,
    },
    /// The object legitimately has no corresponding output (optional
    /// feature unused, zero-length repeating field, ...). Not an error.
    Nothing,
    /// The object (and optionally its group members) must be dropped.
    Failed {
        /// `Warning`/`Error` are recovered: the object is dropped and the
        /// run continues. `Fatal` aborts the run.
        severity: Severity,
        /// Human-readable reason, logged against the object.
        message: String,
        /// Handles of group members to drop alongside the owner, so a
        /// structurally half-built group is never emitted.
        also_drop: Vec<Handle>,
    },
}

impl VisitorOutcome {
    /// A primary record with no auxiliaries.
    pub fn produced(primary: Record) -> Self {
        Self::Produced {
            primary,
            aux: Vec::new(),
        }
    }

    /// A primary record plus auxiliary records.
    pub fn produced_with_aux(primary: Record, aux: Vec<Record>) -> Self {
        Self::Produced { primary, aux }
    }

    /// A recoverable or fatal failure for the object alone.
    pub fn failed(severity: Severity, message: impl Into<String>) -> Self {
        Self::Failed {
            severity,
            message: message.into(),
            also_drop: Vec::new(),
        }
    }

    /// A failure that also drops the named group members.
    pub fn failed_dropping(
        severity: Severity,
        message: impl Into<String>,
        also_drop: Vec<Handle>,
    ) -> Self {
        Self::Failed {
            severity,
            message: message.into(),
            also_drop,
        }
    }
}

/// Function pointer implementing the field mapping for one object type.
///
/// The visitor receives the source object and the [`DependencyResolver`],
/// the single mediated entry point for obtaining the record names of
/// referenced objects. A visitor must never bypass the resolver to reach
/// raw cached state; recursive resolution (and the at-most-once guarantee)
/// only holds when every dependency goes through it.
pub type VisitorFn = fn(&SourceObject, &mut DependencyResolver<'_, '_>) -> VisitorOutcome;

/// Errors emitted by [`VisitorRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A visitor for this type tag was already registered.
    #[error("duplicate visitor for type: {0}")]
    DuplicateVisitor(ObjectType),
}

/// Typed registry mapping an [`ObjectType`] to its leaf visitor.
///
/// Resolved once at startup; registration order doubles as the driver's
/// hand-maintained priority order. Types commonly referenced by many
/// others (shared utility/config objects) should be registered early to
/// minimize recursive re-entry depth — a clarity/performance heuristic,
/// not a correctness requirement.
#[derive(Default)]
pub struct VisitorRegistry {
    visitors: FxHashMap<ObjectType, VisitorFn>,
    priority: Vec<ObjectType>,
}

impl VisitorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `visitor` for `ty`.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateVisitor`] if a visitor for `ty`
    /// has already been registered.
    pub fn register(&mut self, ty: ObjectType, visitor: VisitorFn) -> Result<(), RegistryError> {
        if self.visitors.contains_key(&ty) {
            return Err(RegistryError::DuplicateVisitor(ty));
        }
        self.visitors.insert(ty, visitor);
        self.priority.push(ty);
        Ok(())
    }

    /// Returns the visitor registered for `ty`, if any.
    pub fn lookup(&self, ty: ObjectType) -> Option<VisitorFn> {
        self.visitors.get(&ty).copied()
    }

    /// Registered types in registration (= priority) order.
    #[must_use]
    pub fn priority(&self) -> &[ObjectType] {
        &self.priority
    }

    /// Number of registered visitors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.priority.len()
    }

    /// Returns `true` if no visitor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty()
    }
}

impl core::fmt::Debug for VisitorRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisitorRegistry")
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
