// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! The graph translation driver.
//!
//! [`Translator::translate`] enumerates the model's objects grouped by type
//! in priority order, resolves each through the translation cache, and
//! assembles the final [`RecordStore`] plus [`ErrorLog`]. Dependencies are
//! resolved lazily on first reference: a visitor asks the
//! [`DependencyResolver`] for a referenced object's record name, which
//! recursively drives translation of that object if it was never
//! attempted. Correctness is carried entirely by the cache's at-most-once
//! guarantee; the priority order only keeps recursion shallow.

use std::collections::BTreeSet;

use thiserror::Error;

use joule_model::{Handle, Model, ObjectType, SourceObject};

use crate::cache::{CacheEntry, TranslationCache};
use crate::errlog::{ErrorLog, Severity};
use crate::record::Record;
use crate::store::{DedupOutcome, RecordKey, RecordStore};
use crate::visitor::{VisitorOutcome, VisitorRegistry};

/// Errors that abort a translation run.
///
/// Only [`Severity::Fatal`] conditions surface here; warnings and errors
/// are recovered into the [`ErrorLog`] and never unwind past the cache.
/// When `translate` returns an error, no partial record store is handed
/// out — the run as a whole cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The source graph contains a resolve-before-you-finish reference
    /// cycle; the in-progress check fired instead of recursing forever.
    #[error("reference cycle detected while translating {ty} '{name}' ({handle})")]
    ReferenceCycle {
        /// Type tag of the object whose translation re-entered itself.
        ty: ObjectType,
        /// Name of that object.
        name: String,
        /// Handle of that object.
        handle: Handle,
    },
    /// A visitor reported a fatal failure.
    #[error("fatal failure while translating {ty} '{name}': {message}")]
    VisitorFatal {
        /// Type tag of the failing object.
        ty: ObjectType,
        /// Name of the failing object.
        name: String,
        /// The visitor's message.
        message: String,
    },
}

/// Tunable policies for one translator instance.
#[derive(Debug, Clone, Copy)]
pub struct TranslateOptions {
    /// Raise a warning for objects whose type has no registered visitor.
    pub warn_unsupported: bool,
    /// Collision policy applied when singleton contributions carry the
    /// same repeating-group key.
    pub singleton_collision: crate::merge::SingletonCollision,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            warn_unsupported: true,
            singleton_collision: crate::merge::SingletonCollision::default(),
        }
    }
}

impl TranslateOptions {
    /// Sets whether unsupported object types raise a warning.
    pub fn with_warn_unsupported(mut self, warn: bool) -> Self {
        self.warn_unsupported = warn;
        self
    }

    /// Sets the singleton-merge collision policy.
    pub fn with_singleton_collision(mut self, collision: crate::merge::SingletonCollision) -> Self {
        self.singleton_collision = collision;
        self
    }
}

/// The output of one successful translation run.
#[derive(Debug)]
pub struct Translation {
    store: RecordStore,
    log: ErrorLog,
}

impl Translation {
    /// The assembled record store, in emission order.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The diagnostics raised during the run, oldest first.
    ///
    /// A non-empty log of Warning/Error severity means "translation
    /// succeeded, read the log".
    #[must_use]
    pub fn log(&self) -> &ErrorLog {
        &self.log
    }

    /// Consumes the translation, yielding store and log.
    #[must_use]
    pub fn into_parts(self) -> (RecordStore, ErrorLog) {
        (self.store, self.log)
    }
}

/// The graph translation driver.
///
/// Owns the visitor registry and the accumulator-type sets. A translator
/// is reusable: every [`Self::translate`] call runs with a fresh cache,
/// store, and log — there is no shared mutable state between runs, so one
/// translator may serve independent graphs sequentially (or clones of the
/// registry may serve them concurrently).
#[derive(Debug)]
pub struct Translator {
    registry: VisitorRegistry,
    options: TranslateOptions,
    singleton_types: BTreeSet<ObjectType>,
    dedup_types: BTreeSet<ObjectType>,
}

impl Translator {
    /// Creates a translator over `registry` with default options.
    #[must_use]
    pub fn new(registry: VisitorRegistry) -> Self {
        Self::with_options(registry, TranslateOptions::default())
    }

    /// Creates a translator with explicit options.
    #[must_use]
    pub fn with_options(registry: VisitorRegistry, options: TranslateOptions) -> Self {
        Self {
            registry,
            options,
            singleton_types: BTreeSet::new(),
            dedup_types: BTreeSet::new(),
        }
    }

    /// Declares `ty` a process-singleton accumulator: at most one record
    /// of this type exists per run; contributions are unioned by
    /// repeating-group key.
    pub fn mark_singleton(&mut self, ty: ObjectType) -> &mut Self {
        self.singleton_types.insert(ty);
        self
    }

    /// Declares `ty` an equality-dedup accumulator: structurally identical
    /// records of this type collapse to the first instance.
    pub fn mark_dedup(&mut self, ty: ObjectType) -> &mut Self {
        self.dedup_types.insert(ty);
        self
    }

    /// The options this translator runs with.
    #[must_use]
    pub fn options(&self) -> TranslateOptions {
        self.options
    }

    /// Translates `model` into a record store and error log.
    ///
    /// Objects are attempted grouped by type — registered types in
    /// registration order first, then any remaining types — but records
    /// land in the store in first-resolution order, so a record's
    /// dependencies always precede it.
    ///
    /// # Errors
    /// Returns [`TranslateError`] only for fatal conditions (reference
    /// cycles, visitor-declared fatals); everything else is recovered into
    /// the returned [`ErrorLog`].
    pub fn translate(&self, model: &Model) -> Result<Translation, TranslateError> {
        let mut ctx = RunCtx {
            model,
            registry: &self.registry,
            options: self.options,
            singleton_types: &self.singleton_types,
            dedup_types: &self.dedup_types,
            store: RecordStore::new(),
            cache: TranslationCache::new(),
            log: ErrorLog::new(),
            fatal: None,
        };
        tracing::debug!(
            objects = model.len(),
            visitors = self.registry.len(),
            "starting forward translation"
        );
        for &ty in self.registry.priority() {
            ctx.resolve_group(model, ty)?;
        }
        for ty in model.types() {
            if self.registry.lookup(ty).is_none() {
                ctx.resolve_group(model, ty)?;
            }
        }
        tracing::debug!(
            records = ctx.store.len(),
            diagnostics = ctx.log.len(),
            "forward translation finished"
        );
        Ok(Translation {
            store: ctx.store,
            log: ctx.log,
        })
    }
}

/// All state owned by one in-flight translation run, threaded explicitly
/// through the driver and the visitor-callback boundary. Nothing here is
/// shared across runs.
struct RunCtx<'a> {
    model: &'a Model,
    registry: &'a VisitorRegistry,
    options: TranslateOptions,
    singleton_types: &'a BTreeSet<ObjectType>,
    dedup_types: &'a BTreeSet<ObjectType>,
    store: RecordStore,
    cache: TranslationCache,
    log: ErrorLog,
    /// Set when a fatal condition fires mid-run; unwinds the run at the
    /// next driver checkpoint without invoking further visitors.
    fatal: Option<TranslateError>,
}

impl<'a> RunCtx<'a> {
    /// Attempts every object of `ty`, checking for fatals between objects.
    fn resolve_group(&mut self, model: &'a Model, ty: ObjectType) -> Result<(), TranslateError> {
        for object in model.objects_of_type(ty) {
            self.resolve(object.handle());
            if let Some(fatal) = self.fatal.take() {
                return Err(fatal);
            }
        }
        Ok(())
    }

    /// Resolves `handle` to its primary record key, driving translation on
    /// first reference. Returns `None` for unattempted-after-fatal,
    /// failed, record-less, and unknown handles.
    fn resolve(&mut self, handle: Handle) -> Option<RecordKey> {
        if self.fatal.is_some() {
            return None;
        }
        match self.cache.entry(handle).cloned() {
            Some(CacheEntry::Done { primary, .. }) => return primary,
            Some(CacheEntry::Failed) => return None,
            Some(CacheEntry::InProgress) => {
                let (ty, name) = self.describe(handle);
                self.log.fatal(
                    format!("reference cycle detected while translating {ty} '{name}'"),
                    Some(name.clone()),
                );
                self.fatal = Some(TranslateError::ReferenceCycle { ty, name, handle });
                return None;
            }
            None => {}
        }
        let model = self.model;
        let Some(object) = model.get(&handle) else {
            self.log.error(
                format!("reference to an object absent from the model ({handle})"),
                None,
            );
            self.cache.settle_failed(handle);
            return None;
        };
        let ty = object.ty();
        let Some(visitor) = self.registry.lookup(ty) else {
            if self.options.warn_unsupported {
                self.log.warning(
                    format!(
                        "{ty} '{}' has no registered translator; it will not be translated",
                        object.name()
                    ),
                    Some(object.name().to_owned()),
                );
            }
            self.cache.settle_done(handle, None, Vec::new());
            return None;
        };
        self.cache.begin(handle);
        let outcome = visitor(object, &mut DependencyResolver { ctx: self });
        match outcome {
            VisitorOutcome::Produced { primary, aux } => {
                let primary_key = self.emit(primary);
                let aux_keys: Vec<RecordKey> = aux.into_iter().map(|r| self.emit(r)).collect();
                self.cache.settle_done(handle, Some(primary_key), aux_keys);
                Some(primary_key)
            }
            VisitorOutcome::Nothing => {
                self.cache.settle_done(handle, None, Vec::new());
                None
            }
            VisitorOutcome::Failed {
                severity,
                message,
                also_drop,
            } => self.fail(handle, object, severity, &message, also_drop),
        }
    }

    /// Appends `record` under the merge policy registered for its type.
    fn emit(&mut self, record: Record) -> RecordKey {
        let ty = record.ty();
        if self.singleton_types.contains(&ty) {
            self.store
                .add_singleton(record, self.options.singleton_collision)
        } else if self.dedup_types.contains(&ty) {
            let (outcome, key) = self.store.add_if_absent(record);
            if outcome == DedupOutcome::SkippedAsDuplicate {
                tracing::debug!(ty = %ty, "skipped structurally identical record");
            }
            key
        } else {
            self.store.append(record)
        }
    }

    /// Settles a failed visitor outcome: log, drop the owner, and drop any
    /// named group members so no half-built group is emitted.
    fn fail(
        &mut self,
        handle: Handle,
        object: &SourceObject,
        severity: Severity,
        message: &str,
        also_drop: Vec<Handle>,
    ) -> Option<RecordKey> {
        let ty = object.ty();
        let name = object.name().to_owned();
        self.cache.settle_failed(handle);
        if severity == Severity::Fatal {
            self.log
                .fatal(format!("{ty} '{name}': {message}"), Some(name.clone()));
            self.fatal = Some(TranslateError::VisitorFatal {
                ty,
                name,
                message: message.to_owned(),
            });
            return None;
        }
        self.log.log(
            severity,
            format!("{ty} '{name}' was not translated: {message}"),
            Some(name.clone()),
        );
        for member in also_drop {
            self.drop_member(member, ty, &name);
        }
        None
    }

    /// Drops one group member alongside its failed owner.
    ///
    /// Members that already translated are retained — their record may
    /// already be referenced by name, and a name must stay valid once
    /// emitted — and raise a warning instead.
    fn drop_member(&mut self, member: Handle, owner_ty: ObjectType, owner_name: &str) {
        match self.cache.entry(member).cloned() {
            None => {
                let desc = self.model.get(&member).map_or_else(
                    || format!("object {member}"),
                    |o| format!("{} '{}'", o.ty(), o.name()),
                );
                self.log.error(
                    format!(
                        "{desc} was dropped because its group owner {owner_ty} '{owner_name}' failed"
                    ),
                    Some(owner_name.to_owned()),
                );
                self.cache.settle_failed(member);
            }
            Some(CacheEntry::Done { .. }) => {
                self.log.warning(
                    format!(
                        "a member of failed group {owner_ty} '{owner_name}' was already translated and is retained"
                    ),
                    Some(owner_name.to_owned()),
                );
            }
            Some(CacheEntry::InProgress) => {
                self.log.warning(
                    format!(
                        "group owner {owner_ty} '{owner_name}' asked to drop an object still being translated; ignored"
                    ),
                    Some(owner_name.to_owned()),
                );
            }
            Some(CacheEntry::Failed) => {}
        }
    }

    /// Best-effort `(type, name)` description of `handle` for diagnostics.
    fn describe(&self, handle: Handle) -> (ObjectType, String) {
        self.model.get(&handle).map_or_else(
            || (ObjectType("unknown"), handle.to_string()),
            |o| (o.ty(), o.name().to_owned()),
        )
    }
}

/// The single mediated entry point visitors use to resolve dependencies.
///
/// `name_of` drives translation of the referenced object on first use and
/// hands back the finished record's name — so by the time a visitor writes
/// a name-reference field, the referenced record is fully constructed and
/// named. Visitors never see raw cache state.
pub struct DependencyResolver<'run, 'a> {
    ctx: &'run mut RunCtx<'a>,
}

impl<'run, 'a> DependencyResolver<'run, 'a> {
    /// Returns the record name of the object behind `handle`, translating
    /// it first if necessary.
    ///
    /// `None` means the dependency produced no usable record: it failed,
    /// legitimately produced nothing, is absent from the model, or a fatal
    /// condition is unwinding the run. Whether that is acceptable is the
    /// calling visitor's decision (optional vs. required reference).
    pub fn name_of(&mut self, handle: Handle) -> Option<String> {
        let key = self.ctx.resolve(handle)?;
        self.ctx.store.get(key).map(|r| r.name().to_owned())
    }

    /// Read-only access to the source object behind `handle`.
    ///
    /// Visitors use this to inspect group members or companion objects
    /// without triggering their translation.
    pub fn object(&self, handle: Handle) -> Option<&'a SourceObject> {
        let model: &'a Model = self.ctx.model;
        model.get(&handle)
    }

    /// Raises a [`Severity::Warning`] entry without failing the visitor.
    ///
    /// For informational conditions that keep the output usable, e.g. a
    /// defaulted value was substituted for a missing attribute.
    pub fn warn(&mut self, message: impl Into<String>, related: Option<String>) {
        self.ctx.log.warning(message, related);
    }
}

impl core::fmt::Debug for DependencyResolver<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DependencyResolver").finish_non_exhaustive()
    }
}
