// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Per-handle memoization enforcing at-most-once translation.

use rustc_hash::FxHashMap;

use joule_model::Handle;

use crate::store::RecordKey;

/// State of one handle's translation attempt.
///
/// A handle transitions `Unattempted → InProgress → {Done | Failed}`
/// exactly once per run; "Unattempted" is represented by the absence of an
/// entry. Re-requesting a `Done` or `Failed` handle returns the cached
/// entry without invoking the visitor again — this carries the engine's
/// at-most-once guarantee, so every referencing record sees the same name.
///
/// Observing `InProgress` on re-entry means the source graph has a
/// reference cycle; the driver reports that as a fatal condition instead
/// of recursing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    /// The visitor is currently running for this handle.
    InProgress,
    /// The attempt finished. `primary` is the object's own record, if the
    /// visitor produced one; `aux` are auxiliary records it emitted.
    Done {
        /// Key of the primary record, when one was produced.
        primary: Option<RecordKey>,
        /// Keys of auxiliary records, in emission order.
        aux: Vec<RecordKey>,
    },
    /// The attempt failed; an [`crate::ErrorEntry`] was raised and the
    /// object is absent from the output.
    Failed,
}

/// Memoization table for one translation run.
///
/// Owned by a single run; a fresh run must use a fresh cache.
#[derive(Debug, Default)]
pub struct TranslationCache {
    slots: FxHashMap<Handle, CacheEntry>,
}

impl TranslationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached entry for `handle`; `None` means unattempted.
    pub fn entry(&self, handle: Handle) -> Option<&CacheEntry> {
        self.slots.get(&handle)
    }

    /// Returns `true` if `handle` finished (Done or Failed).
    #[must_use]
    pub fn is_settled(&self, handle: Handle) -> bool {
        matches!(
            self.slots.get(&handle),
            Some(CacheEntry::Done { .. } | CacheEntry::Failed)
        )
    }

    /// Number of attempted handles (any state).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no handle was attempted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Marks `handle` in progress. Caller must have checked the handle is
    /// unattempted.
    pub(crate) fn begin(&mut self, handle: Handle) {
        let previous = self.slots.insert(handle, CacheEntry::InProgress);
        debug_assert!(
            previous.is_none(),
            "begin() on a handle that was already attempted: {handle}"
        );
    }

    /// Settles `handle` as done.
    pub(crate) fn settle_done(
        &mut self,
        handle: Handle,
        primary: Option<RecordKey>,
        aux: Vec<RecordKey>,
    ) {
        let previous = self.slots.insert(handle, CacheEntry::Done { primary, aux });
        debug_assert!(
            matches!(previous, None | Some(CacheEntry::InProgress)),
            "settle_done() must not overwrite a settled entry: {handle}"
        );
    }

    /// Settles `handle` as failed.
    pub(crate) fn settle_failed(&mut self, handle: Handle) {
        let previous = self.slots.insert(handle, CacheEntry::Failed);
        debug_assert!(
            matches!(previous, None | Some(CacheEntry::InProgress)),
            "settle_failed() must not overwrite a settled entry: {handle}"
        );
    }
}
