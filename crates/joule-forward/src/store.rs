// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Ordered record collection: the output side of a translation run.

use rustc_hash::FxHashMap;

use joule_model::ObjectType;

use crate::merge::{merge_singleton, SingletonCollision};
use crate::record::Record;

/// Index of a record within one run's [`RecordStore`].
///
/// Keys are process-local and never serialized; they are stable for the
/// lifetime of the store that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey(usize);

/// Outcome of [`RecordStore::add_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum DedupOutcome {
    /// The candidate was new and has been appended.
    Inserted,
    /// A structurally identical record already existed; the candidate was
    /// dropped. A benign no-op, not an error.
    SkippedAsDuplicate,
}

/// Insertion-order-preserving collection of target-schema records.
///
/// Appends are the only way in; a record's name is frozen the moment it is
/// appended, so name references held by later records stay valid. The
/// store does not enforce name uniqueness beyond the merge rules — that is
/// a target-schema constraint the caller's serializer may check.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    /// Per-type record keys, in emission order. Backs content dedup and
    /// singleton lookup without scanning the whole store.
    by_type: FxHashMap<ObjectType, Vec<RecordKey>>,
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record unconditionally, returning its key.
    pub fn append(&mut self, record: Record) -> RecordKey {
        let key = RecordKey(self.records.len());
        self.by_type.entry(record.ty()).or_default().push(key);
        self.records.push(record);
        key
    }

    /// Returns the record behind `key`; always `Some` for keys issued by
    /// this store.
    #[must_use]
    pub fn get(&self, key: RecordKey) -> Option<&Record> {
        self.records.get(key.0)
    }

    /// Finds the first record of `ty` named `name`, if any.
    pub fn find(&self, ty: ObjectType, name: &str) -> Option<RecordKey> {
        self.keys_of_type(ty)
            .find(|key| self.records[key.0].name() == name)
    }

    /// Iterates over all records in emission order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Iterates over the keys of all records of `ty`, in emission order.
    pub fn keys_of_type(&self, ty: ObjectType) -> impl Iterator<Item = RecordKey> + '_ {
        self.by_type.get(&ty).into_iter().flatten().copied()
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends `candidate` unless a structurally identical record of the
    /// same type already exists (see [`Record::same_content`]).
    ///
    /// Returns the outcome together with the key of the surviving record —
    /// the existing one on [`DedupOutcome::SkippedAsDuplicate`], the
    /// candidate's on [`DedupOutcome::Inserted`].
    pub fn add_if_absent(&mut self, candidate: Record) -> (DedupOutcome, RecordKey) {
        let existing = self
            .keys_of_type(candidate.ty())
            .find(|key| self.records[key.0].same_content(&candidate));
        match existing {
            Some(key) => (DedupOutcome::SkippedAsDuplicate, key),
            None => (DedupOutcome::Inserted, self.append(candidate)),
        }
    }

    /// Contributes `candidate` to the process-singleton record of its type.
    ///
    /// The first contribution is appended as-is and names the singleton;
    /// every later contribution is unioned into it with
    /// [`merge_singleton`] under `collision`. The singleton's name never
    /// changes after the first append. Returns the singleton's key.
    pub fn add_singleton(
        &mut self,
        candidate: Record,
        collision: SingletonCollision,
    ) -> RecordKey {
        let Some(key) = self.keys_of_type(candidate.ty()).next() else {
            return self.append(candidate);
        };
        let merged = merge_singleton(&self.records[key.0], &candidate, collision);
        self.records[key.0].adopt_content(merged);
        key
    }
}
