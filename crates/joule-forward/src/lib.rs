// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! joule-forward: model-graph to flat-record forward translation.
//!
//! The translator walks a [`joule_model::Model`] and emits an ordered, flat
//! collection of target-schema [`Record`]s, rewriting every object-to-object
//! reference into a name reference. Per-type [leaf visitors](VisitorFn) do
//! the field mapping; the engine guarantees:
//!
//! - at-most-once translation per source object, however many objects
//!   reference it ([`TranslationCache`]);
//! - a record is fully named before anything references it by name;
//! - partial failure: an invalid subgraph is dropped and logged without
//!   aborting the run ([`ErrorLog`]);
//! - deterministic merge/dedup for accumulator record types
//!   ([`merge_singleton`], [`RecordStore::add_if_absent`]).
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod cache;
/// Demo leaf visitors showcasing the engine's calling contract.
pub mod demo;
mod errlog;
mod merge;
mod record;
mod store;
mod translate;
mod visitor;

// Re-exports for stable public API
/// Per-handle memoization states enforcing at-most-once translation.
pub use cache::{CacheEntry, TranslationCache};
/// Structured diagnostics: severities, entries, and the append-only log.
pub use errlog::{ErrorEntry, ErrorLog, Severity};
/// Merge policies for accumulator record types.
pub use merge::{merge_singleton, SingletonCollision};
/// Target-schema records: scalar fields and repeating groups.
pub use record::{FieldValue, Record, AUTOSIZE};
/// Ordered record collection with merge/dedup entry points.
pub use store::{DedupOutcome, RecordKey, RecordStore};
/// The translation driver and its run products.
pub use translate::{
    DependencyResolver, TranslateError, TranslateOptions, Translation, Translator,
};
/// Leaf visitor contract and the per-type registry.
pub use visitor::{RegistryError, VisitorFn, VisitorOutcome, VisitorRegistry};
