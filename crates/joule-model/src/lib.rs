// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! joule-model: the building-energy object graph.
//!
//! A [`Model`] owns a directed graph of [`SourceObject`]s: typed domain
//! objects identified by opaque [`Handle`]s, carrying scalar attributes and
//! named reference slots pointing at other objects. The forward translator
//! (`joule-forward`) consumes this graph read-only; nothing in this crate
//! knows about target-schema records.
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

mod ident;
mod model;
mod object;

// Re-exports for stable public API
/// Identifier types and constructors for objects and object types.
pub use ident::{make_handle, Handle, Hash, ObjectType};
/// The source graph container and its structural errors.
pub use model::{Model, ModelError};
/// Domain objects: typed attributes, reference slots, and the builder.
pub use object::{Attr, ObjectBuilder, SourceObject};
