// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Merge policy for singleton accumulator records.

use crate::record::Record;

/// Collision policy when two singleton contributions carry a
/// repeating-group row with the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingletonCollision {
    /// Keep the row from the contribution merged first (observed
    /// accumulator behavior; later identical keys are silently skipped).
    #[default]
    FirstWins,
    /// Replace the existing row with the incoming one.
    LastWins,
}

/// Unions `incoming` into `existing`, returning the merged record.
///
/// Repeating-group rows are keyed by their first value. Rows whose key is
/// absent from `existing` are appended in `incoming` order; rows whose key
/// collides are resolved per `collision`. Empty incoming rows are ignored
/// (they carry no key). Scalar fields behave the same way: keys new to
/// `existing` are added, colliding keys follow `collision`.
///
/// Pure function: the merged record keeps `existing`'s identity
/// `(ty, name)` and neither input is mutated.
#[must_use]
pub fn merge_singleton(
    existing: &Record,
    incoming: &Record,
    collision: SingletonCollision,
) -> Record {
    debug_assert_eq!(
        existing.ty(),
        incoming.ty(),
        "singleton merge requires matching type tags"
    );
    let mut merged = existing.clone();
    for (key, value) in incoming.fields() {
        let collides = merged.field(key).is_some();
        if !collides || collision == SingletonCollision::LastWins {
            merged.set_field(key, value.clone());
        }
    }
    for row in incoming.groups() {
        let Some(key) = row.first() else {
            continue;
        };
        let position = merged
            .groups()
            .iter()
            .position(|existing_row| existing_row.first() == Some(key));
        match (position, collision) {
            (None, _) => {
                merged.push_group(row.clone());
            }
            (Some(_), SingletonCollision::FirstWins) => {}
            (Some(i), SingletonCollision::LastWins) => {
                merged.replace_group(i, row.clone());
            }
        }
    }
    merged
}
