// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Schedule visitors.

use joule_model::SourceObject;

use crate::record::Record;
use crate::translate::DependencyResolver;
use crate::visitor::VisitorOutcome;

use super::SCHEDULE_CONSTANT;

/// Constant schedule: the classic shared leaf, referenced from anything
/// that needs an availability or fraction schedule.
pub(super) fn translate_schedule_constant(
    object: &SourceObject,
    resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let mut record = Record::new(SCHEDULE_CONSTANT, object.name());
    if let Some(limits) = object.attr_str("schedule_type_limits") {
        record.set_str("schedule_type_limits_name", limits);
    }
    match object.attr_real("value") {
        Some(value) => {
            record.set_real("hourly_value", value);
        }
        None => {
            // Missing value defaults to 0.0, matching the target schema's
            // field default.
            resolver.warn(
                format!(
                    "Schedule:Constant '{}' has no value; defaulting to 0.0",
                    object.name()
                ),
                Some(object.name().to_owned()),
            );
            record.set_real("hourly_value", 0.0);
        }
    }
    VisitorOutcome::produced(record)
}
