// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Zone equipment visitors, including the structurally validated group.

use joule_model::{ObjectType, SourceObject};

use crate::errlog::Severity;
use crate::record::{FieldValue, Record};
use crate::translate::DependencyResolver;
use crate::visitor::VisitorOutcome;

use super::{BASEBOARD_ELECTRIC, BASEBOARD_WATER, EQUIPMENT_GROUP};

/// Hot-water baseboard unit.
pub(super) fn translate_baseboard_water(
    object: &SourceObject,
    resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let mut record = Record::new(BASEBOARD_WATER, object.name());
    if object.is_autosized("rated_capacity") {
        record.set_autosize("rated_capacity");
    } else if let Some(value) = object.attr_real("rated_capacity") {
        record.set_real("rated_capacity", value);
    }
    if let Some(schedule) = object.reference("availability_schedule") {
        if let Some(name) = resolver.name_of(schedule) {
            record.set_name_ref("availability_schedule_name", name);
        }
    }
    VisitorOutcome::produced(record)
}

/// Electric baseboard unit.
pub(super) fn translate_baseboard_electric(
    object: &SourceObject,
    _resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let mut record = Record::new(BASEBOARD_ELECTRIC, object.name());
    if let Some(value) = object.attr_real("nominal_capacity") {
        record.set_real("nominal_capacity", value);
    }
    if let Some(value) = object.attr_real("efficiency") {
        record.set_real("efficiency", value);
    }
    VisitorOutcome::produced(record)
}

/// Equipment group: all members must share one baseboard subtype. A group
/// mixing water and electric units is structurally invalid — the owner is
/// dropped and its not-yet-translated members with it, so the output never
/// contains a half-built group.
pub(super) fn translate_equipment_group(
    object: &SourceObject,
    resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let members = object.references("members");
    if members.is_empty() {
        return VisitorOutcome::Nothing;
    }

    let mut member_ty: Option<ObjectType> = None;
    for &member in members {
        let Some(member_object) = resolver.object(member) else {
            return VisitorOutcome::failed_dropping(
                Severity::Error,
                "group references an object absent from the model",
                members.to_vec(),
            );
        };
        match member_ty {
            None => member_ty = Some(member_object.ty()),
            Some(ty) if ty == member_object.ty() => {}
            Some(ty) => {
                return VisitorOutcome::failed_dropping(
                    Severity::Error,
                    format!(
                        "group mixes incompatible equipment subtypes ({ty} and {})",
                        member_object.ty()
                    ),
                    members.to_vec(),
                );
            }
        }
    }

    let mut record = Record::new(EQUIPMENT_GROUP, object.name());
    for &member in members {
        let Some(name) = resolver.name_of(member) else {
            return VisitorOutcome::failed_dropping(
                Severity::Error,
                "a group member could not be translated",
                members.to_vec(),
            );
        };
        record.push_group(vec![FieldValue::NameRef(name)]);
    }
    VisitorOutcome::produced(record)
}
