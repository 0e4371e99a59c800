// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Plant-side visitors: pipes, pumps, coils, and the coil system.

use joule_model::SourceObject;

use crate::errlog::Severity;
use crate::record::Record;
use crate::translate::DependencyResolver;
use crate::visitor::VisitorOutcome;

use super::{COIL_COOLING_WATER, COIL_SYSTEM_COOLING_WATER, PIPE_ADIABATIC, PUMP_VARIABLE_SPEED};

/// Adiabatic pipe: a two-field leaf. Node names are plain string
/// attributes on the source object; pipes carry no object references.
pub(super) fn translate_pipe_adiabatic(
    object: &SourceObject,
    _resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let mut record = Record::new(PIPE_ADIABATIC, object.name());
    if let Some(node) = object.attr_str("inlet_node") {
        record.set_str("inlet_node_name", node);
    }
    if let Some(node) = object.attr_str("outlet_node") {
        record.set_str("outlet_node_name", node);
    }
    VisitorOutcome::produced(record)
}

/// Variable-speed condensate pump. Flow and power are autosizable: the
/// flag on the source attribute renders as the literal autosize token.
pub(super) fn translate_pump_variable_speed(
    object: &SourceObject,
    _resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let mut record = Record::new(PUMP_VARIABLE_SPEED, object.name());
    if let Some(node) = object.attr_str("inlet_node") {
        record.set_str("inlet_node_name", node);
    }
    if let Some(node) = object.attr_str("outlet_node") {
        record.set_str("outlet_node_name", node);
    }
    if object.is_autosized("design_flow_rate") {
        record.set_autosize("design_maximum_flow_rate");
    } else if let Some(value) = object.attr_real("design_flow_rate") {
        record.set_real("design_maximum_flow_rate", value);
    }
    if object.is_autosized("design_power_consumption") {
        record.set_autosize("design_power_consumption");
    } else if let Some(value) = object.attr_real("design_power_consumption") {
        record.set_real("design_power_consumption", value);
    }
    if let Some(value) = object.attr_real("motor_efficiency") {
        record.set_real("motor_efficiency", value);
    }
    if let Some(value) = object.attr_real("design_pump_head") {
        record.set_real("design_pump_head", value);
    }
    VisitorOutcome::produced(record)
}

/// Chilled-water coil: the shared leaf of the plant assembly. Multiple
/// coil systems may reference one coil; the cache guarantees a single
/// record and a single name.
pub(super) fn translate_coil_cooling_water(
    object: &SourceObject,
    resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let mut record = Record::new(COIL_COOLING_WATER, object.name());
    if object.is_autosized("design_water_flow_rate") {
        record.set_autosize("design_water_flow_rate");
    } else if let Some(value) = object.attr_real("design_water_flow_rate") {
        record.set_real("design_water_flow_rate", value);
    }
    if let Some(schedule) = object.reference("availability_schedule") {
        if let Some(name) = resolver.name_of(schedule) {
            record.set_name_ref("availability_schedule_name", name);
        }
    }
    VisitorOutcome::produced(record)
}

/// Coil system: wraps a required cooling coil and an optional
/// availability schedule, both resolved through the cache so their
/// records are named before this one writes its reference fields.
pub(super) fn translate_coil_system_cooling_water(
    object: &SourceObject,
    resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let mut record = Record::new(COIL_SYSTEM_COOLING_WATER, object.name());
    if let Some(node) = object.attr_str("air_inlet_node") {
        record.set_str("air_inlet_node_name", node);
    }
    if let Some(node) = object.attr_str("air_outlet_node") {
        record.set_str("air_outlet_node_name", node);
    }

    // Cooling Coil Name: required object reference.
    let Some(coil_name) = object
        .reference("cooling_coil")
        .and_then(|coil| resolver.name_of(coil))
    else {
        return VisitorOutcome::failed(
            Severity::Error,
            "required cooling coil is missing or could not be translated",
        );
    };
    record.set_str("cooling_coil_object_type", COIL_COOLING_WATER.as_str());
    record.set_name_ref("cooling_coil_name", coil_name);

    // Availability Schedule Name: optional object reference.
    if let Some(schedule) = object.reference("availability_schedule") {
        if let Some(name) = resolver.name_of(schedule) {
            record.set_name_ref("availability_schedule_name", name);
        }
    }

    match object.attr_bool("run_on_sensible_load") {
        Some(true) | None => record.set_str("run_on_sensible_load", "Yes"),
        Some(false) => record.set_str("run_on_sensible_load", "No"),
    };
    VisitorOutcome::produced(record)
}
