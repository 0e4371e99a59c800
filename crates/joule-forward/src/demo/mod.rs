// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Demo leaf visitors showcasing the engine's calling contract.
//!
//! These visitors cover a small, coherent slice of a building-energy
//! model — schedules, a water-coil plant assembly, output requests, and a
//! zone equipment group — enough to exercise every engine behavior:
//! recursive dependency resolution, shared-leaf at-most-once naming,
//! autosized fields, legitimate no-output skips, accumulator merging, and
//! structural group failure. They are collaborators of the engine, not
//! part of it: each is an ordinary [`crate::VisitorFn`] registered through
//! the public API, and applications replace them wholesale with their own
//! catalog.

mod output;
mod plant;
mod schedule;
mod zones;

use joule_model::ObjectType;

use crate::translate::Translator;
use crate::visitor::{RegistryError, VisitorRegistry};

/// Name of the singleton summary-reports record.
pub use output::SUMMARY_REPORTS_NAME;

/// Constant-value schedule.
pub const SCHEDULE_CONSTANT: ObjectType = ObjectType("Schedule:Constant");
/// Adiabatic pipe segment.
pub const PIPE_ADIABATIC: ObjectType = ObjectType("Pipe:Adiabatic");
/// Variable-speed condensate pump.
pub const PUMP_VARIABLE_SPEED: ObjectType = ObjectType("Pump:VariableSpeed:Condensate");
/// Chilled-water cooling coil.
pub const COIL_COOLING_WATER: ObjectType = ObjectType("Coil:Cooling:Water");
/// Coil system wrapping a cooling coil.
pub const COIL_SYSTEM_COOLING_WATER: ObjectType = ObjectType("CoilSystem:Cooling:Water");
/// Monthly output table with repeating variable groups.
pub const OUTPUT_TABLE_MONTHLY: ObjectType = ObjectType("Output:Table:Monthly");
/// Row of a monthly output table (variable + aggregation). Carried by the
/// table record; produces no record of its own.
pub const OUTPUT_VARIABLE_SPEC: ObjectType = ObjectType("OutputVariableSpec");
/// Request for a named summary report section.
pub const REPORT_REQUEST: ObjectType = ObjectType("Report:Request");
/// Process-singleton summary-reports accumulator record.
pub const SUMMARY_REPORTS: ObjectType = ObjectType("Output:Table:SummaryReports");
/// Request for an output meter.
pub const METER_REQUEST: ObjectType = ObjectType("Meter:Request");
/// Equality-dedup output meter record.
pub const OUTPUT_METER: ObjectType = ObjectType("Output:Meter");
/// Hot-water baseboard unit.
pub const BASEBOARD_WATER: ObjectType = ObjectType("ZoneHVAC:Baseboard:Water");
/// Electric baseboard unit.
pub const BASEBOARD_ELECTRIC: ObjectType = ObjectType("ZoneHVAC:Baseboard:Electric");
/// Zone equipment group whose members must share one baseboard subtype.
pub const EQUIPMENT_GROUP: ObjectType = ObjectType("ZoneHVAC:EquipmentGroup");

/// Builds the demo visitor registry.
///
/// Registration order is the driver's priority order: shared leaves
/// (schedules, coils) first, assemblies after, output requests last.
///
/// # Errors
/// Returns [`RegistryError`] only if a type is registered twice, which
/// would be a bug in this catalog.
pub fn demo_registry() -> Result<VisitorRegistry, RegistryError> {
    let mut registry = VisitorRegistry::new();
    registry.register(SCHEDULE_CONSTANT, schedule::translate_schedule_constant)?;
    registry.register(COIL_COOLING_WATER, plant::translate_coil_cooling_water)?;
    registry.register(PIPE_ADIABATIC, plant::translate_pipe_adiabatic)?;
    registry.register(PUMP_VARIABLE_SPEED, plant::translate_pump_variable_speed)?;
    registry.register(
        COIL_SYSTEM_COOLING_WATER,
        plant::translate_coil_system_cooling_water,
    )?;
    registry.register(BASEBOARD_WATER, zones::translate_baseboard_water)?;
    registry.register(BASEBOARD_ELECTRIC, zones::translate_baseboard_electric)?;
    registry.register(EQUIPMENT_GROUP, zones::translate_equipment_group)?;
    registry.register(OUTPUT_TABLE_MONTHLY, output::translate_output_table_monthly)?;
    registry.register(OUTPUT_VARIABLE_SPEC, output::translate_variable_spec)?;
    registry.register(REPORT_REQUEST, output::translate_report_request)?;
    registry.register(METER_REQUEST, output::translate_meter_request)?;
    Ok(registry)
}

/// Builds a translator over the demo registry with the demo accumulator
/// types marked: summary reports merge as a singleton, meters dedup by
/// content.
///
/// # Errors
/// Propagates [`RegistryError`] from [`demo_registry`].
pub fn demo_translator() -> Result<Translator, RegistryError> {
    let mut translator = Translator::new(demo_registry()?);
    translator.mark_singleton(SUMMARY_REPORTS);
    translator.mark_dedup(OUTPUT_METER);
    Ok(translator)
}
