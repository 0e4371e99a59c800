// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Output-request visitors: monthly tables and the two accumulators.

use joule_model::SourceObject;

use crate::record::{FieldValue, Record};
use crate::translate::DependencyResolver;
use crate::visitor::VisitorOutcome;

use super::{OUTPUT_METER, OUTPUT_TABLE_MONTHLY, SUMMARY_REPORTS};

/// Name of the one summary-reports record a run may contain.
pub const SUMMARY_REPORTS_NAME: &str = "Summary Reports";

/// Monthly output table. Variable rows live on referenced spec objects;
/// a table without any rows legitimately produces nothing.
pub(super) fn translate_output_table_monthly(
    object: &SourceObject,
    resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let specs = object.references("variable_groups");
    if specs.is_empty() {
        return VisitorOutcome::Nothing;
    }
    let mut record = Record::new(OUTPUT_TABLE_MONTHLY, object.name());
    if let Some(digits) = object.attr_int("digits_after_decimal") {
        record.set_int("digits_after_decimal", digits);
    }
    for &spec in specs {
        let Some(spec_object) = resolver.object(spec) else {
            continue;
        };
        let variable = spec_object.attr_str("variable").unwrap_or_default();
        let aggregation = spec_object.attr_str("aggregation").unwrap_or("SumOrAverage");
        record.push_group(vec![
            FieldValue::Str(variable.to_owned()),
            FieldValue::Str(aggregation.to_owned()),
        ]);
    }
    VisitorOutcome::produced(record)
}

/// Table variable spec: carried entirely by the owning table's repeating
/// group. Produces no record of its own — a legitimate, silent no-output.
pub(super) fn translate_variable_spec(
    _object: &SourceObject,
    _resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    VisitorOutcome::Nothing
}

/// Summary-report request: contributes one keyed row to the singleton
/// summary-reports record. Independent requests union; a repeated report
/// key keeps the first contribution's row.
pub(super) fn translate_report_request(
    object: &SourceObject,
    _resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let Some(report) = object.attr_str("report") else {
        return VisitorOutcome::Nothing;
    };
    let mut record = Record::new(SUMMARY_REPORTS, SUMMARY_REPORTS_NAME);
    record.push_group(vec![FieldValue::Str(report.to_owned())]);
    VisitorOutcome::produced(record)
}

/// Output-meter request: equality-dedup accumulator. Two requests for the
/// same meter and frequency collapse to a single record, whatever their
/// request objects were named.
pub(super) fn translate_meter_request(
    object: &SourceObject,
    _resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let Some(meter) = object.attr_str("meter_name") else {
        return VisitorOutcome::Nothing;
    };
    let mut record = Record::new(OUTPUT_METER, object.name());
    record.set_str("key_name", meter);
    record.set_str(
        "reporting_frequency",
        object.attr_str("frequency").unwrap_or("Hourly"),
    );
    VisitorOutcome::produced(record)
}
