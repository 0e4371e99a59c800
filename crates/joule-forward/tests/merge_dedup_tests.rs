// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>

#![allow(missing_docs)]
use joule_forward::demo::{
    demo_translator, METER_REQUEST, OUTPUT_METER, REPORT_REQUEST, SUMMARY_REPORTS,
    SUMMARY_REPORTS_NAME,
};
use joule_forward::{DedupOutcome, FieldValue, Record, RecordStore, SingletonCollision};
use joule_model::{Model, ObjectType, SourceObject};

fn contribution(keys: &[&str]) -> Record {
    let mut record = Record::new(SUMMARY_REPORTS, SUMMARY_REPORTS_NAME);
    for key in keys {
        record.push_group(vec![
            FieldValue::Str((*key).to_owned()),
            FieldValue::Str(format!("detail for {key}")),
        ]);
    }
    record
}

fn group_keys(record: &Record) -> Vec<String> {
    record
        .groups()
        .iter()
        .filter_map(|row| match row.first() {
            Some(FieldValue::Str(key)) => Some(key.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn singleton_union_law() {
    let mut store = RecordStore::new();
    let key = store.add_singleton(contribution(&["A", "B"]), SingletonCollision::FirstWins);
    let merged_key = store.add_singleton(contribution(&["B", "C"]), SingletonCollision::FirstWins);
    assert_eq!(key, merged_key);

    let merged = store.get(key).unwrap();
    assert_eq!(group_keys(merged), ["A", "B", "C"]);
    // B's row comes from the contribution merged first.
    assert_eq!(merged.groups()[1][1], FieldValue::Str("detail for B".to_owned()));
    assert_eq!(store.len(), 1);
}

#[test]
fn dedup_idempotence() {
    let mut store = RecordStore::new();
    let mut candidate = Record::new(OUTPUT_METER, "request 1");
    candidate.set_str("key_name", "Electricity:Facility");
    let mut duplicate = Record::new(OUTPUT_METER, "request 2");
    duplicate.set_str("key_name", "Electricity:Facility");

    let (first, key_a) = store.add_if_absent(candidate);
    let (second, key_b) = store.add_if_absent(duplicate);
    assert_eq!(first, DedupOutcome::Inserted);
    assert_eq!(second, DedupOutcome::SkippedAsDuplicate);
    assert_eq!(key_a, key_b);
    assert_eq!(store.len(), 1);
}

#[test]
fn report_requests_union_into_one_summary_record() {
    let mut model = Model::new();
    for (name, report) in [
        ("req 1", "AnnualBuildingUtilityPerformanceSummary"),
        ("req 2", "EnvelopeSummary"),
        ("req 3", "AnnualBuildingUtilityPerformanceSummary"),
    ] {
        model
            .insert(
                SourceObject::build(REPORT_REQUEST, name)
                    .string("report", report)
                    .finish(),
            )
            .unwrap();
    }

    let translation = demo_translator().unwrap().translate(&model).unwrap();
    let summaries: Vec<&Record> = translation
        .store()
        .records()
        .filter(|r| r.ty() == SUMMARY_REPORTS)
        .collect();
    assert_eq!(summaries.len(), 1);
    assert_eq!(
        group_keys(summaries[0]),
        [
            "AnnualBuildingUtilityPerformanceSummary",
            "EnvelopeSummary",
        ]
    );
}

#[test]
fn identical_meter_requests_collapse() {
    let mut model = Model::new();
    for name in ["lighting meter", "duplicate lighting meter"] {
        model
            .insert(
                SourceObject::build(METER_REQUEST, name)
                    .string("meter_name", "InteriorLights:Electricity")
                    .string("frequency", "Monthly")
                    .finish(),
            )
            .unwrap();
    }
    model
        .insert(
            SourceObject::build(METER_REQUEST, "gas meter")
                .string("meter_name", "Gas:Facility")
                .string("frequency", "Monthly")
                .finish(),
        )
        .unwrap();

    let translation = demo_translator().unwrap().translate(&model).unwrap();
    let meters: Vec<&Record> = translation
        .store()
        .records()
        .filter(|r| r.ty() == OUTPUT_METER)
        .collect();
    assert_eq!(meters.len(), 2);
    // The surviving duplicate keeps the first request's name.
    assert_eq!(meters[0].name(), "lighting meter");
    assert_eq!(meters[1].name(), "gas meter");
}

#[test]
fn distinct_types_never_cross_merge() {
    let mut store = RecordStore::new();
    let mut a = Record::new(ObjectType("Output:Variable"), "v");
    a.set_str("key", "x");
    let mut b = Record::new(OUTPUT_METER, "m");
    b.set_str("key", "x");
    let (first, _) = store.add_if_absent(a);
    let (second, _) = store.add_if_absent(b);
    assert_eq!(first, DedupOutcome::Inserted);
    assert_eq!(second, DedupOutcome::Inserted);
    assert_eq!(store.len(), 2);
}
