// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>

#![allow(missing_docs)]
use std::cell::Cell;

use joule_forward::{
    DependencyResolver, Record, Translator, VisitorOutcome, VisitorRegistry,
};
use joule_model::{Model, ObjectType, SourceObject};

const COIL: ObjectType = ObjectType("Coil:Cooling:Water");
const SYSTEM: ObjectType = ObjectType("CoilSystem:Cooling:Water");

thread_local! {
    static COIL_CALLS: Cell<usize> = const { Cell::new(0) };
}

fn coil_visitor(
    object: &SourceObject,
    _resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    COIL_CALLS.with(|calls| calls.set(calls.get() + 1));
    VisitorOutcome::produced(Record::new(COIL, object.name()))
}

fn system_visitor(
    object: &SourceObject,
    resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let mut record = Record::new(SYSTEM, object.name());
    if let Some(coil) = object.reference("cooling_coil") {
        if let Some(name) = resolver.name_of(coil) {
            record.set_name_ref("cooling_coil_name", name);
        }
    }
    if let Some(coil) = object.reference("heat_recovery_coil") {
        if let Some(name) = resolver.name_of(coil) {
            record.set_name_ref("companion_coil_name", name);
        }
    }
    VisitorOutcome::produced(record)
}

fn shared_coil_model(parents: usize) -> Model {
    let mut model = Model::new();
    let coil = model
        .insert(SourceObject::build(COIL, "shared coil").finish())
        .unwrap();
    for i in 0..parents {
        model
            .insert(
                SourceObject::build(SYSTEM, format!("system {i}"))
                    .reference("cooling_coil", coil)
                    .finish(),
            )
            .unwrap();
    }
    model
}

fn translator(system_first: bool) -> Translator {
    let mut registry = VisitorRegistry::new();
    if system_first {
        registry.register(SYSTEM, system_visitor).unwrap();
        registry.register(COIL, coil_visitor).unwrap();
    } else {
        registry.register(COIL, coil_visitor).unwrap();
        registry.register(SYSTEM, system_visitor).unwrap();
    }
    Translator::new(registry)
}

#[test]
fn shared_leaf_is_translated_exactly_once() {
    COIL_CALLS.with(|calls| calls.set(0));
    let model = shared_coil_model(3);
    // Systems enumerate first, so the coil is only ever reached through
    // recursive resolution — three referencing systems, one visitor call.
    let translation = translator(true).translate(&model).unwrap();

    assert_eq!(COIL_CALLS.with(Cell::get), 1);
    assert!(translation.log().is_empty());
    assert_eq!(translation.store().len(), 4);

    let names: Vec<Option<&joule_forward::FieldValue>> = translation
        .store()
        .records()
        .filter(|r| r.ty() == SYSTEM)
        .map(|r| r.field("cooling_coil_name"))
        .collect();
    assert_eq!(names.len(), 3);
    for field in names {
        assert_eq!(
            field,
            Some(&joule_forward::FieldValue::NameRef("shared coil".to_owned()))
        );
    }
}

#[test]
fn emission_order_follows_first_reference() {
    COIL_CALLS.with(|calls| calls.set(0));
    let model = shared_coil_model(2);
    let translation = translator(true).translate(&model).unwrap();

    // The first system triggers the coil, so the coil's record lands
    // before any system record even though systems enumerate first.
    let order: Vec<(ObjectType, &str)> = translation
        .store()
        .records()
        .map(|r| (r.ty(), r.name()))
        .collect();
    assert_eq!(
        order,
        [
            (COIL, "shared coil"),
            (SYSTEM, "system 0"),
            (SYSTEM, "system 1"),
        ]
    );
}

#[test]
fn enumeration_first_leaf_is_not_retranslated_on_reference() {
    COIL_CALLS.with(|calls| calls.set(0));
    let model = shared_coil_model(3);
    // Coils enumerate first this time; references hit the settled cache.
    let translation = translator(false).translate(&model).unwrap();
    assert_eq!(COIL_CALLS.with(Cell::get), 1);
    assert_eq!(translation.store().len(), 4);
}

#[test]
fn two_references_from_one_visitor_share_the_record() {
    COIL_CALLS.with(|calls| calls.set(0));
    let mut model = Model::new();
    let coil = model
        .insert(SourceObject::build(COIL, "shared coil").finish())
        .unwrap();
    model
        .insert(
            SourceObject::build(SYSTEM, "system 0")
                .reference("cooling_coil", coil)
                .reference("heat_recovery_coil", coil)
                .finish(),
        )
        .unwrap();

    let translation = translator(true).translate(&model).unwrap();
    assert_eq!(COIL_CALLS.with(Cell::get), 1);
    let system = translation
        .store()
        .records()
        .find(|r| r.ty() == SYSTEM)
        .unwrap();
    assert_eq!(system.field("cooling_coil_name"), system.field("companion_coil_name"));
}

#[test]
fn each_run_uses_a_fresh_cache() {
    COIL_CALLS.with(|calls| calls.set(0));
    let model = shared_coil_model(2);
    let translator = translator(true);
    translator.translate(&model).unwrap();
    translator.translate(&model).unwrap();
    // One visitor call per run: the cache is per-run state, not
    // translator state.
    assert_eq!(COIL_CALLS.with(Cell::get), 2);
}
