// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>

#![allow(missing_docs)]
use joule_forward::{
    DependencyResolver, Record, Severity, Translator, VisitorOutcome, VisitorRegistry,
};
use joule_model::{Model, ObjectType, SourceObject};

const GROUP: ObjectType = ObjectType("ZoneHVAC:EquipmentGroup");
const WATER: ObjectType = ObjectType("ZoneHVAC:Baseboard:Water");
const ELECTRIC: ObjectType = ObjectType("ZoneHVAC:Baseboard:Electric");
const PIPE: ObjectType = ObjectType("Pipe:Adiabatic");

fn leaf_visitor(
    object: &SourceObject,
    _resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    VisitorOutcome::produced(Record::new(object.ty(), object.name()))
}

/// Group owner: members must all share one subtype. On a mixed group the
/// owner fails and asks the driver to drop the members with it.
fn group_visitor(
    object: &SourceObject,
    resolver: &mut DependencyResolver<'_, '_>,
) -> VisitorOutcome {
    let members = object.references("members");
    let mut subtype: Option<ObjectType> = None;
    for &member in members {
        let Some(member_object) = resolver.object(member) else {
            return VisitorOutcome::failed_dropping(
                Severity::Error,
                "member absent from the model",
                members.to_vec(),
            );
        };
        match subtype {
            None => subtype = Some(member_object.ty()),
            Some(ty) if ty == member_object.ty() => {}
            Some(_) => {
                return VisitorOutcome::failed_dropping(
                    Severity::Error,
                    "group mixes incompatible equipment subtypes",
                    members.to_vec(),
                );
            }
        }
    }
    let mut record = Record::new(GROUP, object.name());
    for &member in members {
        if let Some(name) = resolver.name_of(member) {
            record.push_group(vec![joule_forward::FieldValue::NameRef(name)]);
        }
    }
    VisitorOutcome::produced(record)
}

/// Groups registered first, so a broken group settles before its members
/// are ever enumerated — the members really are dropped.
fn registry() -> VisitorRegistry {
    let mut registry = VisitorRegistry::new();
    registry.register(GROUP, group_visitor).unwrap();
    registry.register(WATER, leaf_visitor).unwrap();
    registry.register(ELECTRIC, leaf_visitor).unwrap();
    registry.register(PIPE, leaf_visitor).unwrap();
    registry
}

fn mixed_group_model() -> Model {
    let mut model = Model::new();
    let water = model
        .insert(SourceObject::build(WATER, "bb water").finish())
        .unwrap();
    let electric = model
        .insert(SourceObject::build(ELECTRIC, "bb electric").finish())
        .unwrap();
    model
        .insert(
            SourceObject::build(GROUP, "mixed group")
                .references("members", [water, electric])
                .finish(),
        )
        .unwrap();
    // Independent, valid object: must be untouched by the group failure.
    model
        .insert(SourceObject::build(PIPE, "bypass pipe").finish())
        .unwrap();
    model
}

#[test]
fn invalid_owner_and_its_members_are_dropped() {
    let translation = Translator::new(registry())
        .translate(&mixed_group_model())
        .unwrap();

    let names: Vec<&str> = translation.store().records().map(Record::name).collect();
    assert_eq!(names, ["bypass pipe"]);

    let errors: Vec<&str> = translation
        .log()
        .entries()
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(errors.len(), 3);
    assert!(errors[0].contains("'mixed group' was not translated"));
    assert!(errors[1].contains("dropped because its group owner"));
    assert!(errors[2].contains("dropped because its group owner"));
}

#[test]
fn uniform_group_translates_with_member_references() {
    let mut model = Model::new();
    let w1 = model
        .insert(SourceObject::build(WATER, "bb 1").finish())
        .unwrap();
    let w2 = model
        .insert(SourceObject::build(WATER, "bb 2").finish())
        .unwrap();
    model
        .insert(
            SourceObject::build(GROUP, "uniform group")
                .references("members", [w1, w2])
                .finish(),
        )
        .unwrap();

    let translation = Translator::new(registry()).translate(&model).unwrap();
    assert!(translation.log().is_empty());
    let group = translation
        .store()
        .records()
        .find(|r| r.ty() == GROUP)
        .unwrap();
    assert_eq!(group.groups().len(), 2);
    // Members settle through the group's own resolution, before the group
    // record is emitted.
    let names: Vec<&str> = translation.store().records().map(Record::name).collect();
    assert_eq!(names, ["bb 1", "bb 2", "uniform group"]);
}

#[test]
fn already_translated_member_is_retained_with_a_warning() {
    // Members registered before the group this time: they settle first and
    // the broken group can no longer retract them.
    let mut registry = VisitorRegistry::new();
    registry.register(WATER, leaf_visitor).unwrap();
    registry.register(ELECTRIC, leaf_visitor).unwrap();
    registry.register(GROUP, group_visitor).unwrap();
    registry.register(PIPE, leaf_visitor).unwrap();

    let translation = Translator::new(registry)
        .translate(&mixed_group_model())
        .unwrap();

    let names: Vec<&str> = translation.store().records().map(Record::name).collect();
    assert_eq!(names, ["bb water", "bb electric", "bypass pipe"]);
    assert!(translation
        .log()
        .entries()
        .iter()
        .any(|e| e.severity == Severity::Warning && e.message.contains("retained")));
}
