use super::*;
use crate::ast::filter::Predicate;
use crate::ast::map::MapEntry;
use crate::ast::range::Range;

fn pos(line: u32) -> SourcePosition {
    SourcePosition::new("d.dc", line, 1)
}

fn filter(polarity: Polarity, values: &[i64], line: u32) -> Filter {
    let mut f = Filter::new(polarity, pos(line));
    for v in values {
        f.add(Predicate::Value(Value::Integer(*v))).unwrap();
    }
    f
}

fn deny_non_positive(line: u32) -> Filter {
    let mut r = Range::new(pos(line));
    r.set_upper(Value::Integer(0)).unwrap();
    let mut f = Filter::new(Polarity::Deny, pos(line));
    f.add(Predicate::Range(r)).unwrap();
    f
}

#[test]
fn allow_list_alone() {
    let mut set = VariableDescriptionSet::new(pos(1));
    set.set_filter(filter(Polarity::Allow, &[1, 2, 3], 2)).unwrap();
    assert!(set.check_value(&Value::Integer(2)));
    assert!(!set.check_value(&Value::Integer(4)));
}

#[test]
fn deny_overrides_allow() {
    let mut set = VariableDescriptionSet::new(pos(1));
    set.set_allow(filter(Polarity::Allow, &[-1, 1, 2, 3], 2)).unwrap();
    set.set_deny(deny_non_positive(3)).unwrap();
    assert!(!set.check_value(&Value::Integer(-1)));
    assert!(set.check_value(&Value::Integer(1)));
}

#[test]
fn empty_set_accepts_everything() {
    let set = VariableDescriptionSet::new(pos(1));
    assert!(set.check_value(&Value::Bool(false)));
    assert_eq!(set.check(), Ok(None));
}

#[test]
fn second_part_of_a_kind_is_rejected() {
    let mut set = VariableDescriptionSet::new(pos(1));
    set.set_filter(filter(Polarity::Allow, &[1], 2)).unwrap();
    let err = set.set_filter(filter(Polarity::Allow, &[2], 7)).unwrap_err();
    assert_eq!(err.pos, pos(7));
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateDescription {
            kind: DescriptionKind::Allow,
            first: "allow {1}".into(),
            second: "allow {2}".into(),
        }
    );

    set.set_default(DefaultValue::new(Value::Integer(1), pos(3)))
        .unwrap();
    let err = set
        .set_default(DefaultValue::new(Value::Integer(1), pos(4)))
        .unwrap_err();
    assert!(err.to_string().contains("Multiple default values"));
}

#[test]
fn resolve_display_falls_back() {
    let mut map = Map::new(pos(2));
    map.add(MapEntry::new(
        Value::Integer(0),
        Value::String("OFF".into()),
        pos(2),
    ))
    .unwrap();
    let mut set = VariableDescriptionSet::new(pos(1));
    set.set_map(map).unwrap();

    let fallback = Value::Integer(9);
    assert_eq!(
        set.resolve_display(&Value::Integer(0), &fallback),
        &Value::String("OFF".into())
    );
    assert_eq!(set.resolve_display(&Value::Integer(9), &fallback), &fallback);

    let bare = VariableDescriptionSet::new(pos(1));
    assert_eq!(bare.resolve_display(&Value::Integer(0), &fallback), &fallback);
}

#[test]
fn check_requires_agreeing_types() {
    let mut set = VariableDescriptionSet::new(pos(1));
    set.set_allow(filter(Polarity::Allow, &[1, 2], 2)).unwrap();
    set.set_default(DefaultValue::new(Value::Float(1.0), pos(3)))
        .unwrap();
    let err = set.check().unwrap_err();
    assert_eq!(err.kind, ErrorKind::incompatible("int", "float"));
    assert_eq!(err.pos, pos(3));
}

#[test]
fn check_requires_default_to_pass_filters() {
    let mut set = VariableDescriptionSet::new(pos(1));
    set.set_deny(deny_non_positive(2)).unwrap();
    set.set_default(DefaultValue::new(Value::Integer(0), pos(3)))
        .unwrap();
    let err = set.check().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ValueRejectedByFilter { .. }));

    let mut ok = VariableDescriptionSet::new(pos(1));
    ok.set_deny(deny_non_positive(2)).unwrap();
    ok.set_default(DefaultValue::new(Value::Integer(5), pos(3)))
        .unwrap();
    assert_eq!(ok.check(), Ok(Some(Type::INT)));
    assert_eq!(ok.default_value(), Some(&Value::Integer(5)));
}
