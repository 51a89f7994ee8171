use super::*;
use crate::ast::description::DefaultValue;
use crate::ast::filter::{Filter, Polarity, Predicate};
use crate::ast::map::{Map, MapEntry};
use crate::ast::qualifier::Qualifier;

fn pos(line: u32) -> SourcePosition {
    SourcePosition::new("v.dc", line, 1)
}

fn mode_description() -> Rc<VariableDescriptionSet> {
    let mut set = VariableDescriptionSet::new(pos(1));
    let mut allow = Filter::new(Polarity::Allow, pos(2));
    for v in [0, 1, 2] {
        allow.add(Predicate::Value(Value::Integer(v))).unwrap();
    }
    set.set_allow(allow).unwrap();
    let mut map = Map::new(pos(3));
    map.add(MapEntry::new(
        Value::Integer(1),
        Value::String("MODE_FAST".into()),
        pos(3),
    ))
    .unwrap();
    set.set_map(map).unwrap();
    set.set_default(DefaultValue::new(Value::Integer(1), pos(4)))
        .unwrap();
    Rc::new(set)
}

#[test]
fn plain_variable_without_value_has_none() {
    let v = Variable::new("x", Type::INT, Qualified::default(), None, pos(1)).unwrap();
    assert_eq!(v.read().unwrap_err().kind, ErrorKind::NoValue);
    assert_eq!(v.name(), "x");
}

#[test]
fn default_and_map_drive_reads() {
    let mut v = Variable::new(
        "mode",
        Type::INT,
        Qualified::default(),
        Some(mode_description()),
        pos(5),
    )
    .unwrap();
    assert_eq!(v.read(), Ok(&Value::Integer(1)));
    assert_eq!(v.display_value(), Ok(&Value::String("MODE_FAST".into())));

    v.write(Value::Integer(2)).unwrap();
    assert!(v.is_written());
    assert_eq!(v.read(), Ok(&Value::Integer(2)));
    assert_eq!(v.display_value(), Ok(&Value::Integer(2)));
}

#[test]
fn filters_reject_writes() {
    let mut v = Variable::new(
        "mode",
        Type::INT,
        Qualified::default(),
        Some(mode_description()),
        pos(5),
    )
    .unwrap();
    let err = v.write(Value::Integer(7)).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::ValueRejectedByFilter {
            target: "mode".into(),
            value: "7".into(),
        }
    );
    assert_eq!(v.read(), Ok(&Value::Integer(1)));
}

#[test]
fn writes_must_match_declared_type() {
    let mut v = Variable::new("x", Type::INT, Qualified::default(), None, pos(1)).unwrap();
    let err = v.write(Value::String("\"a\"".into())).unwrap_err();
    assert_eq!(err.kind, ErrorKind::incompatible("int", "string"));
}

#[test]
fn description_must_match_declared_type() {
    let err = Variable::new(
        "x",
        Type::FLOAT,
        Qualified::default(),
        Some(mode_description()),
        pos(1),
    )
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::incompatible("float", "int"));
}

#[test]
fn const_variable_takes_one_write() {
    let mut q = Qualified::default();
    q.add(Qualifier::constant(pos(1)));
    let mut v = Variable::new("k", Type::BOOL, q, None, pos(1)).unwrap();
    assert!(v.is_const());
    v.write(Value::Bool(true)).unwrap();
    assert_eq!(
        v.write(Value::Bool(false)).unwrap_err().kind,
        ErrorKind::ConstAssignment
    );
}

#[test]
fn instantiated_variables_get_fresh_qualifiers() {
    let mut q = Qualified::default();
    q.add(Qualifier::constant(pos(1)));
    let member = Member::new("k", Type::INT, q, Some(mode_description()), pos(1)).unwrap();

    let mut a = Variable::from_member(&member, pos(9)).unwrap();
    let mut b = Variable::from_member(&member, pos(10)).unwrap();
    a.write(Value::Integer(0)).unwrap();
    b.write(Value::Integer(2)).unwrap();
    assert_eq!(a.read(), Ok(&Value::Integer(0)));
    assert_eq!(b.read(), Ok(&Value::Integer(2)));
    assert!(a.description().is_some());
}
