use super::*;
use crate::foundation::error::ErrorKind;

fn pos() -> SourcePosition {
    SourcePosition::new("f.dc", 5, 9)
}

fn ints(polarity: Polarity, values: &[i64]) -> Filter {
    let mut f = Filter::new(polarity, pos());
    for v in values {
        f.add(Predicate::Value(Value::Integer(*v))).unwrap();
    }
    f
}

#[test]
fn membership_is_or_across_predicates() {
    let mut f = ints(Polarity::Allow, &[1]);
    let mut r = Range::new(pos());
    r.set_lower(Value::Integer(10)).unwrap();
    r.set_upper(Value::Integer(20)).unwrap();
    f.add(Predicate::Range(r)).unwrap();

    assert!(f.contains(&Value::Integer(1)));
    assert!(f.contains(&Value::Integer(15)));
    assert!(!f.contains(&Value::Integer(5)));
    assert_eq!(f.len(), 2);
    assert_eq!(f.to_string(), "allow {1, [10..20]}");
}

#[test]
fn first_predicate_fixes_the_type() {
    let mut f = ints(Polarity::Deny, &[1, 2]);
    assert_eq!(f.ty(), Some(&Type::INT));
    let err = f.add(Predicate::Value(Value::Float(1.0))).unwrap_err();
    assert_eq!(err.kind, ErrorKind::incompatible("int", "float"));
    assert_eq!(f.len(), 2);
    f.check().unwrap();
}

#[test]
fn unbounded_range_predicate_has_no_type() {
    let mut f = Filter::new(Polarity::Allow, pos());
    let err = f.add(Predicate::Range(Range::new(pos()))).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UndefinedType);
    assert!(f.is_empty());
}

#[test]
fn values_of_other_types_never_match() {
    let f = ints(Polarity::Allow, &[1]);
    assert!(!f.contains(&Value::Float(1.0)));
    assert!(!f.contains(&Value::Bool(true)));
}
