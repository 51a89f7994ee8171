use super::*;
use crate::foundation::error::ErrorKind;

fn pos(line: u32) -> SourcePosition {
    SourcePosition::new("c.dc", line, 3)
}

#[test]
fn constant_holds_its_value_and_refuses_writes() {
    let mut c = Constant::new("fast", Value::Integer(2), pos(1)).unwrap();
    assert_eq!(c.name(), "fast");
    assert_eq!(c.value(), Ok(&Value::Integer(2)));
    assert_eq!(c.ty(), Ok(&Type::INT));

    let err = c.write(Value::Integer(3)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConstAssignment);
    assert_eq!(c.value(), Ok(&Value::Integer(2)));
}

#[test]
fn list_type_is_fixed_by_first_member() {
    let mut arena = Arena::new();
    let mut list = ConstantList::new(pos(1));

    let a = Constant::new("a", Value::Integer(1), pos(2)).unwrap();
    let b = Constant::new("b", Value::Integer(2), pos(3)).unwrap();
    let s = Constant::new("s", Value::String("\"x\"".into()), pos(4)).unwrap();

    list.add(arena.alloc(a.clone()), &a).unwrap();
    list.add(arena.alloc(b.clone()), &b).unwrap();
    let err = list.add(arena.alloc(s.clone()), &s).unwrap_err();

    assert_eq!(err.kind, ErrorKind::incompatible("int", "string"));
    assert_eq!(err.pos, pos(4));
    assert_eq!(list.ids().len(), 2);
    assert_eq!(list.ty(), Some(&Type::INT));
    list.check(&arena).unwrap();
    assert_eq!(list.to_string(), "const {2 constants}");
}
