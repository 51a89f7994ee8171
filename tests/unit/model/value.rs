use super::*;

#[test]
fn integers_accept_all_radixes() {
    assert_eq!(Value::parse(BuiltinType::Int, "42"), Ok(Value::Integer(42)));
    assert_eq!(Value::parse(BuiltinType::Int, "-7"), Ok(Value::Integer(-7)));
    assert_eq!(Value::parse(BuiltinType::Int, "0x1F"), Ok(Value::Integer(31)));
    assert_eq!(Value::parse(BuiltinType::Int, "0o17"), Ok(Value::Integer(15)));
    assert_eq!(Value::parse(BuiltinType::Int, "0b101"), Ok(Value::Integer(5)));
    assert_eq!(Value::parse(BuiltinType::Int, "-0x10"), Ok(Value::Integer(-16)));
    assert_eq!(
        Value::parse(BuiltinType::Int, "-9223372036854775808"),
        Ok(Value::Integer(i64::MIN))
    );
}

#[test]
fn malformed_integers_are_rejected() {
    for text in ["", "-", "0x", "1.5", "12a", "0x-1", "abc", "9223372036854775808"] {
        let err = Value::parse(BuiltinType::Int, text).unwrap_err();
        assert!(
            matches!(err, ErrorKind::InvalidLiteral { .. }),
            "{text:?} gave {err:?}"
        );
    }
}

#[test]
fn floats_accept_integer_and_exponent_forms() {
    assert_eq!(Value::parse(BuiltinType::Float, "2"), Ok(Value::Float(2.0)));
    assert_eq!(Value::parse(BuiltinType::Float, "0.5"), Ok(Value::Float(0.5)));
    assert_eq!(Value::parse(BuiltinType::Float, "-1.5e3"), Ok(Value::Float(-1500.0)));
    assert!(Value::parse(BuiltinType::Float, "inf").is_err());
    assert!(Value::parse(BuiltinType::Float, "nan").is_err());
    assert!(Value::parse(BuiltinType::Float, "1.2.3").is_err());
}

#[test]
fn bools_are_exact_keywords() {
    assert_eq!(Value::parse(BuiltinType::Bool, "true"), Ok(Value::Bool(true)));
    assert_eq!(Value::parse(BuiltinType::Bool, "false"), Ok(Value::Bool(false)));
    assert!(Value::parse(BuiltinType::Bool, "True").is_err());
    assert!(Value::parse(BuiltinType::Bool, "1").is_err());
}

#[test]
fn strings_keep_their_quotes() {
    let v = Value::parse(BuiltinType::String, "\"eth0\"").unwrap();
    assert_eq!(v.raw(), "\"eth0\"");
}

#[test]
fn equality_requires_matching_type() {
    assert_eq!(Value::Integer(1), Value::Integer(1));
    assert_ne!(Value::Integer(1), Value::Integer(2));
    assert_ne!(Value::Integer(1), Value::Float(1.0));
    assert_ne!(Value::Bool(true), Value::String("true".into()));
}

#[test]
fn raw_renders_macro_payloads() {
    assert_eq!(Value::Integer(-3).raw(), "-3");
    assert_eq!(Value::Float(2.0).raw(), "2.0");
    assert_eq!(Value::Float(0.5).raw(), "0.5");
    assert_eq!(Value::Bool(false).raw(), "false");
}

#[test]
fn compare_orders_numbers_of_one_type() {
    assert_eq!(
        Value::Integer(1).compare(&Value::Integer(3)),
        Ok(Ordering::Less)
    );
    assert_eq!(
        Value::Float(2.5).compare(&Value::Float(2.5)),
        Ok(Ordering::Equal)
    );
    assert_eq!(
        Value::Integer(1).compare(&Value::Float(1.0)),
        Err(ErrorKind::incompatible("int", "float"))
    );
}

#[test]
fn display_tags_the_type() {
    assert_eq!(Value::Integer(5).to_string(), "int(5)");
    assert_eq!(Value::Integer(5).ty(), Type::INT);
}
