//! Tests for [`Value`] and [`NativeFunction`].

use rstest::rstest;

use crate::{NativeFunction, Object, RegExp, TypeDef, Value};

#[test]
fn conversions_build_expected_variants() {
    assert_eq!(Value::from("a"), Value::String("a".into()));
    assert_eq!(Value::from(String::from("b")), Value::String("b".into()));
    assert_eq!(Value::from(true), Value::Boolean(true));
    assert_eq!(Value::from(3), Value::Number(3.0));
    assert_eq!(
        Value::from(vec![Value::Null]),
        Value::Array(vec![Value::Null])
    );
}

#[test]
fn accessors_return_payloads() {
    assert_eq!(Value::from("abc").as_str(), Some("abc"));
    assert_eq!(Value::from(2).as_number(), Some(2.0));
    assert_eq!(Value::from(false).as_bool(), Some(false));
    assert_eq!(Value::array([1]).as_array(), Some(&[Value::from(1)][..]));
    assert_eq!(Value::arguments([1]).as_array().map(<[Value]>::len), Some(1));
    assert!(Value::Null.as_str().is_none());
    assert!(Value::from(Object::plain()).as_object().is_some());
}

#[rstest]
#[case::null(Value::Null, true)]
#[case::undefined(Value::Undefined, true)]
#[case::zero(Value::from(0), false)]
#[case::empty_string(Value::from(""), false)]
fn nullish_values(#[case] value: Value, #[case] expected: bool) {
    assert_eq!(value.is_nullish(), expected);
}

#[test]
fn functions_compare_by_identity() {
    let f = NativeFunction::new("f", |_| Ok(Value::Null));
    let g = NativeFunction::new("f", |_| Ok(Value::Null));
    assert_eq!(f, f.clone());
    assert_ne!(f, g);
    assert_eq!(format!("{f:?}"), "NativeFunction(\"f\")");
}

#[test]
fn objects_compare_by_type_and_fields() {
    let point = TypeDef::with_identity("Point", "point");
    let a = point.instance().with_field("x", 1);
    let b = point.instance().with_field("x", 1);
    let other_type = TypeDef::with_identity("Point", "point").instance().with_field("x", 1);
    assert_eq!(a, b);
    assert_ne!(a, other_type);
}

#[rstest]
#[case::string(Value::from("abc"), "abc")]
#[case::integer(Value::from(4), "4")]
#[case::fraction(Value::from(1.5), "1.5")]
#[case::array(Value::array([Value::from(1), Value::from("a")]), "[1, a]")]
#[case::regexp(Value::from(RegExp::new("a+", "gi")), "/a+/gi")]
#[case::null(Value::Null, "null")]
#[case::object(Value::from(TypeDef::with_identity("Dog", "dog").instance()), "[object Dog]")]
fn display_renders_values(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[test]
fn regexp_exposes_source_and_flags() {
    let pattern = RegExp::new("^a", "m");
    assert_eq!(pattern.source(), "^a");
    assert_eq!(pattern.flags(), "m");
}
