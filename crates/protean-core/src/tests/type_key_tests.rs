//! Tests for classification and type descriptors.

use std::str::FromStr;

use rstest::rstest;
use time::OffsetDateTime;

use crate::{
    BuiltinType, Identity, NativeFunction, Object, RegExp, TypeDef, TypeDescriptor, TypeKey, Value,
    classify,
};

#[rstest]
#[case::arguments(Value::arguments([1]), BuiltinType::Arguments)]
#[case::array(Value::array([1, 2]), BuiltinType::Array)]
#[case::boolean(Value::from(true), BuiltinType::Boolean)]
#[case::date(Value::from(OffsetDateTime::UNIX_EPOCH), BuiltinType::Date)]
#[case::function(Value::from(NativeFunction::new("f", |_| Ok(Value::Null))), BuiltinType::Function)]
#[case::null(Value::Null, BuiltinType::Null)]
#[case::number(Value::from(1.5), BuiltinType::Number)]
#[case::regexp(Value::from(RegExp::new("a+", "g")), BuiltinType::RegExp)]
#[case::string(Value::from("s"), BuiltinType::String)]
#[case::undefined(Value::Undefined, BuiltinType::Undefined)]
fn builtin_values_classify_structurally(#[case] value: Value, #[case] expected: BuiltinType) {
    assert_eq!(classify(&value), TypeKey::Builtin(expected));
}

#[test]
fn objects_classify_by_resolved_identity() {
    let user = TypeDef::with_identity("User", "user");
    let guest = TypeDef::builder("Guest").parent(&user).build();
    let key = classify(&Value::from(guest.instance()));
    assert_eq!(key, TypeKey::Other(Some(Identity::new("user"))));
    assert_eq!(key.bucket(), BuiltinType::Other);
    assert_eq!(key.identity().map(Identity::as_str), Some("user"));
}

#[test]
fn plain_objects_classify_without_identity() {
    let key = classify(&Value::from(Object::plain()));
    assert_eq!(key, TypeKey::Other(None));
    assert_eq!(key.to_string(), "Other");
}

#[test]
fn every_builtin_shape_classifies_back_to_its_bucket() {
    for bucket in BuiltinType::ALL {
        let key = classify(&bucket.instance_shape());
        assert_eq!(key.bucket(), bucket, "shape of {bucket} misclassified");
    }
}

#[rstest]
#[case::builtin(TypeDescriptor::from(BuiltinType::String), "String")]
#[case::other_bucket(TypeDescriptor::from(BuiltinType::Other), "Other")]
#[case::identified(TypeDescriptor::from(TypeDef::with_identity("Dog", "dog")), "Other(dog)")]
#[case::anonymous(TypeDescriptor::from(TypeDef::builder("Rock").build()), "Other")]
fn descriptors_classify_as_instance_shapes(#[case] descriptor: TypeDescriptor, #[case] key: &str) {
    assert_eq!(descriptor.type_key().to_string(), key);
}

#[test]
fn descriptor_names() {
    assert_eq!(TypeDescriptor::from(BuiltinType::RegExp).name(), "RegExp");
    assert_eq!(
        TypeDescriptor::from(&TypeDef::with_identity("Human", "human")).name(),
        "Human"
    );
}

#[test]
fn builtin_names_round_trip_through_strum() {
    for bucket in BuiltinType::ALL {
        let parsed = BuiltinType::from_str(&bucket.to_string()).expect("parse bucket name");
        assert_eq!(parsed, bucket);
    }
    assert!(BuiltinType::from_str("Object").is_err());
}
