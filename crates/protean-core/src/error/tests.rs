//! Unit tests for protocol error types.

use rstest::rstest;

use super::*;

#[test]
fn undeclared_method_message_names_protocol_and_method() {
    let error = ProtocolError::UndeclaredMethod {
        protocol: "Sequence".into(),
        method: "reverse".into(),
    };
    let message = error.to_string();
    assert!(
        message.contains("Sequence"),
        "expected protocol in message: {message}"
    );
    assert!(
        message.contains("'reverse'"),
        "expected method in message: {message}"
    );
}

#[test]
fn duplicate_implementation_message_includes_type_key() {
    let error = ProtocolError::DuplicateImplementation {
        protocol: "Sequence".into(),
        type_key: "String".into(),
        method: "first".into(),
    };
    assert_eq!(
        error.to_string(),
        "type String already implements 'first' for protocol 'Sequence'"
    );
}

#[rstest]
#[case::no_implementation(
    ProtocolError::NoImplementation {
        protocol: "Talker".into(),
        type_key: "Other(cat)".into(),
        method: "speak".into(),
    },
    "Other(cat)"
)]
#[case::unclassifiable(
    ProtocolError::UnclassifiableTarget {
        protocol: "Talker".into(),
        target: "argument 0 of 'speak'".into(),
        reason: "type 'Rock' declares no protocol identity".into(),
    },
    "Rock"
)]
#[case::invalid_signature(
    ProtocolError::InvalidSignature {
        protocol: "Talker".into(),
        method: "speak".into(),
        reason: "no dispatch argument".into(),
    },
    "no dispatch argument"
)]
fn error_message_includes_context(#[case] error: ProtocolError, #[case] expected: &str) {
    let message = error.to_string();
    assert!(
        message.contains(expected),
        "expected '{expected}' in message: {message}"
    );
}

#[test]
fn implementation_constructor_fills_fields() {
    let error = ProtocolError::implementation("slice", "start out of range");
    assert_eq!(
        error,
        ProtocolError::Implementation {
            method: "slice".into(),
            message: "start out of range".into(),
        }
    );
}

#[rstest]
#[case::undeclared(
    ProtocolError::UndeclaredMethod { protocol: "P".into(), method: "m".into() },
    Some("P")
)]
#[case::unknown(
    ProtocolError::UnknownMethod { protocol: "Q".into(), method: "m".into() },
    Some("Q")
)]
#[case::implementation(ProtocolError::implementation("m", "boom"), None)]
fn protocol_accessor_reports_origin(#[case] error: ProtocolError, #[case] expected: Option<&str>) {
    assert_eq!(error.protocol(), expected);
}

#[test]
fn errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProtocolError>();
}
