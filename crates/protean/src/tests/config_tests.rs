//! Tests for telemetry configuration parsing and defaults.

use std::str::FromStr;

use rstest::rstest;

use crate::{DEFAULT_LOG_FILTER, LogFormat, TelemetryConfig};

#[test]
fn defaults_use_info_filter_and_json_output() {
    let config = TelemetryConfig::default();
    assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
    assert_eq!(config.log_format(), LogFormat::Json);
}

#[rstest]
#[case("json", LogFormat::Json)]
#[case("JSON", LogFormat::Json)]
#[case("compact", LogFormat::Compact)]
#[case("Compact", LogFormat::Compact)]
fn log_format_parses_case_insensitively(#[case] input: &str, #[case] expected: LogFormat) {
    assert_eq!(LogFormat::from_str(input).expect("parse"), expected);
}

#[test]
fn log_format_rejects_unknown_names() {
    assert!(LogFormat::from_str("pretty").is_err());
}

#[rstest]
#[case(LogFormat::Json, "json")]
#[case(LogFormat::Compact, "compact")]
fn log_format_displays_snake_case(#[case] format: LogFormat, #[case] expected: &str) {
    assert_eq!(format.to_string(), expected);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config: TelemetryConfig = serde_json::from_str("{}").expect("deserialise");
    assert_eq!(config, TelemetryConfig::default());
}

#[test]
fn explicit_fields_are_deserialised() {
    let config: TelemetryConfig =
        serde_json::from_str(r#"{"log_filter": "protean_core=trace", "log_format": "compact"}"#)
            .expect("deserialise");
    assert_eq!(
        config,
        TelemetryConfig::new("protean_core=trace", LogFormat::Compact)
    );
}

#[test]
fn unknown_format_fails_deserialisation() {
    let result = serde_json::from_str::<TelemetryConfig>(r#"{"log_format": "xml"}"#);
    assert!(result.is_err());
}
