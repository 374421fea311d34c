//! Tests for telemetry initialisation.

use rstest::rstest;

use crate::telemetry::{self, TelemetryError};
use crate::{LogFormat, TelemetryConfig};

#[rstest]
#[case("info")]
#[case("protean_core=trace,warn")]
fn valid_filters_parse(#[case] filter: &str) {
    let config = TelemetryConfig::new(filter, LogFormat::Compact);
    assert!(telemetry::build_filter(&config).is_ok());
}

#[test]
fn invalid_filter_is_reported() {
    let config = TelemetryConfig::new("protean_core=loudest", LogFormat::Json);
    let error = telemetry::build_filter(&config).expect_err("filter should be rejected");
    assert!(matches!(error, TelemetryError::Filter(_)));
    assert!(error.to_string().starts_with("invalid log filter: "));
}

#[test]
fn initialise_is_idempotent() {
    let config = TelemetryConfig::default();
    let first = telemetry::initialise(&config);
    let second = telemetry::initialise(&config);
    assert!(first.is_ok());
    assert!(second.is_ok());
}

#[rstest]
#[case(LogFormat::Json)]
#[case(LogFormat::Compact)]
fn subscribers_build_for_every_format(#[case] format: LogFormat) {
    let config = TelemetryConfig::new("protean_core=debug", format);
    let subscriber = telemetry::build_subscriber(&config).expect("subscriber builds");
    tracing::subscriber::with_default(subscriber, || {
        assert!(tracing::enabled!(target: "protean_core::protocol", tracing::Level::DEBUG));
        assert!(!tracing::enabled!(target: "protean_core::protocol", tracing::Level::TRACE));
    });
}

#[test]
fn building_a_subscriber_reports_bad_filters() {
    let config = TelemetryConfig::new("protean_core=loudest", LogFormat::Compact);
    let result = telemetry::build_subscriber(&config);
    assert!(matches!(result, Err(TelemetryError::Filter(_))));
}
