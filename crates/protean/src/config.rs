//! Telemetry configuration supplied by the embedding program.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Settings for [`telemetry::initialise`](crate::telemetry::initialise).
///
/// # Example
///
/// ```
/// use protean::{LogFormat, TelemetryConfig};
///
/// let config = TelemetryConfig::default();
/// assert_eq!(config.log_filter(), "info");
/// assert_eq!(config.log_format(), LogFormat::Json);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// `tracing-subscriber` filter directive, e.g. `protean_core=trace`.
    #[serde(default = "default_log_filter")]
    log_filter: String,
    /// Output format.
    #[serde(default)]
    log_format: LogFormat,
}

impl TelemetryConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub fn new(log_filter: &str, log_format: LogFormat) -> Self {
        Self {
            log_filter: log_filter.to_owned(),
            log_format,
        }
    }

    /// Returns the filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
        }
    }
}
