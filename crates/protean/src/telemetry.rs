//! Structured telemetry initialisation for embedding programs.
//!
//! The core emits `tracing` events when protocols are defined, reopened,
//! and extended, and for every dispatch resolution. Nothing is printed
//! unless a subscriber is installed; [`initialise`] installs one.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::UtcTime;

use crate::config::{LogFormat, TelemetryConfig};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Repeated calls are idempotent: only the first installs the subscriber,
/// later calls return a fresh [`TelemetryHandle`] without touching global
/// state.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] if the filter directive does not
/// parse, or [`TelemetryError::Subscriber`] if another subscriber was
/// already installed outside this function.
///
/// # Examples
///
/// ```rust
/// use protean::TelemetryConfig;
/// use protean::telemetry;
///
/// # fn main() -> Result<(), protean::telemetry::TelemetryError> {
/// let config = TelemetryConfig::default();
/// let first = telemetry::initialise(&config)?;
/// let second = telemetry::initialise(&config)?;
/// drop(first);
/// drop(second);
/// # Ok(())
/// # }
/// ```
pub fn initialise(config: &TelemetryConfig) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|()| TelemetryHandle)
}

/// Parses the configured filter directive.
pub(crate) fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))
}

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Builds the subscriber described by `config` without installing it.
pub(crate) fn build_subscriber(
    config: &TelemetryConfig,
) -> Result<BoxedSubscriber, TelemetryError> {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(build_filter(config)?)
        // Protocol events are told apart by target, e.g. `protean_core::protocol`.
        .with_target(true)
        .with_level(true)
        // Protocol state is single-threaded, so thread metadata is noise.
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(io::stderr)
        // Colour only when a person is watching stderr.
        .with_ansi(io::stderr().is_terminal())
        .with_timer(UtcTime::rfc_3339());

    let subscriber: BoxedSubscriber = match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    };
    Ok(subscriber)
}

fn install_subscriber(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let subscriber = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}
