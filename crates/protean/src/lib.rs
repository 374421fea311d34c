//! Protean: open runtime dispatch protocols.
//!
//! This facade crate re-exports the stable types from [`protean_core`] and
//! adds opt-in [`telemetry`] setup for embedding programs that want the
//! core's `tracing` events rendered.
//!
//! # Stability
//!
//! `protean` is the semver-stable entrypoint. `protean_core` may evolve, but
//! this facade preserves type names and method behaviour.
//!
//! # Example
//!
//! ```
//! use protean::{BuiltinType, Implementations, Interface, Param, Protocol, Signature, Value};
//!
//! # fn main() -> Result<(), protean::ProtocolError> {
//! let sequence = Protocol::define(
//!     "Sequence",
//!     Interface::new()
//!         .method("first", Signature::dispatch_only())
//!         .method("repeat", vec![Param::arg(BuiltinType::Number), Param::dispatch()]),
//! )?;
//! sequence.attach(
//!     BuiltinType::Array,
//!     Implementations::new().with("first", |args| {
//!         Ok(args
//!             .first()
//!             .and_then(Value::as_array)
//!             .and_then(<[Value]>::first)
//!             .cloned()
//!             .unwrap_or(Value::Undefined))
//!     }),
//! )?;
//!
//! assert_eq!(sequence.call("first", &[Value::array([1, 2, 3])])?, Value::from(1));
//! # Ok(())
//! # }
//! ```

mod config;
pub mod telemetry;

pub use protean_core::{
    Ancestors, BuiltinType, DispatchConfig, Identity, Implementation, Implementations, Interface,
    Method, NativeFunction, Object, PLAIN_OBJECT_TYPE, Param, Protocol, ProtocolError, RegExp,
    Signature, TypeDef, TypeDefBuilder, TypeDescriptor, TypeKey, Value, attach, classify, define,
    reopen,
};

pub use config::{DEFAULT_LOG_FILTER, LogFormat, LogFormatParseError, TelemetryConfig};

#[cfg(test)]
mod tests;
