//! Core value model, classification, and dispatch for Protean protocols.
//!
//! A protocol is an open, named set of methods whose implementation is
//! chosen at call time from the runtime type of one designated argument.
//! Protocols can be reopened to declare more methods, and implementations
//! can be attached to any type after the fact, including built-in shapes the
//! protocol author does not own.
//!
//! The crate is re-exported by the `protean` facade crate for stable public
//! consumption.
//!
//! # Core types
//!
//! - [`Value`]: the closed set of runtime values dispatch understands
//! - [`TypeDef`] and [`Object`]: user-defined types with a protocol
//!   [`Identity`] and an explicit parent link
//! - [`BuiltinType`], [`TypeKey`], and [`classify`]: dispatch keys
//! - [`Param`], [`Signature`], and [`Interface`]: method declarations
//! - [`Protocol`] and [`Method`]: the registry and its dispatching callables
//! - [`ProtocolError`]: every failure the core reports
//! - [`DispatchConfig`]: resolution behaviour
//!
//! # Example
//!
//! ```
//! use protean_core::{attach, define, Implementations, Interface, Signature, TypeDef, Value};
//!
//! # fn main() -> Result<(), protean_core::ProtocolError> {
//! let talker = define("Talker", Interface::new().method("speak", Signature::dispatch_only()))?;
//! let dog = TypeDef::with_identity("Dog", "dog");
//! attach(&talker, &dog, Implementations::new().with("speak", |_| Ok(Value::from("woof"))))?;
//!
//! let speak = talker.method("speak")?;
//! assert_eq!(speak.call(&[Value::from(dog.instance())])?, Value::from("woof"));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod protocol;
mod signature;
mod type_key;
mod types;
mod value;

pub use config::DispatchConfig;
pub use error::ProtocolError;
pub use protocol::{
    Implementation, Implementations, Method, Protocol, attach, define, reopen,
};
pub use signature::{Interface, Param, Signature};
pub use type_key::{BuiltinType, TypeDescriptor, TypeKey, classify};
pub use types::{Ancestors, Identity, Object, PLAIN_OBJECT_TYPE, TypeDef, TypeDefBuilder};
pub use value::{NativeFunction, RegExp, Value};

#[cfg(test)]
mod tests;
