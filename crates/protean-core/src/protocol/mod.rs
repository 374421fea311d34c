//! Protocol registry and dispatcher.
//!
//! A [`Protocol`] owns a declared interface and a dispatch table mapping
//! type-keys to method implementations. [`Protocol::method`] hands out a
//! [`Method`] callable per declared name; calling it classifies the
//! designated argument, resolves an implementation, and invokes it with the
//! original arguments.
//!
//! Protocols are shared handles over single-threaded state. Clones see the
//! same table, and callables created before an [`attach`](Protocol::attach)
//! observe the new implementations.

mod implementation;
mod table;

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::DispatchConfig;
use crate::error::ProtocolError;
use crate::signature::{Interface, Signature};
use crate::type_key::{TypeDescriptor, TypeKey, classify};
use crate::types::{Identity, TypeDef};
use crate::value::{NativeFunction, Value};

pub use self::implementation::{Implementation, Implementations};
use self::table::DispatchTable;

/// Tracing target for protocol operations.
pub(crate) const PROTOCOL_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::protocol");

/// A declared method with its resolved dispatch position.
#[derive(Debug, Clone)]
struct Declaration {
    signature: Signature,
    dispatch_index: usize,
}

#[derive(Debug)]
struct ProtocolState {
    name: String,
    own_type: TypeDef,
    config: DispatchConfig,
    interface: Interface,
    declarations: HashMap<String, Declaration>,
    table: DispatchTable,
}

/// An open set of methods dispatched on the runtime type of one argument.
///
/// # Example
///
/// ```
/// use protean_core::{BuiltinType, Implementations, Interface, Protocol, Signature, Value};
///
/// # fn main() -> Result<(), protean_core::ProtocolError> {
/// let sequence = Protocol::define(
///     "Sequence",
///     Interface::new().method("first", Signature::dispatch_only()),
/// )?;
/// sequence.attach(
///     BuiltinType::String,
///     Implementations::new().with("first", |args| {
///         let text = args.first().and_then(Value::as_str).unwrap_or_default();
///         Ok(Value::from(text.chars().take(1).collect::<String>()))
///     }),
/// )?;
///
/// let first = sequence.method("first")?;
/// assert_eq!(first.call(&[Value::from("abcd")])?, Value::from("a"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Protocol {
    state: Rc<RefCell<ProtocolState>>,
}

impl Protocol {
    /// Defines a protocol with the default [`DispatchConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidSignature`] if a signature has no
    /// dispatch argument.
    pub fn define(name: &str, interface: Interface) -> Result<Self, ProtocolError> {
        Self::define_with_config(name, interface, DispatchConfig::default())
    }

    /// Defines a protocol with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidSignature`] if a signature has no
    /// dispatch argument.
    pub fn define_with_config(
        name: &str,
        interface: Interface,
        config: DispatchConfig,
    ) -> Result<Self, ProtocolError> {
        let declarations = declare(name, &interface)?;
        debug!(
            target: PROTOCOL_TARGET,
            protocol = name,
            methods = interface.len(),
            "defined protocol"
        );
        Ok(Self {
            state: Rc::new(RefCell::new(ProtocolState {
                name: name.to_owned(),
                own_type: TypeDef::with_private_identity(name),
                config,
                interface,
                declarations,
                table: DispatchTable::seeded(),
            })),
        })
    }

    /// Adds method declarations. Existing implementations are untouched.
    ///
    /// A name that is already declared takes the new signature.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidSignature`] if a new signature has no
    /// dispatch argument; nothing is declared in that case.
    pub fn reopen(&self, interface: Interface) -> Result<&Self, ProtocolError> {
        let mut state = self.state.borrow_mut();
        let added = declare(&state.name, &interface)?;
        for (method, signature) in interface.iter() {
            state.interface.insert(method, signature.clone());
        }
        state.declarations.extend(added);
        debug!(
            target: PROTOCOL_TARGET,
            protocol = state.name.as_str(),
            added = interface.len(),
            methods = state.interface.len(),
            "reopened protocol"
        );
        Ok(self)
    }

    /// Attaches implementations for a type.
    ///
    /// The target may be a built-in type, a [`TypeDef`], or a protocol (its
    /// own conceptual type). Either every implementation is installed or none
    /// is.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::UnclassifiableTarget`] if the type resolves to no
    ///   protocol identity.
    /// - [`ProtocolError::UndeclaredMethod`] if a name is not declared.
    /// - [`ProtocolError::DuplicateImplementation`] if the type already
    ///   implements a name, or the same name is given twice.
    pub fn attach(
        &self,
        target: impl Into<TypeDescriptor>,
        implementations: Implementations,
    ) -> Result<&Self, ProtocolError> {
        let descriptor = target.into();
        let key = descriptor.type_key();
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;

        if matches!(key, TypeKey::Other(None)) {
            return Err(ProtocolError::UnclassifiableTarget {
                protocol: state.name.clone(),
                target: format!("type '{}'", descriptor.name()),
                reason: String::from("the type declares no protocol identity"),
            });
        }

        validate_attach(state, &key, &implementations)?;

        let count = implementations.len();
        if let Some(bucket) = state.table.bucket_mut(&key) {
            bucket.extend(implementations.into_entries());
        }
        debug!(
            target: PROTOCOL_TARGET,
            protocol = state.name.as_str(),
            type_key = %key,
            implementations = count,
            "attached implementations"
        );
        Ok(self)
    }

    /// Returns the dispatching callable for a declared method.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownMethod`] if `name` is not declared.
    pub fn method(&self, name: &str) -> Result<Method, ProtocolError> {
        let state = self.state.borrow();
        if state.declarations.contains_key(name) {
            Ok(Method {
                protocol: self.clone(),
                name: Rc::from(name),
            })
        } else {
            Err(ProtocolError::UnknownMethod {
                protocol: state.name.clone(),
                method: name.to_owned(),
            })
        }
    }

    /// Dispatches `method` over `args`.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::UnknownMethod`] if `method` is not declared.
    /// - [`ProtocolError::UnclassifiableTarget`] if the dispatch argument is
    ///   missing or its type has no protocol identity.
    /// - [`ProtocolError::NoImplementation`] if nothing implements the method
    ///   for the argument's type.
    /// - Any error returned by the implementation itself.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value, ProtocolError> {
        let implementation = self.resolve(method, args)?;
        implementation.call(args)
    }

    /// Resolves the implementation a call would use, releasing the state
    /// borrow before returning so the body may re-enter the protocol.
    fn resolve(&self, method: &str, args: &[Value]) -> Result<Implementation, ProtocolError> {
        let state = self.state.borrow();
        let declaration =
            state
                .declarations
                .get(method)
                .ok_or_else(|| ProtocolError::UnknownMethod {
                    protocol: state.name.clone(),
                    method: method.to_owned(),
                })?;
        let index = declaration.dispatch_index;
        let target = args
            .get(index)
            .ok_or_else(|| ProtocolError::UnclassifiableTarget {
                protocol: state.name.clone(),
                target: format!("argument {index} of '{method}'"),
                reason: format!("only {} argument(s) were passed", args.len()),
            })?;

        let key = classify(target);
        trace!(
            target: PROTOCOL_TARGET,
            protocol = state.name.as_str(),
            method,
            type_key = %key,
            "dispatching"
        );
        let found = match &key {
            TypeKey::Builtin(bucket) => state.table.builtin_method(*bucket, method),
            TypeKey::Other(None) => {
                return Err(ProtocolError::UnclassifiableTarget {
                    protocol: state.name.clone(),
                    target: format!("argument {index} of '{method}'"),
                    reason: format!("type '{}' declares no protocol identity", type_name(target)),
                });
            }
            TypeKey::Other(Some(nearest)) => {
                let chain = if state.config.ancestry_fallback() {
                    identity_chain(target, nearest)
                } else {
                    vec![nearest.clone()]
                };
                state
                    .table
                    .identity_method(&chain, method)
                    .map(|(identity, found)| {
                        trace!(
                            target: PROTOCOL_TARGET,
                            protocol = state.name.as_str(),
                            method,
                            identity = identity.as_str(),
                            "resolved through identity"
                        );
                        found
                    })
            }
        };

        found.cloned().ok_or_else(|| ProtocolError::NoImplementation {
            protocol: state.name.clone(),
            type_key: key.to_string(),
            method: method.to_owned(),
        })
    }

    /// Returns the protocol's name.
    #[must_use]
    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    /// Returns a snapshot of the declared interface.
    #[must_use]
    pub fn interface(&self) -> Interface {
        self.state.borrow().interface.clone()
    }

    /// Returns declared method names in declaration order.
    #[must_use]
    pub fn method_names(&self) -> Vec<String> {
        self.state
            .borrow()
            .interface
            .names()
            .map(str::to_owned)
            .collect()
    }

    /// Returns the signature declared for `method`.
    #[must_use]
    pub fn signature(&self, method: &str) -> Option<Signature> {
        self.state
            .borrow()
            .declarations
            .get(method)
            .map(|declaration| declaration.signature.clone())
    }

    /// Returns the dispatch argument position for `method`.
    #[must_use]
    pub fn dispatch_index(&self, method: &str) -> Option<usize> {
        self.state
            .borrow()
            .declarations
            .get(method)
            .map(|declaration| declaration.dispatch_index)
    }

    /// Returns `true` when the type's own bucket implements `method`.
    ///
    /// Ancestors are not consulted; see [`Protocol::resolves`].
    #[must_use]
    pub fn implements(&self, target: impl Into<TypeDescriptor>, method: &str) -> bool {
        let key = target.into().type_key();
        self.state.borrow().table.contains(&key, method)
    }

    /// Returns `true` when calling `method` with `value` in the dispatch
    /// position would find an implementation.
    #[must_use]
    pub fn resolves(&self, value: &Value, method: &str) -> bool {
        let Some(index) = self.dispatch_index(method) else {
            return false;
        };
        let mut args = vec![Value::Undefined; index];
        args.push(value.clone());
        self.resolve(method, &args).is_ok()
    }

    /// Returns the identities that have implementations, sorted.
    #[must_use]
    pub fn identities(&self) -> Vec<Identity> {
        self.state.borrow().table.identities()
    }

    /// Returns the protocol's own conceptual type.
    ///
    /// It is named after the protocol and carries a private identity, so it
    /// never shares a dispatch group with user types or other protocols of
    /// the same name. Passing the protocol to [`attach`](Self::attach)
    /// targets this type.
    #[must_use]
    pub fn as_type(&self) -> TypeDef {
        self.state.borrow().own_type.clone()
    }

    /// Returns `true` when both handles refer to the same protocol.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Protocol")
            .field("name", &state.name)
            .field("methods", &state.interface.names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl From<&Protocol> for TypeDescriptor {
    fn from(protocol: &Protocol) -> Self {
        Self::User(protocol.as_type())
    }
}

/// The dispatching callable generated for one declared method.
///
/// # Example
///
/// ```
/// use protean_core::{BuiltinType, Implementations, Interface, Param, Protocol, Value};
///
/// # fn main() -> Result<(), protean_core::ProtocolError> {
/// let sequence = Protocol::define(
///     "Sequence",
///     Interface::new().method("repeat", vec![Param::arg(BuiltinType::Number), Param::dispatch()]),
/// )?;
/// let repeat = sequence.method("repeat")?;
///
/// sequence.attach(
///     BuiltinType::String,
///     Implementations::new().with("repeat", |args| {
///         let times = args.first().and_then(Value::as_number).unwrap_or_default();
///         let text = args.get(1).and_then(Value::as_str).unwrap_or_default();
///         Ok(Value::from(text.repeat(usize::try_from(times as i64).unwrap_or(0))))
///     }),
/// )?;
///
/// assert_eq!(repeat.call(&[Value::from(3), Value::from("ab")])?, Value::from("ababab"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Method {
    protocol: Protocol,
    name: Rc<str>,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the protocol the method belongs to.
    #[must_use]
    pub const fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Dispatches over `args`.
    ///
    /// # Errors
    ///
    /// See [`Protocol::call`].
    pub fn call(&self, args: &[Value]) -> Result<Value, ProtocolError> {
        self.protocol.call(&self.name, args)
    }

    /// Wraps the callable as a function value.
    #[must_use]
    pub fn to_function(&self) -> NativeFunction {
        let method = self.clone();
        NativeFunction::new(&self.name, move |args| method.call(args))
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("protocol", &self.protocol.name())
            .field("name", &self.name)
            .finish()
    }
}

/// Defines a protocol. See [`Protocol::define`].
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidSignature`] if a signature has no dispatch
/// argument.
pub fn define(name: &str, interface: Interface) -> Result<Protocol, ProtocolError> {
    Protocol::define(name, interface)
}

/// Adds declarations to a protocol. See [`Protocol::reopen`].
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidSignature`] if a signature has no dispatch
/// argument.
pub fn reopen(protocol: &Protocol, interface: Interface) -> Result<&Protocol, ProtocolError> {
    protocol.reopen(interface)
}

/// Attaches implementations for a type. See [`Protocol::attach`].
///
/// # Errors
///
/// See [`Protocol::attach`].
pub fn attach(
    protocol: &Protocol,
    target: impl Into<TypeDescriptor>,
    implementations: Implementations,
) -> Result<&Protocol, ProtocolError> {
    protocol.attach(target, implementations)
}

fn declare(
    protocol: &str,
    interface: &Interface,
) -> Result<HashMap<String, Declaration>, ProtocolError> {
    interface
        .iter()
        .map(|(method, signature)| {
            let dispatch_index =
                signature
                    .dispatch_index()
                    .ok_or_else(|| ProtocolError::InvalidSignature {
                        protocol: protocol.to_owned(),
                        method: method.to_owned(),
                        reason: String::from("the signature declares no dispatch argument"),
                    })?;
            Ok((
                method.to_owned(),
                Declaration {
                    signature: signature.clone(),
                    dispatch_index,
                },
            ))
        })
        .collect()
}

/// Checks every entry before anything is installed.
fn validate_attach(
    state: &ProtocolState,
    key: &TypeKey,
    implementations: &Implementations,
) -> Result<(), ProtocolError> {
    let mut seen = HashSet::new();
    for method in implementations.names() {
        if !state.declarations.contains_key(method) {
            return Err(ProtocolError::UndeclaredMethod {
                protocol: state.name.clone(),
                method: method.to_owned(),
            });
        }
        if !seen.insert(method) || state.table.contains(key, method) {
            return Err(ProtocolError::DuplicateImplementation {
                protocol: state.name.clone(),
                type_key: key.to_string(),
                method: method.to_owned(),
            });
        }
    }
    Ok(())
}

fn identity_chain(target: &Value, nearest: &Identity) -> Vec<Identity> {
    target.as_object().map_or_else(
        || vec![nearest.clone()],
        |object| object.type_def().identity_chain(),
    )
}

fn type_name(target: &Value) -> &str {
    target
        .as_object()
        .map_or("unknown", |object| object.type_def().name())
}
