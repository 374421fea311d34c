//! Method bodies and the sets of them handed to [`Protocol::attach`].
//!
//! [`Protocol::attach`]: crate::Protocol::attach

use std::fmt;
use std::rc::Rc;

use crate::error::ProtocolError;
use crate::value::Value;

type Body = dyn Fn(&[Value]) -> Result<Value, ProtocolError>;

/// A method body: receives the full original argument list.
#[derive(Clone)]
pub struct Implementation {
    body: Rc<Body>,
}

impl Implementation {
    /// Wraps a closure as an implementation.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ProtocolError> + 'static,
    {
        Self {
            body: Rc::new(body),
        }
    }

    /// Invokes the body.
    ///
    /// # Errors
    ///
    /// Returns whatever error the body produces.
    pub fn call(&self, args: &[Value]) -> Result<Value, ProtocolError> {
        (self.body)(args)
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Implementation")
    }
}

/// Method name to implementation pairs for one attach call, in insertion
/// order.
///
/// Repeated names are kept as given; [`Protocol::attach`] rejects them.
///
/// # Example
///
/// ```
/// use protean_core::{Implementations, Value};
///
/// let impls = Implementations::new()
///     .with("first", |args| Ok(args.first().cloned().unwrap_or(Value::Undefined)))
///     .with("rest", |_| Ok(Value::array(Vec::<Value>::new())));
/// assert_eq!(impls.names().collect::<Vec<_>>(), ["first", "rest"]);
/// ```
///
/// [`Protocol::attach`]: crate::Protocol::attach
#[derive(Debug, Clone, Default)]
pub struct Implementations {
    entries: Vec<(String, Implementation)>,
}

impl Implementations {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a closure under `method`, builder style.
    #[must_use]
    pub fn with<F>(mut self, method: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ProtocolError> + 'static,
    {
        self.push(method, Implementation::new(body));
        self
    }

    /// Adds an existing implementation under `method`.
    pub fn push(&mut self, method: &str, implementation: Implementation) {
        self.entries.push((method.to_owned(), implementation));
    }

    /// Iterates over method names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(String, Implementation)> {
        self.entries
    }
}
