//! Dynamic runtime values passed through protocol dispatch.
//!
//! [`Value`] is the closed set of shapes an embedding program can hand to a
//! protocol method. Each variant maps onto exactly one built-in dispatch
//! bucket, except [`Value::Object`], which is grouped under the `Other`
//! bucket by the protocol identity of its type.

use std::fmt;
use std::rc::Rc;

use time::OffsetDateTime;

use crate::error::ProtocolError;
use crate::types::Object;

type NativeBody = dyn Fn(&[Value]) -> Result<Value, ProtocolError>;

/// A named callable carried as a first-class value.
///
/// Functions compare by identity: two clones of the same function are equal,
/// two separately created functions never are.
///
/// # Example
///
/// ```
/// use protean_core::{NativeFunction, Value};
///
/// let len = NativeFunction::new("len", |args| {
///     Ok(Value::from(i32::try_from(args.len()).unwrap_or(i32::MAX)))
/// });
/// let result = len.call(&[Value::Null, Value::Null]).expect("call succeeds");
/// assert_eq!(result, Value::from(2));
/// ```
#[derive(Clone)]
pub struct NativeFunction {
    name: Rc<str>,
    body: Rc<NativeBody>,
}

impl NativeFunction {
    /// Wraps a closure as a named function value.
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ProtocolError> + 'static,
    {
        Self {
            name: Rc::from(name),
            body: Rc::new(body),
        }
    }

    /// Returns the function's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped closure produces.
    pub fn call(&self, args: &[Value]) -> Result<Value, ProtocolError> {
        (self.body)(args)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeFunction").field(&self.name).finish()
    }
}

/// A regular expression literal, kept as source text.
///
/// Dispatch only needs the value's shape, so the pattern is never compiled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegExp {
    source: String,
    flags: String,
}

impl RegExp {
    /// Creates a regular expression literal from its source and flags.
    #[must_use]
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the flag characters.
    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// A runtime value.
///
/// # Example
///
/// ```
/// use protean_core::Value;
///
/// let list = Value::array([1, 2, 3]);
/// assert_eq!(list.as_array().map(<[Value]>::len), Some(3));
/// assert_eq!(Value::from("abc").as_str(), Some("abc"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The argument list of a call, passed on as a value.
    Arguments(Vec<Value>),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A boolean.
    Boolean(bool),
    /// A point in time.
    Date(OffsetDateTime),
    /// A callable value.
    Function(NativeFunction),
    /// The explicit absence of a value.
    Null,
    /// A double-precision number.
    Number(f64),
    /// A regular expression literal.
    RegExp(RegExp),
    /// A text string.
    String(String),
    /// A value that was never assigned.
    Undefined,
    /// An instance of a user-defined type.
    Object(Object),
}

impl Value {
    /// Builds an array from anything convertible into values.
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Builds an argument list from anything convertible into values.
    pub fn arguments<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Arguments(items.into_iter().map(Into::into).collect())
    }

    /// Returns the string payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the numeric payload.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the boolean payload.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the elements of an array or argument list.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) | Self::Arguments(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the object payload.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the function payload.
    #[must_use]
    pub const fn as_function(&self) -> Option<&NativeFunction> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`] and [`Value::Undefined`].
    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arguments(items) | Self::Array(items) => {
                f.write_str("[")?;
                for (position, item) in items.iter().enumerate() {
                    if position > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Boolean(flag) => write!(f, "{flag}"),
            Self::Date(moment) => write!(f, "{moment}"),
            Self::Function(function) => write!(f, "function {}", function.name()),
            Self::Null => f.write_str("null"),
            Self::Number(number) => write!(f, "{number}"),
            Self::RegExp(pattern) => write!(f, "{pattern}"),
            Self::String(text) => f.write_str(text),
            Self::Undefined => f.write_str("undefined"),
            Self::Object(object) => write!(f, "[object {}]", object.type_def().name()),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Boolean(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(moment: OffsetDateTime) -> Self {
        Self::Date(moment)
    }
}

impl From<RegExp> for Value {
    fn from(pattern: RegExp) -> Self {
        Self::RegExp(pattern)
    }
}

impl From<NativeFunction> for Value {
    fn from(function: NativeFunction) -> Self {
        Self::Function(function)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}
