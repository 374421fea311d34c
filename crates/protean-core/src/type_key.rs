//! Classification of runtime values into dispatch keys.
//!
//! Classification is structural for built-in shapes: a [`Value`] variant
//! determines its bucket without any declaration. Objects fall into the
//! `Other` bucket, keyed by the protocol identity their type resolves to.

use std::fmt;

use strum::{Display, EnumString};
use time::OffsetDateTime;

use crate::types::{Identity, Object, TypeDef};
use crate::value::{NativeFunction, RegExp, Value};

/// The fixed set of built-in dispatch buckets.
///
/// # Example
///
/// ```
/// use std::str::FromStr;
/// use protean_core::BuiltinType;
///
/// assert_eq!(BuiltinType::RegExp.to_string(), "RegExp");
/// assert_eq!(BuiltinType::from_str("Number"), Ok(BuiltinType::Number));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
pub enum BuiltinType {
    /// Argument lists.
    Arguments,
    /// Arrays and sequences.
    Array,
    /// Booleans.
    Boolean,
    /// Dates.
    Date,
    /// Functions.
    Function,
    /// Null.
    Null,
    /// Numbers.
    Number,
    /// Catch-all for objects, subdivided by protocol identity.
    Other,
    /// Regular expressions.
    RegExp,
    /// Strings.
    String,
    /// Undefined.
    Undefined,
}

impl BuiltinType {
    /// Every bucket, in name order.
    pub const ALL: [Self; 11] = [
        Self::Arguments,
        Self::Array,
        Self::Boolean,
        Self::Date,
        Self::Function,
        Self::Null,
        Self::Number,
        Self::Other,
        Self::RegExp,
        Self::String,
        Self::Undefined,
    ];

    /// Returns a default value of this shape.
    ///
    /// Attach-time classification inspects this value rather than any real
    /// instance. `Other` yields a plain object, which has no identity.
    #[must_use]
    pub fn instance_shape(self) -> Value {
        match self {
            Self::Arguments => Value::Arguments(Vec::new()),
            Self::Array => Value::Array(Vec::new()),
            Self::Boolean => Value::Boolean(false),
            Self::Date => Value::Date(OffsetDateTime::UNIX_EPOCH),
            Self::Function => Value::Function(NativeFunction::new("anonymous", |_| {
                Ok(Value::Undefined)
            })),
            Self::Null => Value::Null,
            Self::Number => Value::Number(0.0),
            Self::Other => Value::Object(Object::plain()),
            Self::RegExp => Value::RegExp(RegExp::new("(?:)", "")),
            Self::String => Value::String(String::new()),
            Self::Undefined => Value::Undefined,
        }
    }
}

/// The dispatch key of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    /// One of the built-in buckets. Never [`BuiltinType::Other`].
    Builtin(BuiltinType),
    /// An object, with the identity its type resolves to, if any.
    Other(Option<Identity>),
}

impl TypeKey {
    /// Returns the bucket this key belongs to.
    #[must_use]
    pub const fn bucket(&self) -> BuiltinType {
        match self {
            Self::Builtin(bucket) => *bucket,
            Self::Other(_) => BuiltinType::Other,
        }
    }

    /// Returns the identity for `Other` keys.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Builtin(_) => None,
            Self::Other(identity) => identity.as_ref(),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(bucket) => write!(f, "{bucket}"),
            Self::Other(Some(identity)) => write!(f, "Other({identity})"),
            Self::Other(None) => f.write_str("Other"),
        }
    }
}

/// Classifies a value into its dispatch key.
///
/// # Example
///
/// ```
/// use protean_core::{classify, BuiltinType, TypeDef, TypeKey, Value};
///
/// assert_eq!(classify(&Value::from("a")), TypeKey::Builtin(BuiltinType::String));
///
/// let dog = TypeDef::with_identity("Dog", "dog");
/// let key = classify(&Value::from(dog.instance()));
/// assert_eq!(key.to_string(), "Other(dog)");
/// ```
#[must_use]
pub fn classify(value: &Value) -> TypeKey {
    match value {
        Value::Arguments(_) => TypeKey::Builtin(BuiltinType::Arguments),
        Value::Array(_) => TypeKey::Builtin(BuiltinType::Array),
        Value::Boolean(_) => TypeKey::Builtin(BuiltinType::Boolean),
        Value::Date(_) => TypeKey::Builtin(BuiltinType::Date),
        Value::Function(_) => TypeKey::Builtin(BuiltinType::Function),
        Value::Null => TypeKey::Builtin(BuiltinType::Null),
        Value::Number(_) => TypeKey::Builtin(BuiltinType::Number),
        Value::RegExp(_) => TypeKey::Builtin(BuiltinType::RegExp),
        Value::String(_) => TypeKey::Builtin(BuiltinType::String),
        Value::Undefined => TypeKey::Builtin(BuiltinType::Undefined),
        Value::Object(object) => TypeKey::Other(object.type_def().resolved_identity()),
    }
}

/// A type named when attaching implementations or describing arguments.
///
/// Protocols convert into descriptors of their own conceptual type, see
/// [`Protocol::as_type`](crate::Protocol::as_type).
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// A built-in shape.
    Builtin(BuiltinType),
    /// A user-defined type.
    User(TypeDef),
}

impl TypeDescriptor {
    /// Returns the zero-argument instance shape of the described type.
    #[must_use]
    pub fn instance_shape(&self) -> Value {
        match self {
            Self::Builtin(bucket) => bucket.instance_shape(),
            Self::User(type_def) => Value::Object(type_def.instance()),
        }
    }

    /// Classifies the described type as if it were an instance.
    #[must_use]
    pub fn type_key(&self) -> TypeKey {
        classify(&self.instance_shape())
    }

    /// Returns a display name for diagnostics.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Builtin(bucket) => bucket.to_string(),
            Self::User(type_def) => type_def.name().to_owned(),
        }
    }
}

impl From<BuiltinType> for TypeDescriptor {
    fn from(bucket: BuiltinType) -> Self {
        Self::Builtin(bucket)
    }
}

impl From<TypeDef> for TypeDescriptor {
    fn from(type_def: TypeDef) -> Self {
        Self::User(type_def)
    }
}

impl From<&TypeDef> for TypeDescriptor {
    fn from(type_def: &TypeDef) -> Self {
        Self::User(type_def.clone())
    }
}
