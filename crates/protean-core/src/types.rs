//! User-defined type definitions and their instances.
//!
//! A [`TypeDef`] is the explicit stand-in for a constructor: it has a display
//! name, an optional protocol [`Identity`], and an optional parent link. The
//! parent links form the ancestry graph that dispatch walks when a type has
//! no implementation of its own. Identity belongs to the type, never to an
//! instance, and a type without one inherits the identity of its nearest
//! ancestor that declares one.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::value::Value;

/// Name of the plain object type returned by [`TypeDef::object`].
pub const PLAIN_OBJECT_TYPE: &str = "Object";

/// A protocol identity: the short string tag that groups a user-defined type
/// under dispatch.
///
/// Identities created with [`Identity::new`] are shared: every type declaring
/// the same tag lands in the same dispatch group. [`Identity::private`] mints
/// an identity that equals only its own clones, whatever its tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity {
    tag: Rc<str>,
    scope: Option<u64>,
}

static NEXT_PRIVATE_SCOPE: AtomicU64 = AtomicU64::new(1);

impl Identity {
    /// Creates a shared identity from its tag.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: Rc::from(tag),
            scope: None,
        }
    }

    /// Creates an identity that never equals one created elsewhere, even
    /// with the same tag.
    ///
    /// ```
    /// use protean_core::Identity;
    ///
    /// let private = Identity::private("user");
    /// assert_ne!(private, Identity::new("user"));
    /// assert_ne!(private, Identity::private("user"));
    /// assert_eq!(private, private.clone());
    /// ```
    #[must_use]
    pub fn private(tag: &str) -> Self {
        Self {
            tag: Rc::from(tag),
            scope: Some(NEXT_PRIVATE_SCOPE.fetch_add(1, Ordering::Relaxed)),
        }
    }

    /// Returns the identity tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// Returns `true` for identities minted by [`Identity::private`].
    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.scope.is_some()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            Some(scope) => write!(f, "{}#{scope}", self.tag),
            None => f.write_str(&self.tag),
        }
    }
}

impl From<&str> for Identity {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

struct TypeDefInner {
    name: String,
    identity: Option<Identity>,
    parent: Option<TypeDef>,
}

/// A user-defined type definition.
///
/// Cloning is cheap and clones refer to the same definition. Equality is
/// definition identity, not structural.
///
/// # Example
///
/// ```
/// use protean_core::TypeDef;
///
/// let user = TypeDef::with_identity("User", "user");
/// let guest = TypeDef::builder("Guest").parent(&user).build();
/// let admin = TypeDef::builder("Admin").parent(&user).identity("admin").build();
///
/// assert_eq!(guest.resolved_identity().map(|id| id.to_string()), Some("user".into()));
/// let chain: Vec<String> = admin.identity_chain().iter().map(ToString::to_string).collect();
/// assert_eq!(chain, ["admin", "user"]);
/// ```
#[derive(Clone)]
pub struct TypeDef {
    inner: Rc<TypeDefInner>,
}

impl TypeDef {
    /// Starts building a type definition with the given display name.
    #[must_use]
    pub fn builder(name: &str) -> TypeDefBuilder {
        TypeDefBuilder {
            name: name.to_owned(),
            identity: None,
            parent: None,
        }
    }

    /// Creates a root type that declares an identity.
    #[must_use]
    pub fn with_identity(name: &str, identity: &str) -> Self {
        Self::builder(name).identity(identity).build()
    }

    /// Creates a root type whose identity is private to it.
    ///
    /// No other type, whatever its tag, shares its dispatch group unless it
    /// inherits the identity as a descendant.
    #[must_use]
    pub fn with_private_identity(name: &str) -> Self {
        Self {
            inner: Rc::new(TypeDefInner {
                name: name.to_owned(),
                identity: Some(Identity::private(name)),
                parent: None,
            }),
        }
    }

    /// Creates the plain object type: no identity and no parent.
    #[must_use]
    pub fn object() -> Self {
        Self::builder(PLAIN_OBJECT_TYPE).build()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the identity this type declares itself, ignoring ancestors.
    #[must_use]
    pub fn own_identity(&self) -> Option<&Identity> {
        self.inner.identity.as_ref()
    }

    /// Returns the parent type, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.inner.parent.as_ref()
    }

    /// Iterates over this type followed by its ancestors, nearest first.
    #[must_use]
    pub const fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Returns the identity dispatch groups this type under: its own, or the
    /// nearest ancestor's.
    #[must_use]
    pub fn resolved_identity(&self) -> Option<Identity> {
        self.ancestors()
            .find_map(|ancestor| ancestor.own_identity().cloned())
    }

    /// Returns every identity declared along the ancestry, nearest first and
    /// without repeats.
    #[must_use]
    pub fn identity_chain(&self) -> Vec<Identity> {
        let mut chain: Vec<Identity> = Vec::new();
        for identity in self.ancestors().filter_map(Self::own_identity) {
            if !chain.contains(identity) {
                chain.push(identity.clone());
            }
        }
        chain
    }

    /// Returns `true` when `other` is this type or one of its ancestors.
    #[must_use]
    pub fn is_subtype_of(&self, other: &Self) -> bool {
        self.ancestors().any(|ancestor| ancestor == other)
    }

    /// Creates an instance with no fields.
    ///
    /// This is the zero-argument instance shape used when classifying the
    /// type itself; no user code runs.
    #[must_use]
    pub fn instance(&self) -> Object {
        Object::new(self.clone())
    }
}

impl PartialEq for TypeDef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for TypeDef {}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef")
            .field("name", &self.inner.name)
            .field("identity", &self.inner.identity)
            .field("parent", &self.parent().map(Self::name))
            .finish()
    }
}

/// Builder for [`TypeDef`].
#[derive(Debug)]
pub struct TypeDefBuilder {
    name: String,
    identity: Option<Identity>,
    parent: Option<TypeDef>,
}

impl TypeDefBuilder {
    /// Declares the type's own protocol identity, overriding any inherited
    /// one.
    #[must_use]
    pub fn identity(mut self, identity: &str) -> Self {
        self.identity = Some(Identity::new(identity));
        self
    }

    /// Links the type to its parent.
    #[must_use]
    pub fn parent(mut self, parent: &TypeDef) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Finishes the definition.
    #[must_use]
    pub fn build(self) -> TypeDef {
        TypeDef {
            inner: Rc::new(TypeDefInner {
                name: self.name,
                identity: self.identity,
                parent: self.parent,
            }),
        }
    }
}

/// Iterator over a type and its ancestors, returned by
/// [`TypeDef::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    next: Option<&'a TypeDef>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeDef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// An instance of a user-defined type.
///
/// # Example
///
/// ```
/// use protean_core::{TypeDef, Value};
///
/// let point = TypeDef::with_identity("Point", "point");
/// let origin = point.instance().with_field("x", 0).with_field("y", 0);
/// assert_eq!(origin.field("x"), Some(&Value::from(0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    type_def: TypeDef,
    fields: BTreeMap<String, Value>,
}

impl Object {
    /// Creates an instance of `type_def` with no fields.
    #[must_use]
    pub const fn new(type_def: TypeDef) -> Self {
        Self {
            type_def,
            fields: BTreeMap::new(),
        }
    }

    /// Creates an instance of the plain object type.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(TypeDef::object())
    }

    /// Adds or replaces a field.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_owned(), value.into());
        self
    }

    /// Returns the instance's type.
    #[must_use]
    pub const fn type_def(&self) -> &TypeDef {
        &self.type_def
    }

    /// Returns a field value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns all fields in name order.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}
