//! Method signature declarations.
//!
//! Signatures are stored but not enforced. Their one job at call time is to
//! say which argument position carries the dispatch value.

use crate::type_key::TypeDescriptor;

/// One argument descriptor in a method signature.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Marks the argument whose runtime type selects the implementation.
    Dispatch,
    /// An ordinary argument, optionally labelled, with its expected type.
    Arg {
        /// Optional argument label.
        label: Option<String>,
        /// Declared type; documentation only.
        expected: TypeDescriptor,
    },
}

impl Param {
    /// The dispatch sentinel.
    #[must_use]
    pub const fn dispatch() -> Self {
        Self::Dispatch
    }

    /// An unlabelled argument of the given type.
    #[must_use]
    pub fn arg(expected: impl Into<TypeDescriptor>) -> Self {
        Self::Arg {
            label: None,
            expected: expected.into(),
        }
    }

    /// A labelled argument of the given type.
    #[must_use]
    pub fn labeled(label: &str, expected: impl Into<TypeDescriptor>) -> Self {
        Self::Arg {
            label: Some(label.to_owned()),
            expected: expected.into(),
        }
    }

    /// Returns `true` for the dispatch sentinel.
    #[must_use]
    pub const fn is_dispatch(&self) -> bool {
        matches!(self, Self::Dispatch)
    }

    /// Returns the argument label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Dispatch => None,
            Self::Arg { label, .. } => label.as_deref(),
        }
    }
}

/// An ordered argument signature.
///
/// # Example
///
/// ```
/// use protean_core::{BuiltinType, Param, Signature};
///
/// let repeat = Signature::new(vec![Param::arg(BuiltinType::Number), Param::dispatch()]);
/// assert_eq!(repeat.dispatch_index(), Some(1));
/// assert_eq!(repeat.arity(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// Creates a signature from its descriptors.
    #[must_use]
    pub const fn new(params: Vec<Param>) -> Self {
        Self { params }
    }

    /// A signature whose only argument is the dispatch value.
    #[must_use]
    pub fn dispatch_only() -> Self {
        Self::new(vec![Param::Dispatch])
    }

    /// Returns the descriptors in order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Returns the number of declared arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns the position of the first dispatch sentinel.
    #[must_use]
    pub fn dispatch_index(&self) -> Option<usize> {
        self.params.iter().position(Param::is_dispatch)
    }
}

impl From<Vec<Param>> for Signature {
    fn from(params: Vec<Param>) -> Self {
        Self::new(params)
    }
}

impl FromIterator<Param> for Signature {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Method declarations, in declaration order.
///
/// Declaring a name twice keeps its original position and takes the later
/// signature.
///
/// # Example
///
/// ```
/// use protean_core::{Interface, Signature};
///
/// let interface = Interface::new()
///     .method("first", Signature::dispatch_only())
///     .method("rest", Signature::dispatch_only());
/// assert_eq!(interface.names().collect::<Vec<_>>(), ["first", "rest"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interface {
    methods: Vec<(String, Signature)>,
}

impl Interface {
    /// Creates an empty interface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, builder style.
    #[must_use]
    pub fn method(mut self, name: &str, signature: impl Into<Signature>) -> Self {
        self.insert(name, signature.into());
        self
    }

    /// Adds or replaces a declaration.
    pub fn insert(&mut self, name: &str, signature: Signature) {
        match self.methods.iter_mut().find(|(existing, _)| existing.as_str() == name) {
            Some((_, slot)) => *slot = signature,
            None => self.methods.push((name.to_owned(), signature)),
        }
    }

    /// Returns the signature declared for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.methods
            .iter()
            .find(|(existing, _)| existing.as_str() == name)
            .map(|(_, signature)| signature)
    }

    /// Returns `true` when `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over declared names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over declarations.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Signature)> {
        self.methods
            .iter()
            .map(|(name, signature)| (name.as_str(), signature))
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` when nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
