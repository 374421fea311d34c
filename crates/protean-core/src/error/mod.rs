//! Errors raised while defining, extending, and dispatching protocols.
//!
//! Every failure is a programmer or configuration error surfaced at the call
//! that triggers it. Attach-time errors come from [`Protocol::attach`] and
//! dispatch-time errors from the generated method callables. Nothing is
//! retried or recovered inside the crate.
//!
//! [`Protocol::attach`]: crate::Protocol::attach

use thiserror::Error;

/// Errors arising from protocol operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// An implementation was attached for a method the protocol never
    /// declared.
    #[error("protocol '{protocol}' does not declare a method named '{method}'")]
    UndeclaredMethod {
        /// Protocol name.
        protocol: String,
        /// Method name that was not declared.
        method: String,
    },

    /// The target type already implements the method.
    #[error("type {type_key} already implements '{method}' for protocol '{protocol}'")]
    DuplicateImplementation {
        /// Protocol name.
        protocol: String,
        /// Rendered type-key of the target bucket.
        type_key: String,
        /// Method name that was already implemented.
        method: String,
    },

    /// Dispatch found no implementation for the argument's type.
    #[error("protocol '{protocol}' has no implementation of '{method}' for type {type_key}")]
    NoImplementation {
        /// Protocol name.
        protocol: String,
        /// Rendered type-key of the dispatch argument.
        type_key: String,
        /// Method name that was called.
        method: String,
    },

    /// The dispatch target could not be classified into a type-key.
    #[error("protocol '{protocol}' cannot classify {target}: {reason}")]
    UnclassifiableTarget {
        /// Protocol name.
        protocol: String,
        /// Description of the offending target (argument or type).
        target: String,
        /// Why classification failed.
        reason: String,
    },

    /// A method callable was requested for a name the protocol never
    /// declared.
    #[error("protocol '{protocol}' has no method named '{method}'")]
    UnknownMethod {
        /// Protocol name.
        protocol: String,
        /// Requested method name.
        method: String,
    },

    /// A declared signature cannot be used for dispatch.
    #[error("signature of '{method}' in protocol '{protocol}' is invalid: {reason}")]
    InvalidSignature {
        /// Protocol name.
        protocol: String,
        /// Method whose signature was rejected.
        method: String,
        /// Description of the problem.
        reason: String,
    },

    /// An implementation body reported a failure of its own.
    #[error("implementation of '{method}' failed: {message}")]
    Implementation {
        /// Method whose implementation failed.
        method: String,
        /// Human-readable failure description.
        message: String,
    },
}

impl ProtocolError {
    /// Builds the error an implementation body returns when it cannot
    /// produce a result, typically because an argument has the wrong shape.
    ///
    /// # Example
    ///
    /// ```
    /// use protean_core::ProtocolError;
    ///
    /// let error = ProtocolError::implementation("first", "expected a string");
    /// assert_eq!(
    ///     error.to_string(),
    ///     "implementation of 'first' failed: expected a string"
    /// );
    /// ```
    #[must_use]
    pub fn implementation(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Implementation {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Returns the name of the protocol the error was raised by, if any.
    #[must_use]
    pub fn protocol(&self) -> Option<&str> {
        match self {
            Self::UndeclaredMethod { protocol, .. }
            | Self::DuplicateImplementation { protocol, .. }
            | Self::NoImplementation { protocol, .. }
            | Self::UnclassifiableTarget { protocol, .. }
            | Self::UnknownMethod { protocol, .. }
            | Self::InvalidSignature { protocol, .. } => Some(protocol),
            Self::Implementation { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests;
