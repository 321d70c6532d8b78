//! Error types for Dont
//!
//! Provides error handling for:
//! - Deprecated calls signalled by a handler
//! - Handler registry lookups
//! - Method dispatch and lazy attribute access
//! - Deprecation plan loading

/// Main Dont error type
#[derive(Debug, thiserror::Error)]
pub enum DontError {
    /// A deprecated method was called and the handler chose to abort
    #[error("{0}")]
    Deprecation(String),

    /// No handler registered under the requested key
    #[error("Nothing registered with the key :{key}")]
    MissingHandler {
        /// The unresolved key
        key: String,
    },

    /// Method is not defined on the class or its ancestors
    #[error("undefined method `{method}' for an instance of {class}")]
    NoMethod {
        /// Display name of the receiving class
        class: String,
        /// Method that was called
        method: String,
    },

    /// Method was called with the wrong number of arguments
    #[error("wrong number of arguments for `{method}' (given {given}, expected {expected})")]
    WrongArity {
        /// Method that was called
        method: String,
        /// Number of arguments passed
        given: usize,
        /// Number of arguments required
        expected: usize,
    },

    /// Attribute store refused the key
    #[error("attribute `{key}' rejected: {reason}")]
    Attribute {
        /// Storage key
        key: String,
        /// Store-provided reason
        reason: String,
    },

    /// Deprecation plan could not be read
    #[error("invalid deprecation plan: {0}")]
    Plan(String),

    /// Error raised by a custom handler or method body
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl DontError {
    /// Create deprecation error from a rendered message
    #[inline]
    #[must_use]
    pub fn deprecation(message: impl Into<String>) -> Self {
        Self::Deprecation(message.into())
    }

    /// Create missing handler error for key
    #[inline]
    #[must_use]
    pub fn missing_handler(key: impl Into<String>) -> Self {
        Self::MissingHandler { key: key.into() }
    }

    /// Create undefined method error
    #[inline]
    #[must_use]
    pub fn no_method(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::NoMethod {
            class: class.into(),
            method: method.into(),
        }
    }

    /// Create attribute rejection error
    #[inline]
    #[must_use]
    pub fn attribute(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Attribute {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Wrap any error raised by user code
    #[inline]
    pub fn handler<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Handler(anyhow::Error::new(error))
    }

    /// Check if a deprecated call was aborted
    #[inline]
    #[must_use]
    pub fn is_deprecation(&self) -> bool {
        matches!(self, Self::Deprecation(_))
    }

    /// Check if a handler lookup failed
    #[inline]
    #[must_use]
    pub fn is_missing_handler(&self) -> bool {
        matches!(self, Self::MissingHandler { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DontError>;
