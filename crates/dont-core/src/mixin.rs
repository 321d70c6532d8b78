//! Mixin installer
//!
//! [`Dont`] is configured once with a handler key, resolving it on the spot,
//! and then marks methods on any class it is applied to.

use crate::error::Result;
use crate::handlers;
use crate::interceptor::{wrap_with, BindingKind};
use crate::object::Class;
use crate::registry::{self, Handler, HandlerRegistry, EXCEPTION};
use std::fmt;

/// Options for a single deprecation marking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprecationOptions {
    /// Method callers should use instead
    pub use_instead: Option<String>,
}

impl DeprecationOptions {
    /// Suggest `method` as the replacement
    #[inline]
    #[must_use]
    pub fn use_instead(mut self, method: impl Into<String>) -> Self {
        self.use_instead = Some(method.into());
        self
    }
}

/// Deprecation marker bound to one handler
///
/// # Example
///
/// ```rust
/// use dont_core::{Class, Dont, DeprecationOptions, Object};
/// use std::sync::Arc;
///
/// let mut person = Class::new("Person");
/// person
///     .define("firstname", |_, _| Ok("Ada".into()))
///     .define("first_name", |_, _| Ok("Ada".into()));
///
/// Dont::new("exception")?
///     .apply(&mut person)
///     .dont_use_with(
///         "firstname",
///         &DeprecationOptions::default().use_instead("first_name"),
///     );
///
/// let mut ada = Object::new(Arc::new(person));
/// assert!(ada.call("firstname", &[]).unwrap_err().is_deprecation());
/// assert_eq!(ada.call("first_name", &[])?, "Ada");
/// # Ok::<(), dont_core::DontError>(())
/// ```
#[derive(Clone)]
pub struct Dont {
    key: Option<String>,
    handler: Handler,
}

impl Dont {
    /// Configure with a key from the process-wide registry
    ///
    /// # Errors
    /// [`crate::DontError::MissingHandler`] if the key is not registered.
    pub fn new(key: &str) -> Result<Self> {
        Self::from_registry(registry::global(), key)
    }

    /// Configure with a key from `registry`
    ///
    /// # Errors
    /// [`crate::DontError::MissingHandler`] if the key is not registered.
    pub fn from_registry(registry: &HandlerRegistry, key: &str) -> Result<Self> {
        let handler = registry.resolve(key)?;
        Ok(Self {
            key: Some(key.to_owned()),
            handler,
        })
    }

    /// Configure with a handler directly, bypassing any registry
    #[inline]
    #[must_use]
    pub fn from_handler(handler: Handler) -> Self {
        Self { key: None, handler }
    }

    /// Abort deprecated calls with [`crate::DontError::Deprecation`]
    ///
    /// Uses whatever is currently registered under `exception`, which is
    /// the built-in handler unless it has been overwritten.
    ///
    /// # Errors
    /// [`crate::DontError::MissingHandler`] only if the process-wide registry
    /// lacks `exception`, which its lifecycle rules out.
    pub fn with_exception() -> Result<Self> {
        Self::new(EXCEPTION)
    }

    /// Log deprecated calls as warnings and let them proceed
    #[must_use]
    pub fn with_warn() -> Self {
        Self::from_handler(handlers::warn())
    }

    /// Registry key this marker was configured with
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Resolved handler
    #[inline]
    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Deprecate `method` on `class`
    pub fn dont_use(&self, class: &mut Class, method: &str) -> BindingKind {
        self.dont_use_with(class, method, &DeprecationOptions::default())
    }

    /// Deprecate `method` on `class`, with options
    pub fn dont_use_with(
        &self,
        class: &mut Class,
        method: &str,
        options: &DeprecationOptions,
    ) -> BindingKind {
        wrap_with(
            class,
            method,
            self.handler.clone(),
            options.use_instead.as_deref(),
        )
    }

    /// Bind this marker to `class`
    #[inline]
    pub fn apply<'c>(&self, class: &'c mut Class) -> Deprecator<'c> {
        Deprecator {
            class,
            handler: self.handler.clone(),
        }
    }
}

impl fmt::Debug for Dont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dont")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Per-class marking operation returned by [`Dont::apply`]
pub struct Deprecator<'c> {
    class: &'c mut Class,
    handler: Handler,
}

impl Deprecator<'_> {
    /// Deprecate `method`
    pub fn dont_use(&mut self, method: &str) -> &mut Self {
        self.dont_use_with(method, &DeprecationOptions::default())
    }

    /// Deprecate `method`, with options
    ///
    /// A name with no implementation and no lazy attribute behind it is still
    /// wrapped, and logged as a warning.
    pub fn dont_use_with(&mut self, method: &str, options: &DeprecationOptions) -> &mut Self {
        wrap_with(
            self.class,
            method,
            self.handler.clone(),
            options.use_instead.as_deref(),
        );
        self
    }

    /// Class being marked
    #[inline]
    #[must_use]
    pub fn class(&self) -> &Class {
        self.class
    }
}

impl fmt::Debug for Deprecator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deprecator")
            .field("class", &self.class.name())
            .finish_non_exhaustive()
    }
}
