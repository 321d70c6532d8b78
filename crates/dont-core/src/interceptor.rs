//! Method interceptor
//!
//! [`wrap`] replaces a class's method with a callable that first hands a
//! [`Deprecation`] to a handler and then forwards to the original
//! behaviour. What "original" means is decided once, at wrap time, by
//! [`Binding::resolve`].
//!
//! Wrapping an already wrapped name wraps the wrapper: the handler then
//! fires once per layer.

use crate::descriptor::Deprecation;
use crate::error::{DontError, Result};
use crate::lazy::AttributeAccess;
use crate::object::{Class, Method, Object, Value};
use crate::registry::{resolve_handler, Handler};
use std::fmt;
use std::sync::Arc;

/// What a wrapped method forwards to
#[derive(Clone)]
pub enum Binding {
    /// Implementation found on the class or an ancestor
    Concrete(Method),
    /// Name to be served by lazily defined attribute storage
    LazyAttribute,
    /// Nothing to forward to; calls fail as undefined
    Missing,
}

/// Variant of a [`Binding`], without the captured method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// See [`Binding::Concrete`]
    Concrete,
    /// See [`Binding::LazyAttribute`]
    LazyAttribute,
    /// See [`Binding::Missing`]
    Missing,
}

impl Binding {
    /// Decide how `name` on `class` is reached
    #[must_use]
    pub fn resolve(class: &Class, name: &str) -> Self {
        if let Some(method) = class.lookup(name) {
            return Self::Concrete(Arc::clone(method));
        }
        match class.lazy_attributes() {
            Some(lazy) if lazy.provides(class, name) => Self::LazyAttribute,
            _ => Self::Missing,
        }
    }

    /// Variant of this binding
    #[inline]
    #[must_use]
    pub fn kind(&self) -> BindingKind {
        match self {
            Self::Concrete(_) => BindingKind::Concrete,
            Self::LazyAttribute => BindingKind::LazyAttribute,
            Self::Missing => BindingKind::Missing,
        }
    }

    /// Run the underlying behaviour
    ///
    /// # Errors
    /// Whatever the original method or the attribute store returns;
    /// [`DontError::NoMethod`] for [`Binding::Missing`].
    pub fn invoke(&self, object: &mut Object, name: &str, args: &[Value]) -> Result<Value> {
        match self {
            Self::Concrete(original) => original(object, args),
            Self::LazyAttribute => AttributeAccess::parse(name).perform(object, name, args),
            Self::Missing => Err(DontError::no_method(object.class().name(), name)),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.kind(), f)
    }
}

/// Deprecate `name` on `class` using the handler registered under `handler_key`
///
/// # Errors
/// [`DontError::MissingHandler`] if the key is not registered. The class is
/// left untouched in that case.
pub fn wrap(
    class: &mut Class,
    name: &str,
    handler_key: &str,
    replacement: Option<&str>,
) -> Result<BindingKind> {
    let handler = resolve_handler(handler_key)?;
    Ok(wrap_with(class, name, handler, replacement))
}

/// Deprecate `name` on `class` using an already resolved handler
pub fn wrap_with(
    class: &mut Class,
    name: &str,
    handler: Handler,
    replacement: Option<&str>,
) -> BindingKind {
    let binding = Binding::resolve(class, name);
    let kind = binding.kind();
    if kind == BindingKind::Missing {
        tracing::warn!(
            class = class.name(),
            method = name,
            "deprecated method has no implementation"
        );
    } else {
        tracing::debug!(class = class.name(), method = name, binding = ?kind, "method deprecated");
    }

    let old_method = name.to_owned();
    let new_method = replacement.map(str::to_owned);
    let wrapper = move |object: &mut Object, args: &[Value]| -> Result<Value> {
        tracing::trace!(
            class = object.class().name(),
            method = %old_method,
            "deprecated call"
        );
        let deprecation = Deprecation::new(&*object, &old_method, new_method.as_deref());
        handler(&deprecation)?;
        binding.invoke(object, &old_method, args)
    };
    class.define_method(name, Arc::new(wrapper));
    kind
}
