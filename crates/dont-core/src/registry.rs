//! Handler registry
//!
//! Provides [`HandlerRegistry`] for mapping symbolic keys to deprecation
//! handlers, plus the process-wide instance used by [`crate::Dont::new`].

use crate::descriptor::Deprecation;
use crate::error::{DontError, Result};
use crate::handlers;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Notification strategy invoked on every deprecated call
///
/// Returning `Err` aborts the call; the original method does not run.
pub type Handler = Arc<dyn Fn(&Deprecation<'_>) -> Result<()> + Send + Sync>;

/// Box a closure as a [`Handler`]
#[inline]
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Deprecation<'_>) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Key under which the default handler is registered
pub const EXCEPTION: &str = "exception";

static GLOBAL: Lazy<HandlerRegistry> = Lazy::new(HandlerRegistry::with_defaults);

/// Registry of deprecation handlers by key
///
/// Keys are unique; registering an existing key replaces its handler.
/// Entries are never removed, so a key stays resolvable once registered.
/// Lookups hand out a clone of the stored `Arc`, so a resolved handler is
/// the registered one and runs without the registry lock held.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Handler>>,
}

impl HandlerRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Create registry with the built-in `exception` handler
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(EXCEPTION, handlers::exception());
        registry
    }

    /// Register a handler, returning the one it replaced
    pub fn register(&self, key: impl Into<String>, handler: Handler) -> Option<Handler> {
        let key = key.into();
        let previous = self.handlers.write().insert(key.clone(), handler);
        if previous.is_some() {
            tracing::debug!(key = %key, "deprecation handler replaced");
        } else {
            tracing::debug!(key = %key, "deprecation handler registered");
        }
        previous
    }

    /// Look up the handler registered under `key`
    ///
    /// # Errors
    /// [`DontError::MissingHandler`] if nothing is registered under `key`.
    pub fn resolve(&self, key: &str) -> Result<Handler> {
        self.handlers
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| DontError::missing_handler(key))
    }

    /// Check if key is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.handlers.read().contains_key(key)
    }

    /// List all registered keys, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.handlers.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Get number of registered handlers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Process-wide registry, initialised with the `exception` handler
#[inline]
#[must_use]
pub fn global() -> &'static HandlerRegistry {
    &GLOBAL
}

/// Register a handler in the process-wide registry
pub fn register_handler(key: impl Into<String>, handler: Handler) -> Option<Handler> {
    global().register(key, handler)
}

/// Resolve a handler from the process-wide registry
///
/// # Errors
/// [`DontError::MissingHandler`] if nothing is registered under `key`.
pub fn resolve_handler(key: &str) -> Result<Handler> {
    global().resolve(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Handler {
        handler(|_| Ok(()))
    }

    #[test]
    fn registry_new_empty() {
        let registry = HandlerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_with_defaults() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(EXCEPTION));
    }

    #[test]
    fn resolve_returns_same_handler() {
        let registry = HandlerRegistry::new();
        let h = noop();
        registry.register("log", Arc::clone(&h));

        let resolved = registry.resolve("log").unwrap();
        assert!(Arc::ptr_eq(&h, &resolved));
    }

    #[test]
    fn resolve_missing_names_key() {
        let registry = HandlerRegistry::new();
        let err = registry.resolve("deal_with_it").err().unwrap();
        assert!(err.is_missing_handler());
        assert_eq!(err.to_string(), "Nothing registered with the key :deal_with_it");
    }

    #[test]
    fn register_overwrites() {
        let registry = HandlerRegistry::new();
        let first = noop();
        let second = noop();

        assert!(registry.register("log", Arc::clone(&first)).is_none());
        let replaced = registry.register("log", Arc::clone(&second)).unwrap();

        assert!(Arc::ptr_eq(&replaced, &first));
        assert!(Arc::ptr_eq(&registry.resolve("log").unwrap(), &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn exception_can_be_overwritten() {
        let registry = HandlerRegistry::with_defaults();
        let quiet = noop();
        registry.register(EXCEPTION, Arc::clone(&quiet));
        assert!(Arc::ptr_eq(&registry.resolve(EXCEPTION).unwrap(), &quiet));
    }

    #[test]
    fn registered_keys_stay_resolvable() {
        let registry = HandlerRegistry::with_defaults();
        registry.register("warn", noop());
        registry.register("warn", noop());
        assert!(registry.resolve(EXCEPTION).is_ok());
        assert!(registry.resolve("warn").is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn registry_keys_sorted() {
        let registry = HandlerRegistry::with_defaults();
        registry.register("warn", noop());
        registry.register("airbrake", noop());
        assert_eq!(registry.keys(), vec!["airbrake", "exception", "warn"]);
    }

    #[test]
    fn global_has_exception() {
        assert!(resolve_handler(EXCEPTION).is_ok());
    }

    #[test]
    fn global_register_then_resolve() {
        let h = noop();
        register_handler("registry_unit_global", Arc::clone(&h));
        assert!(Arc::ptr_eq(&resolve_handler("registry_unit_global").unwrap(), &h));
    }
}
