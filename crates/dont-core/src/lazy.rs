//! Lazy attribute support
//!
//! Storage frameworks often define attribute accessors (`name`, `name=`,
//! `name?`) only once their schema is loaded, after deprecations have been
//! declared. A class opts in by carrying a [`LazyAttributes`] capability;
//! wrapped calls to such names are then translated into [`AttributeStore`]
//! reads and writes at call time.

use crate::error::{DontError, Result};
use crate::object::{Class, Object, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Backing storage slots of an object
pub trait AttributeStore: fmt::Debug + Send {
    /// Read slot `key`; unset slots read as `Value::Null`
    ///
    /// # Errors
    /// Store-specific rejection of `key`.
    fn read(&self, key: &str) -> Result<Value>;

    /// Write slot `key`
    ///
    /// # Errors
    /// Store-specific rejection of `key`.
    fn write(&mut self, key: &str, value: Value) -> Result<()>;
}

/// In-memory attribute store
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryAttributes {
    values: HashMap<String, Value>,
}

impl MemoryAttributes {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at a slot without going through the trait
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MemoryAttributes {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl AttributeStore for MemoryAttributes {
    fn read(&self, key: &str) -> Result<Value> {
        Ok(self.values.get(key).cloned().unwrap_or(Value::Null))
    }

    fn write(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Capability check supplied by a lazy storage framework
///
/// Consulted only for names the class does not define when a deprecation
/// is installed.
pub trait LazyAttributes: Send + Sync {
    /// Whether `method` will be served by attribute storage on `class`
    fn provides(&self, class: &Class, method: &str) -> bool;
}

impl<F> LazyAttributes for F
where
    F: Fn(&Class, &str) -> bool + Send + Sync,
{
    fn provides(&self, class: &Class, method: &str) -> bool {
        self(class, method)
    }
}

/// Fixed set of attribute names, like a table's columns
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Schema {
    attributes: HashSet<String>,
}

impl Schema {
    /// Create schema from attribute names
    #[must_use]
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if attribute is part of the schema
    #[inline]
    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }
}

impl LazyAttributes for Schema {
    fn provides(&self, _class: &Class, method: &str) -> bool {
        self.contains(AttributeAccess::parse(method).key())
    }
}

/// Storage operation implied by an accessor name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeAccess<'a> {
    /// `name=`: write the first argument
    Write(&'a str),
    /// `name?`: read
    Predicate(&'a str),
    /// `name`: read
    Read(&'a str),
}

impl<'a> AttributeAccess<'a> {
    /// Classify accessor by its trailing marker
    #[must_use]
    pub fn parse(method: &'a str) -> Self {
        if let Some(key) = method.strip_suffix('=') {
            Self::Write(key)
        } else if let Some(key) = method.strip_suffix('?') {
            Self::Predicate(key)
        } else {
            Self::Read(method)
        }
    }

    /// Storage key, with any marker stripped
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'a str {
        match *self {
            Self::Write(key) | Self::Predicate(key) | Self::Read(key) => key,
        }
    }

    /// Perform the access on `object`
    ///
    /// Writes return the written value; reads return the slot unchanged.
    ///
    /// # Errors
    /// [`DontError::WrongArity`] for a write without a value, or the
    /// store's own rejection.
    pub fn perform(self, object: &mut Object, method: &str, args: &[Value]) -> Result<Value> {
        match self {
            Self::Write(key) => {
                let value = args.first().cloned().ok_or_else(|| DontError::WrongArity {
                    method: method.to_owned(),
                    given: args.len(),
                    expected: 1,
                })?;
                object.write_attribute(key, value.clone())?;
                Ok(value)
            }
            Self::Predicate(key) | Self::Read(key) => object.read_attribute(key),
        }
    }
}
