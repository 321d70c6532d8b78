//! Host object model
//!
//! A [`Class`] is an explicit, named method table with an optional parent;
//! an [`Object`] is an instance bound to a class and owning attribute
//! storage. Methods are plain callables, so deprecation wrapping is just
//! replacing a table entry with a composed callable.

use crate::descriptor::Subject;
use crate::error::{DontError, Result};
use crate::lazy::{AttributeStore, LazyAttributes, MemoryAttributes};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Dynamic argument and return value
pub type Value = serde_json::Value;

/// Method implementation
pub type Method = Arc<dyn Fn(&mut Object, &[Value]) -> Result<Value> + Send + Sync>;

/// Box a closure as a [`Method`]
#[inline]
pub fn method<F>(f: F) -> Method
where
    F: Fn(&mut Object, &[Value]) -> Result<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Named method table
pub struct Class {
    name: String,
    parent: Option<Arc<Class>>,
    methods: IndexMap<String, Method>,
    lazy: Option<Arc<dyn LazyAttributes>>,
}

impl Class {
    /// Create class with no methods
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            methods: IndexMap::new(),
            lazy: None,
        }
    }

    /// Create class without a name
    #[inline]
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new("")
    }

    /// Create subclass of `parent`
    #[must_use]
    pub fn inherit(name: impl Into<String>, parent: Arc<Class>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(name)
        }
    }

    /// Attach the lazy attribute capability of a storage framework
    #[must_use]
    pub fn with_lazy_attributes(mut self, lazy: impl LazyAttributes + 'static) -> Self {
        self.lazy = Some(Arc::new(lazy));
        self
    }

    /// Class name (empty for anonymous classes)
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent class
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    /// Define a method from a closure
    pub fn define<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut Object, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.define_method(name, method(f));
        self
    }

    /// Install `method` under `name`, returning the entry it replaced
    pub fn define_method(&mut self, name: impl Into<String>, method: Method) -> Option<Method> {
        self.methods.insert(name.into(), method)
    }

    /// Check if this class itself defines `name`
    #[inline]
    #[must_use]
    pub fn defines(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Find `name` on this class or its ancestors
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Method> {
        self.methods
            .get(name)
            .or_else(|| self.parent()?.lookup(name))
    }

    /// Check if instances respond to `name`
    #[inline]
    #[must_use]
    pub fn responds_to(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Lazy attribute capability, inherited from ancestors
    #[must_use]
    pub fn lazy_attributes(&self) -> Option<&dyn LazyAttributes> {
        self.lazy
            .as_deref()
            .or_else(|| self.parent()?.lazy_attributes())
    }

    /// Names defined on this class, in definition order
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl Subject for Class {
    fn type_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("lazy_attributes", &self.lazy.is_some())
            .finish()
    }
}

/// Instance of a [`Class`]
#[derive(Debug)]
pub struct Object {
    class: Arc<Class>,
    attributes: Box<dyn AttributeStore>,
}

impl Object {
    /// Create instance backed by in-memory attributes
    #[must_use]
    pub fn new(class: Arc<Class>) -> Self {
        Self::with_store(class, MemoryAttributes::new())
    }

    /// Create instance backed by a custom attribute store
    #[must_use]
    pub fn with_store(class: Arc<Class>, store: impl AttributeStore + 'static) -> Self {
        Self {
            class,
            attributes: Box::new(store),
        }
    }

    /// Class of this instance
    #[inline]
    #[must_use]
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// Call method `name` with `args`
    ///
    /// # Errors
    /// [`DontError::NoMethod`] if the class does not respond to `name`;
    /// otherwise whatever the method returns.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let method = self
            .class
            .lookup(name)
            .cloned()
            .ok_or_else(|| DontError::no_method(self.class.name(), name))?;
        method(self, args)
    }

    /// Read an attribute slot
    ///
    /// # Errors
    /// Propagates the store's rejection.
    #[inline]
    pub fn read_attribute(&self, key: &str) -> Result<Value> {
        self.attributes.read(key)
    }

    /// Write an attribute slot
    ///
    /// # Errors
    /// Propagates the store's rejection.
    #[inline]
    pub fn write_attribute(&mut self, key: &str, value: Value) -> Result<()> {
        self.attributes.write(key, value)
    }
}

impl Subject for Object {
    fn type_name(&self) -> &str {
        self.class.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shouter() -> Class {
        let mut class = Class::new("Shouter");
        class
            .define("shout", |_, args| {
                let msg = args.first().and_then(Value::as_str).unwrap_or_default();
                Ok(Value::from(msg.to_uppercase()))
            })
            .define("scream", |obj, args| obj.call("shout", args));
        class
    }

    #[test]
    fn call_dispatches() {
        let mut obj = Object::new(Arc::new(shouter()));
        let out = obj.call("scream", &[json!("hello")]).unwrap();
        assert_eq!(out, json!("HELLO"));
    }

    #[test]
    fn call_undefined() {
        let mut obj = Object::new(Arc::new(shouter()));
        let err = obj.call("whisper", &[]).unwrap_err();
        assert!(matches!(err, DontError::NoMethod { ref method, .. } if method == "whisper"));
        assert_eq!(
            err.to_string(),
            "undefined method `whisper' for an instance of Shouter"
        );
    }

    #[test]
    fn lookup_walks_ancestors() {
        let parent = Arc::new(shouter());
        let child = Class::inherit("LoudShouter", Arc::clone(&parent));

        assert!(Arc::ptr_eq(child.parent().unwrap(), &parent));
        assert!(parent.parent().is_none());
        assert!(!child.defines("shout"));
        assert!(child.responds_to("shout"));

        let mut obj = Object::new(Arc::new(child));
        assert_eq!(obj.call("shout", &[json!("hi")]).unwrap(), json!("HI"));
        assert_eq!(obj.type_name(), "LoudShouter");
    }

    #[test]
    fn define_replaces() {
        let mut class = shouter();
        let previous = class.define_method("shout", method(|_, _| Ok(json!("quiet"))));
        assert!(previous.is_some());

        let mut obj = Object::new(Arc::new(class));
        assert_eq!(obj.call("shout", &[json!("hi")]).unwrap(), json!("quiet"));
    }

    #[test]
    fn method_names_in_order() {
        let class = shouter();
        let names: Vec<&str> = class.method_names().collect();
        assert_eq!(names, vec!["shout", "scream"]);
    }

    #[test]
    fn lazy_attributes_inherited() {
        let record =
            Class::new("Record").with_lazy_attributes(|_: &Class, _: &str| true);
        let parent = Arc::new(record);
        let child = Class::inherit("Person", parent);
        assert!(child.lazy_attributes().is_some());
        assert!(Class::new("Plain").lazy_attributes().is_none());
    }

    #[test]
    fn attributes_roundtrip_through_object() {
        let mut obj = Object::new(Arc::new(Class::anonymous()));
        assert_eq!(obj.read_attribute("usable").unwrap(), Value::Null);
        obj.write_attribute("usable", json!(true)).unwrap();
        assert_eq!(obj.read_attribute("usable").unwrap(), json!(true));
    }
}
