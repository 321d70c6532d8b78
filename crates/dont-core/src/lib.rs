//! Dont
//!
//! Mark methods as deprecated. Every call to a marked method is handed to a
//! pluggable handler first (raise, log, custom callback) and then runs the
//! original behaviour, unless the handler aborts the call.
//!
//! # Core Concepts
//!
//! - [`Deprecation`]: Descriptor of one deprecated call, with its message
//! - [`HandlerRegistry`]: Keyed handlers; the process-wide one always knows `exception`
//! - [`wrap`] / [`wrap_with`]: Replace a method with a notifying wrapper
//! - [`Dont`]: Handler resolved once, applied to any number of classes
//! - [`LazyAttributes`]: Capability for names served by attribute storage
//! - [`DeprecationPlan`]: Markings loaded from TOML or JSON
//!
//! # Example
//!
//! ```rust
//! use dont_core::{handler, register_handler, Class, Dont, Object};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! register_handler("log", handler(|deprecation| {
//!     eprintln!("{deprecation}");
//!     Ok(())
//! }));
//!
//! let mut shouter = Class::new("Shouter");
//! shouter.define("shout", |_, args| {
//!     Ok(json!(args[0].as_str().unwrap_or_default().to_uppercase()))
//! });
//! Dont::new("log")?.apply(&mut shouter).dont_use("shout");
//!
//! // logs "DEPRECATED: Don't use Shouter#shout. It's deprecated.", then runs
//! let mut obj = Object::new(Arc::new(shouter));
//! assert_eq!(obj.call("shout", &[json!("hello")])?, json!("HELLO"));
//! # Ok::<(), dont_core::DontError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod descriptor;
pub mod error;
pub mod handlers;
pub mod interceptor;
pub mod lazy;
pub mod mixin;
pub mod object;
pub mod plan;
pub mod registry;

// Re-exports
pub use descriptor::{Deprecation, Subject};
pub use error::{DontError, Result};
pub use interceptor::{wrap, wrap_with, Binding, BindingKind};
pub use lazy::{AttributeAccess, AttributeStore, LazyAttributes, MemoryAttributes, Schema};
pub use mixin::{DeprecationOptions, Deprecator, Dont};
pub use object::{method, Class, Method, Object, Value};
pub use plan::{DeprecatedMethod, DeprecationPlan};
pub use registry::{
    handler, register_handler, resolve_handler, Handler, HandlerRegistry, EXCEPTION,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for deprecating methods
    pub use crate::{
        handler, register_handler, Class, DeprecationOptions, Dont, DontError, Object, Value,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
