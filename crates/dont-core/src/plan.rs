//! Declarative deprecation plans
//!
//! A [`DeprecationPlan`] lists the methods to deprecate on a class and the
//! handler key to use, so markings can live in configuration:
//!
//! ```toml
//! handler = "exception"
//!
//! [[methods]]
//! name = "firstname"
//! use = "first_name"
//! ```

use crate::error::{DontError, Result};
use crate::interceptor::BindingKind;
use crate::mixin::{DeprecationOptions, Dont};
use crate::object::Class;
use crate::registry::{self, HandlerRegistry, EXCEPTION};
use serde::{Deserialize, Serialize};

fn default_handler() -> String {
    EXCEPTION.to_owned()
}

/// Set of methods to deprecate with one handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationPlan {
    /// Registry key of the handler
    #[serde(default = "default_handler")]
    pub handler: String,

    /// Methods to deprecate, in marking order
    #[serde(default)]
    pub methods: Vec<DeprecatedMethod>,
}

/// One method entry in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecatedMethod {
    /// Method to deprecate
    pub name: String,

    /// Suggested replacement
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_instead: Option<String>,
}

impl DeprecationPlan {
    /// Parse plan from TOML
    ///
    /// # Errors
    /// [`DontError::Plan`] on malformed input.
    pub fn from_toml(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| DontError::Plan(e.to_string()))
    }

    /// Parse plan from JSON
    ///
    /// # Errors
    /// [`DontError::Plan`] on malformed input.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| DontError::Plan(e.to_string()))
    }

    /// Mark every listed method on `class` via the process-wide registry
    ///
    /// # Errors
    /// [`DontError::MissingHandler`] before any method is marked.
    pub fn apply(&self, class: &mut Class) -> Result<Vec<BindingKind>> {
        self.apply_with(registry::global(), class)
    }

    /// Mark every listed method on `class` via `registry`
    ///
    /// # Errors
    /// [`DontError::MissingHandler`] before any method is marked.
    pub fn apply_with(
        &self,
        registry: &HandlerRegistry,
        class: &mut Class,
    ) -> Result<Vec<BindingKind>> {
        let dont = Dont::from_registry(registry, &self.handler)?;
        let kinds: Vec<BindingKind> = self
            .methods
            .iter()
            .map(|entry| {
                let options = DeprecationOptions {
                    use_instead: entry.use_instead.clone(),
                };
                dont.dont_use_with(class, &entry.name, &options)
            })
            .collect();
        tracing::debug!(
            class = class.name(),
            handler = %self.handler,
            count = self.methods.len(),
            "deprecation plan applied"
        );
        Ok(kinds)
    }
}
