//! Deprecation descriptor
//!
//! A [`Deprecation`] describes one call to a deprecated method. It is built
//! fresh by the interceptor on every call and handed to the handler.

use std::fmt;

/// Anything a deprecated method can be called on
///
/// Only the runtime type name is used, to render the diagnostic.
pub trait Subject {
    /// Display name of the receiver's type (empty for anonymous types)
    fn type_name(&self) -> &str;
}

/// Record of a single deprecated call
#[derive(Clone, Copy)]
pub struct Deprecation<'a> {
    subject: &'a dyn Subject,
    old_method: &'a str,
    new_method: Option<&'a str>,
}

impl<'a> Deprecation<'a> {
    /// Create descriptor for a call on `subject`
    #[inline]
    #[must_use]
    pub fn new(subject: &'a dyn Subject, old_method: &'a str, new_method: Option<&'a str>) -> Self {
        Self {
            subject,
            old_method,
            new_method,
        }
    }

    /// Receiver of the deprecated call
    #[inline]
    #[must_use]
    pub fn subject(&self) -> &'a dyn Subject {
        self.subject
    }

    /// Type name of the receiver
    #[inline]
    #[must_use]
    pub fn class_name(&self) -> &'a str {
        self.subject.type_name()
    }

    /// Name of the deprecated method
    #[inline]
    #[must_use]
    pub fn old_method(&self) -> &'a str {
        self.old_method
    }

    /// Suggested replacement, as given at marking time (may be empty)
    #[inline]
    #[must_use]
    pub fn new_method(&self) -> Option<&'a str> {
        self.new_method
    }

    /// Replacement that actually changes the message
    #[inline]
    fn replacement(&self) -> Option<&'a str> {
        self.new_method.filter(|name| !name.is_empty())
    }

    /// Human-readable diagnostic
    ///
    /// `DEPRECATED: Don't use <Type>#<old>. It's deprecated[ in favor of <new>].`
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Deprecation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DEPRECATED: Don't use {}#{}. It's deprecated",
            self.class_name(),
            self.old_method
        )?;
        if let Some(new_method) = self.replacement() {
            write!(f, " in favor of {new_method}")?;
        }
        f.write_str(".")
    }
}

impl fmt::Debug for Deprecation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deprecation")
            .field("class", &self.class_name())
            .field("old_method", &self.old_method)
            .field("new_method", &self.new_method)
            .finish()
    }
}
