//! Built-in deprecation handlers
//!
//! - [`exception`]: abort the call with [`DontError::Deprecation`]
//! - [`warn`]: emit a `tracing` warning, then let the call proceed
//! - [`silent`]: let the call proceed without notice
//!
//! Only `exception` is registered automatically.

use crate::error::DontError;
use crate::registry::{handler, Handler};

/// Abort every deprecated call with the descriptor's message
#[must_use]
pub fn exception() -> Handler {
    handler(|deprecation| Err(DontError::deprecation(deprecation.message())))
}

/// Log every deprecated call at `WARN` level
#[must_use]
pub fn warn() -> Handler {
    handler(|deprecation| {
        tracing::warn!(
            class = deprecation.class_name(),
            method = deprecation.old_method(),
            "{}",
            deprecation
        );
        Ok(())
    })
}

/// Ignore deprecated calls
#[must_use]
pub fn silent() -> Handler {
    handler(|_| Ok(()))
}
