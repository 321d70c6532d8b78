//! Testing utilities for Dont workspace
//!
//! Shared fixture classes, a recording handler and log capture.

#![allow(missing_docs)]

use dont_core::{handler, Class, Handler, Schema, Value};
use parking_lot::Mutex;
use serde_json::json;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// `Car` with `drive_autopilot` and `drive_manually`; driving manually
/// sets the `driven` attribute.
#[must_use]
pub fn car_class() -> Class {
    let mut class = Class::new("Car");
    class
        .define("drive_autopilot", |_, _| Ok(json!("autopilot")))
        .define("drive_manually", |obj, _| {
            obj.write_attribute("driven", json!(true))?;
            Ok(json!("manual"))
        });
    class
}

/// `Shouter` with `shout(msg)` and `scream(msg)`, which calls `shout`.
#[must_use]
pub fn shouter_class() -> Class {
    let mut class = Class::new("Shouter");
    class
        .define("shout", |_, args| {
            let msg = args.first().and_then(Value::as_str).unwrap_or_default();
            Ok(json!(msg.to_uppercase()))
        })
        .define("scream", |obj, args| obj.call("shout", args));
    class
}

/// `Item` record whose `usable` accessors come from a schema.
#[must_use]
pub fn item_record() -> Class {
    Class::new("Item").with_lazy_attributes(Schema::new(["usable", "name"]))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub class: String,
    pub old_method: String,
    pub new_method: Option<String>,
    pub message: String,
}

/// Handler that remembers every deprecation it sees
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn handler(&self) -> Handler {
        let calls = Arc::clone(&self.calls);
        handler(move |d| {
            calls.lock().push(RecordedCall {
                class: d.class_name().to_owned(),
                old_method: d.old_method().to_owned(),
                new_method: d.new_method().map(str::to_owned),
                message: d.message(),
            });
            Ok(())
        })
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` under a scoped subscriber and return what it logged
#[must_use]
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock()).into_owned();
    (result, logs)
}
