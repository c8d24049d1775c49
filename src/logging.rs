use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::host::LogSink;

#[derive(Clone, Debug, Serialize)]
pub struct StructuredLogLine {
    pub timestamp: String,
    pub level: String,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl StructuredLogLine {
    pub fn new(level: &str, event: &str, message: Option<&str>, details: Value) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level: level.to_string(),
            event: event.to_string(),
            message: message.map(|value| value.to_string()),
            details,
        }
    }
}

/// Writes one JSON log line to stderr. Serialization failures fall back to
/// the bare event name so a log call never aborts a flip.
pub fn emit_log(level: &str, event: &str, message: Option<&str>, details: Value) {
    let line = StructuredLogLine::new(level, event, message, details);
    match serde_json::to_string(&line) {
        Ok(text) => eprintln!("{text}"),
        Err(error) => eprintln!("[{level}] {event}: failed to serialize log line: {error}"),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn info(&self, message: &str) {
        emit_log("info", "plugin_log", Some(message), Value::Null);
    }
}

/// Keeps every line in memory; clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct MemoryLogSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl LogSink for MemoryLogSink {
    fn info(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}

/// Counts lines without keeping them; clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct CountingLogSink {
    count: Rc<Cell<usize>>,
    mirror: Option<StderrLogSink>,
}

impl CountingLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also forwards every line to stderr.
    pub fn mirrored() -> Self {
        Self {
            mirror: Some(StderrLogSink),
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl LogSink for CountingLogSink {
    fn info(&self, message: &str) {
        self.count.set(self.count.get() + 1);
        if let Some(mirror) = &self.mirror {
            mirror.info(message);
        }
    }
}
