//! Tracing layer that captures log events into a [`LogBuffer`] for display
//! inside a UI (the TUI's log pane).
//!
//! The buffer has its own mutex, separate from any shell state, so logging
//! from inside a state operation never contends with the render thread.

use std::sync::{Arc, Mutex};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::Subscriber;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::registry::LookupSpan;

/// Maximum log lines kept in a buffer.
pub const MAX_LOG_LINES: usize = 2000;
/// Trim to this many when the cap is exceeded.
pub const LOG_TRIM_TO: usize = 1200;

/// A single captured log line.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogLine {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log severity level (mirrors tracing levels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short fixed-width label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

/// A shared buffer of pending log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<LogLine>>>);

impl LogBuffer {
    /// Drain all pending log lines.
    pub fn drain(&self) -> Vec<LogLine> {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *buf)
    }

    /// Drain pending lines into `sink`, trimming it to the configured caps.
    pub fn flush_into(&self, sink: &mut Vec<LogLine>) {
        let lines = self.drain();
        if lines.is_empty() {
            return;
        }
        sink.extend(lines);
        trim(sink);
    }

    fn push(&self, line: LogLine) {
        if let Ok(mut buf) = self.0.lock() {
            buf.push(line);
            trim(&mut buf);
        }
    }
}

fn trim(lines: &mut Vec<LogLine>) {
    if lines.len() > MAX_LOG_LINES {
        let drop = lines.len() - LOG_TRIM_TO;
        lines.drain(..drop);
    }
}

/// A [`tracing_subscriber::Layer`] that records events into a [`LogBuffer`].
pub struct ShellTracingLayer {
    buffer: LogBuffer,
}

impl ShellTracingLayer {
    /// Create a layer and the [`LogBuffer`] it writes to.
    pub fn new() -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for ShellTracingLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let level = match *event.metadata().level() {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        };

        let mut message = visitor.message;
        if !visitor.fields.is_empty() {
            let extras: Vec<String> = visitor
                .fields
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            if message.is_empty() {
                message = extras.join(" ");
            } else {
                message = format!("{message} {{{}}}", extras.join(", "));
            }
        }

        self.buffer.push(LogLine {
            time: Local::now().format("%H:%M:%S").to_string(),
            level,
            message,
        });
    }
}

/// Visitor that extracts the message and extra fields from an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let raw = format!("{value:?}");
        if field.name() == "message" {
            self.message = raw;
        } else {
            self.fields.push((field.name().to_string(), raw));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}
