//! Injectable diagnostics sink
//!
//! The request layer never writes to a transport of its own. Every line goes
//! through a [`LogSink`], which the embedding application can point at a
//! forwarding function or an in-memory ring buffer. Without either, lines are
//! emitted as `tracing` events.

use crate::constants::{DEFAULT_LOG_BUFFER_CAPACITY, LOG_PREFIX};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

/// Severity of a diagnostics line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Routine progress, e.g. request start/end
    Log,
    /// Informational
    Info,
    /// Recoverable failures
    Warn,
    /// Failures worth surfacing
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Log => "log",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// A line captured by a [`LogBuffer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Severity
    pub level: LogLevel,
    /// Full line, prefix included
    pub message: String,
    /// Capture time
    pub at: DateTime<Utc>,
}

/// Bounded in-memory buffer of diagnostics lines
///
/// Once full, the oldest line is dropped for every new one. Clones share the
/// same storage.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    records: Arc<Mutex<VecDeque<LogRecord>>>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_BUFFER_CAPACITY)
    }
}

impl LogBuffer {
    /// Creates a buffer holding at most `capacity` lines (minimum one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Appends a line, evicting the oldest when full
    pub fn push(&self, level: LogLevel, message: impl Into<String>) {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(LogRecord {
            level,
            message: message.into(),
            at: Utc::now(),
        });
    }

    /// Copies the buffered lines, oldest first
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.iter().cloned().collect()
    }

    /// Removes and returns the buffered lines, oldest first
    pub fn drain(&self) -> Vec<LogRecord> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.drain(..).collect()
    }

    /// Number of buffered lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the buffer is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of lines kept
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Function receiving forwarded diagnostics lines
pub type ForwardFn = dyn Fn(LogLevel, &str) + Send + Sync;

/// Destination of the client's diagnostics
#[derive(Clone, Default)]
pub enum LogSink {
    /// Hand every line to an external function
    Forward(Arc<ForwardFn>),
    /// Keep lines in a bounded buffer
    Buffer(LogBuffer),
    /// Emit `tracing` events
    #[default]
    Tracing,
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSink::Forward(_) => f.write_str("LogSink::Forward"),
            LogSink::Buffer(buffer) => f
                .debug_struct("LogSink::Buffer")
                .field("len", &buffer.len())
                .field("capacity", &buffer.capacity())
                .finish(),
            LogSink::Tracing => f.write_str("LogSink::Tracing"),
        }
    }
}

impl LogSink {
    /// Picks the sink from what the host supplied: forwarding function first,
    /// then buffer, then `tracing`
    #[must_use]
    pub fn resolve(forward: Option<Arc<ForwardFn>>, buffer: Option<LogBuffer>) -> Self {
        match (forward, buffer) {
            (Some(forward), _) => LogSink::Forward(forward),
            (None, Some(buffer)) => LogSink::Buffer(buffer),
            (None, None) => LogSink::Tracing,
        }
    }

    /// Wraps a closure as a forwarding sink
    pub fn forward<F>(f: F) -> Self
    where
        F: Fn(LogLevel, &str) + Send + Sync + 'static,
    {
        LogSink::Forward(Arc::new(f))
    }

    /// Emits a line, prefixed with `[API]`
    pub fn emit(&self, level: LogLevel, message: &str) {
        let line = format!("{LOG_PREFIX} {message}");
        match self {
            LogSink::Forward(forward) => forward(level, &line),
            LogSink::Buffer(buffer) => buffer.push(level, line),
            LogSink::Tracing => match level {
                LogLevel::Log | LogLevel::Info => info!("{}", line),
                LogLevel::Warn => warn!("{}", line),
                LogLevel::Error => error!("{}", line),
            },
        }
    }

    /// Emits a routine line
    pub fn log(&self, message: &str) {
        self.emit(LogLevel::Log, message);
    }

    /// Emits a warning
    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, message);
    }

    /// Emits an error
    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Error, message);
    }
}
