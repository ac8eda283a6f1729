//! Structured logging.
//!
//! # Responsibilities
//! - Emit one JSON record per call for the current invocation
//! - Merge the invocation's base context with call-site fields
//! - Initialize the diagnostic `tracing` subscriber for the process
//!
//! # Record Shape
//! ```text
//! {"level":"info","message":"visit created","ts":"2024-01-01T00:00:00.000Z",
//!  "function":..,"requestId":..,"correlationId":..,"method":..,"path":..,
//!  "traceId":..,"parentId":..,"sampled":..,  <extra fields>}
//! ```
//! Extra fields are applied last and override base fields of the same name.

use std::io::Write;
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::observability::tracing::TraceContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Destination for serialized records. Writes must not fail the caller.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Writes records to standard output, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write_line(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", line);
    }
}

/// Keeps records in memory; cloned handles share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Captured records parsed back into JSON objects.
    pub fn records(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl LogSink for CaptureSink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
    }
}

/// Fields stamped on every record of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogContext {
    pub function: String,
    pub request_id: Option<String>,
    pub correlation_id: Option<String>,
    pub method: String,
    pub path: String,
    #[serde(flatten)]
    pub trace: TraceContext,
}

/// Logger bound to one invocation's base context.
pub struct StructuredLogger {
    base: Map<String, Value>,
    sink: Arc<dyn LogSink>,
}

impl StructuredLogger {
    pub fn new(context: &LogContext, sink: Arc<dyn LogSink>) -> Self {
        let base = match serde_json::to_value(context) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self { base, sink }
    }

    pub fn base(&self) -> &Map<String, Value> {
        &self.base
    }

    /// Write one record. `extra` is merged when it is a JSON object.
    pub fn log(&self, level: LogLevel, message: &str, extra: Value) {
        let mut record = Map::with_capacity(self.base.len() + 3);
        record.insert("level".into(), serde_json::to_value(level).unwrap_or(Value::Null));
        record.insert("message".into(), Value::String(message.to_string()));
        record.insert(
            "ts".into(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        for (key, value) in &self.base {
            record.insert(key.clone(), value.clone());
        }
        if let Value::Object(extra) = extra {
            for (key, value) in extra {
                record.insert(key, value);
            }
        }

        self.sink.write_line(&Value::Object(record).to_string());
    }

    pub fn debug(&self, message: &str, extra: Value) {
        self.log(LogLevel::Debug, message, extra);
    }

    pub fn info(&self, message: &str, extra: Value) {
        self.log(LogLevel::Info, message, extra);
    }

    pub fn warn(&self, message: &str, extra: Value) {
        self.log(LogLevel::Warn, message, extra);
    }

    pub fn error(&self, message: &str, extra: Value) {
        self.log(LogLevel::Error, message, extra);
    }
}

/// Install the process-wide diagnostic subscriber (stderr).
///
/// Debug diagnostics win when requested; otherwise `RUST_LOG`, then the
/// configured level. Returns false if a subscriber was already installed.
pub fn init_diagnostics(config: &ObservabilityConfig) -> bool {
    let filter = if config.diag_debug() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("visit_handler={},tower_http=info", config.log_level)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
