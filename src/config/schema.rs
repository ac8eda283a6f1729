//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the handler.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HandlerConfig {
    /// Store region / endpoint selector.
    pub region: Option<String>,

    /// Name of the visits table.
    pub table_name: Option<String>,

    /// Function identity used in log records when the platform gives none.
    pub function_name: Option<String>,

    /// Artificial latency per route class.
    pub latency: LatencyConfig,

    /// Local server listener (ignored under the runtime API).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Latency injection settings, one rule per route class.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LatencyConfig {
    /// Applied to `POST /visit`.
    pub post: LatencyRule,

    /// Applied to `GET /visit/{id}`.
    pub get: LatencyRule,
}

/// Probability and duration of one injected delay.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LatencyRule {
    /// Chance of delaying, in percent (0-100).
    pub pct: u32,

    /// Delay in milliseconds.
    pub ms: u64,
}

impl LatencyRule {
    pub fn new(pct: u32, ms: u64) -> Self {
        Self { pct, ms }
    }

    /// A rule with a zero percentage or duration never delays.
    pub fn is_active(&self) -> bool {
        self.pct > 0 && self.ms > 0
    }
}

/// Listener configuration for the local server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Diagnostic log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Bootstrap diagnostic toggle; `DEBUG` forces debug diagnostics.
    pub diag_log_level: Option<String>,

    /// Enable the Prometheus endpoint on the local server.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            diag_log_level: None,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// True when the bootstrap diagnostic toggle asks for debug output.
    pub fn diag_debug(&self) -> bool {
        self.diag_log_level
            .as_deref()
            .is_some_and(|level| level.eq_ignore_ascii_case("DEBUG"))
    }
}
