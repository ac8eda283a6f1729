//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Per invocation (computed once, then immutable):
//!     ambient trace value → tracing.rs (TraceContext)
//!     request headers     → correlation.rs (correlation id)
//!     → logging.rs (LogContext → StructuredLogger bound to the invocation)
//!
//! Per call:
//!     StructuredLogger::log(level, message, extra)
//!     → one JSON line on stdout (base context ∪ extra)
//!
//! Process diagnostics:
//!     tracing macros → tracing-subscriber (stderr)
//!     metrics.rs → counters/histograms (Prometheus on the local server)
//! ```
//!
//! # Design Decisions
//! - Extraction never fails; anomalies degrade to null fields
//! - Invocation records and process diagnostics use separate channels
//! - Metrics are cheap (atomic increments)

pub mod correlation;
pub mod logging;
pub mod metrics;
pub mod tracing;

pub use correlation::resolve_correlation_id;
pub use logging::{CaptureSink, LogContext, LogLevel, LogSink, StdoutSink, StructuredLogger};
pub use self::tracing::TraceContext;
