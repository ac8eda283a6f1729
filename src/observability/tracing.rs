//! Distributed trace context.
//!
//! # Responsibilities
//! - Parse the ambient trace-propagation value into trace id, parent id and
//!   sampling flag
//!
//! # Format
//! Semicolon-separated `key=value` pairs, e.g.
//! `Root=1-5f84c7a3-3c7c8c9b8d6a2f6d1e2f3a4b;Parent=53995c3f42cd8ad8;Sampled=1`.
//! The trace id is read from `Root`, falling back to `TraceId`.

use std::collections::HashMap;

use serde::Serialize;

/// Environment variable carrying the ambient trace value.
pub const TRACE_ENV_VAR: &str = "_X_AMZN_TRACE_ID";

/// Header carrying the trace value on plain HTTP requests.
pub const TRACE_HEADER: &str = "x-amzn-trace-id";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceContext {
    pub trace_id: Option<String>,
    pub parent_id: Option<String>,
    pub sampled: Option<String>,
}

impl TraceContext {
    /// Parse a trace value. Absent or malformed input yields empty fields.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let parts: HashMap<&str, &str> = raw
            .split(';')
            .filter_map(|segment| segment.trim().split_once('='))
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .collect();

        let field = |key: &str| parts.get(key).map(|v| v.to_string());

        Self {
            trace_id: field("Root").or_else(|| field("TraceId")),
            parent_id: field("Parent"),
            sampled: field("Sampled"),
        }
    }

    /// Read the ambient value from the process environment.
    pub fn from_env() -> Self {
        Self::parse(std::env::var(TRACE_ENV_VAR).ok().as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.trace_id.is_none() && self.parent_id.is_none() && self.sampled.is_none()
    }
}
