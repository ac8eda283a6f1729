//! Platform invocation payload and context.
//!
//! The event follows the HTTP API (payload v2) shape. Every field is optional;
//! a missing method reads as `GET` and a missing path as `/`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpEvent {
    pub request_context: Option<RequestContext>,
    pub raw_path: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<String>,
    /// Accepted for compatibility; bodies are used as-is.
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestContext {
    pub http: Option<HttpDescription>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpDescription {
    pub method: Option<String>,
}

impl HttpEvent {
    /// Convenience constructor used by the local server and tests.
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            request_context: Some(RequestContext {
                http: Some(HttpDescription { method: Some(method.to_string()) }),
            }),
            raw_path: Some(path.to_string()),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &str {
        self.request_context
            .as_ref()
            .and_then(|c| c.http.as_ref())
            .and_then(|h| h.method.as_deref())
            .unwrap_or("GET")
    }

    pub fn path(&self) -> &str {
        self.raw_path.as_deref().unwrap_or("/")
    }
}

/// Per-invocation metadata supplied by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub function_name: Option<String>,
    pub request_id: Option<String>,
    /// Ambient trace value for this invocation; the environment is
    /// consulted when absent.
    pub trace_header: Option<String>,
    /// Platform deadline, epoch milliseconds.
    pub deadline_ms: Option<u64>,
}

impl InvocationContext {
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            ..Self::default()
        }
    }
}
