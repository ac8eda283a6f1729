//! Request normalization.
//!
//! # Responsibilities
//! - Lower-case header names once per request
//! - Expose case-insensitive header lookup
//! - Carry method, path and raw body to the dispatcher
//!
//! # Design Decisions
//! - The body stays an opaque string; JSON parsing happens in the handler
//!   that needs it

use std::collections::HashMap;

use crate::http::event::HttpEvent;

/// Header map keyed by lower-cased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(v) => Some(v.as_str()),
            None => self.0.get(&name.to_ascii_lowercase()).map(String::as_str),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(&name, value);
        }
        headers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    pub method: String,
    pub path: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl IncomingRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn from_event(event: HttpEvent) -> Self {
        let method = event.method().to_string();
        let path = event.path().to_string();
        Self {
            method,
            path,
            headers: event.headers.unwrap_or_default().into_iter().collect(),
            body: event.body,
        }
    }
}

impl From<HttpEvent> for IncomingRequest {
    fn from(event: HttpEvent) -> Self {
        Self::from_event(event)
    }
}
