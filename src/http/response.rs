//! Response construction.
//!
//! # Responsibilities
//! - Build the handler's success, not-found and internal-error responses
//! - Serialize to the platform's proxy response shape
//! - Convert to an axum response for the local server
//!
//! # Design Decisions
//! - The 500 body is always the generic message; failure detail stays in logs
//! - JSON responses carry `Content-Type: application/json`; 404 is plain text

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    pub fn json(status_code: u16, body: &Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn ok(body: &Value) -> Self {
        Self::json(200, body)
    }

    pub fn not_found() -> Self {
        Self {
            status_code: 404,
            headers: HashMap::new(),
            body: "Not Found".to_string(),
        }
    }

    pub fn internal_error() -> Self {
        Self::json(500, &json!({ "message": "Internal Server Error" }))
    }

    /// Parse the body back as JSON.
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Body::from(self.body)).into_response();

        let headers = response.headers_mut();
        if self.headers.is_empty() {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        }
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
                headers.insert(name, value);
            }
        }
        response
    }
}
