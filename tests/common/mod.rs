//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;

use visit_handler::error::StoreError;
use visit_handler::observability::CaptureSink;
use visit_handler::resilience::LatencyInjector;
use visit_handler::{Dispatcher, LocalServer, MemoryStore, Shutdown, VisitRecord, VisitStore};

/// Store whose every call fails.
pub struct FailingStore {
    pub message: &'static str,
}

#[async_trait]
impl VisitStore for FailingStore {
    async fn put(&self, _id: &str, _ts_ms: i64) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(self.message.to_string()))
    }

    async fn get(&self, _id: &str) -> Result<Option<VisitRecord>, StoreError> {
        Err(StoreError::Unavailable(self.message.to_string()))
    }
}

/// Store that panics, standing in for an unexpected runtime failure.
pub struct PanickingStore;

#[async_trait]
impl VisitStore for PanickingStore {
    async fn put(&self, _id: &str, _ts_ms: i64) -> Result<(), StoreError> {
        panic!("store client poisoned");
    }

    async fn get(&self, _id: &str) -> Result<Option<VisitRecord>, StoreError> {
        panic!("store client poisoned");
    }
}

pub fn memory_dispatcher(sink: &CaptureSink) -> Dispatcher {
    dispatcher_with(Arc::new(MemoryStore::new("visits")), LatencyInjector::disabled(), sink)
}

pub fn dispatcher_with(store: Arc<dyn VisitStore>, injector: LatencyInjector, sink: &CaptureSink) -> Dispatcher {
    Dispatcher::new(store, injector)
        .with_function_name("crud-visit")
        .with_log_sink(Arc::new(sink.clone()))
}

/// Serve `dispatcher` on an ephemeral local port.
pub async fn start_local_server(dispatcher: Dispatcher) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();

    let server = LocalServer::new(Arc::new(dispatcher), &Default::default());
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Result posted back to the mock runtime API.
#[derive(Debug, Clone)]
pub struct Posted {
    pub request_id: String,
    pub kind: &'static str,
    pub error_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone, Default)]
pub struct MockRuntime {
    queue: Arc<Mutex<VecDeque<(String, String, Option<String>)>>>,
    posted: Arc<Mutex<Vec<Posted>>>,
}

impl MockRuntime {
    /// Queue an event: request id, raw payload, optional trace header.
    pub fn push(&self, request_id: &str, payload: &str, trace: Option<&str>) {
        self.queue.lock().unwrap().push_back((
            request_id.to_string(),
            payload.to_string(),
            trace.map(str::to_string),
        ));
    }

    pub fn posted(&self) -> Vec<Posted> {
        self.posted.lock().unwrap().clone()
    }

    /// Wait until `count` results have been posted.
    pub async fn wait_for(&self, count: usize) -> Vec<Posted> {
        for _ in 0..200 {
            let posted = self.posted();
            if posted.len() >= count {
                return posted;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("runtime API received {} results, expected {}", self.posted().len(), count);
    }
}

/// Start a stand-in for the platform runtime API. Returns its `host:port`.
pub async fn start_mock_runtime(runtime: MockRuntime) -> String {
    let app = Router::new()
        .route("/2018-06-01/runtime/invocation/next", get(next_invocation))
        .route("/2018-06-01/runtime/invocation/{id}/response", post(post_response))
        .route("/2018-06-01/runtime/invocation/{id}/error", post(post_error))
        .with_state(runtime);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr.to_string()
}

async fn next_invocation(State(runtime): State<MockRuntime>) -> Response {
    loop {
        let next = runtime.queue.lock().unwrap().pop_front();
        if let Some((request_id, payload, trace)) = next {
            let mut headers = HeaderMap::new();
            headers.insert("lambda-runtime-aws-request-id", request_id.parse().unwrap());
            headers.insert("lambda-runtime-deadline-ms", "4102444800000".parse().unwrap());
            if let Some(trace) = trace {
                headers.insert("lambda-runtime-trace-id", trace.parse().unwrap());
            }
            return (StatusCode::OK, headers, payload).into_response();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

async fn post_response(
    State(runtime): State<MockRuntime>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    runtime.posted.lock().unwrap().push(Posted {
        request_id: id,
        kind: "response",
        error_type: None,
        body,
    });
    StatusCode::ACCEPTED
}

async fn post_error(
    State(runtime): State<MockRuntime>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    let error_type = headers
        .get("lambda-runtime-function-error-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    runtime.posted.lock().unwrap().push(Posted {
        request_id: id,
        kind: "error",
        error_type,
        body,
    });
    StatusCode::ACCEPTED
}
