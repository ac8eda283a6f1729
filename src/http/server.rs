//! Local HTTP server.
//!
//! # Responsibilities
//! - Accept plain HTTP requests outside the platform
//! - Turn each request into an invocation (fresh request id, trace header
//!   as the ambient trace value)
//! - Hand it to the shared dispatcher and write back its response
//!
//! # Design Decisions
//! - Every method and path reaches the dispatcher; routing lives there
//! - One dispatcher for the process, like a warm execution environment

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::ListenerConfig;
use crate::http::request::{Headers, IncomingRequest};
use crate::http::event::InvocationContext;
use crate::observability::tracing::TRACE_HEADER;
use crate::routing::Dispatcher;

/// Largest request body the local server will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub struct LocalServer {
    router: Router,
}

impl LocalServer {
    pub fn new(dispatcher: Arc<Dispatcher>, config: &ListenerConfig) -> Self {
        Self {
            router: Self::build_router(dispatcher, config),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(dispatcher: Arc<Dispatcher>, config: &ListenerConfig) -> Router {
        Router::new()
            .fallback(invoke_handler)
            .with_state(dispatcher)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until the shutdown receiver fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Local server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Local server stopped");
        Ok(())
    }
}

async fn invoke_handler(State(dispatcher): State<Arc<Dispatcher>>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) if bytes.is_empty() => None,
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!(error = %e, "Request body could not be read");
            None
        }
    };

    let headers: Headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let ctx = InvocationContext {
        function_name: None,
        request_id: Some(Uuid::new_v4().to_string()),
        trace_header: headers.get(TRACE_HEADER).map(str::to_string),
        deadline_ms: None,
    };

    let request = IncomingRequest {
        method: parts.method.as_str().to_string(),
        path: parts.uri.path().to_string(),
        headers,
        body,
    };

    dispatcher.dispatch(request, &ctx).await.into_response()
}
