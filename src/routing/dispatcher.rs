//! Invocation dispatch.
//!
//! # States
//! ```text
//! Start → MatchedRoute → HandlerExecuted → Responded
//!   └──────────┴──────────────┴──→ Error (handler failure or panic) → Responded (500)
//! ```
//!
//! # Responsibilities
//! - Derive trace and correlation context once per invocation
//! - Bind a structured logger to that context
//! - Match the route and run its handler
//! - Convert every outcome to a response; nothing escapes uncaught

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use serde_json::json;

use crate::error::{error_chain, HandlerError};
use crate::http::{HandlerResponse, HttpEvent, IncomingRequest, InvocationContext};
use crate::observability::metrics;
use crate::observability::{
    resolve_correlation_id, LogContext, LogSink, StdoutSink, StructuredLogger, TraceContext,
};
use crate::resilience::LatencyInjector;
use crate::routing::handlers::{self, elapsed_ms};
use crate::routing::router::{match_route, Route};
use crate::store::VisitStore;

const UNKNOWN_FUNCTION: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    MatchedRoute,
    HandlerExecuted,
    Error,
}

/// Routes invocations to handlers.
///
/// Built once per warm environment; holds no per-request state.
pub struct Dispatcher {
    store: Arc<dyn VisitStore>,
    injector: LatencyInjector,
    function_name: Option<String>,
    sink: Arc<dyn LogSink>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn VisitStore>, injector: LatencyInjector) -> Self {
        Self {
            store,
            injector,
            function_name: None,
            sink: Arc::new(StdoutSink),
        }
    }

    /// Function identity used when the invocation context carries none.
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Handle a raw platform event.
    pub async fn invoke(&self, event: HttpEvent, ctx: &InvocationContext) -> HandlerResponse {
        self.dispatch(IncomingRequest::from_event(event), ctx).await
    }

    pub async fn dispatch(&self, request: IncomingRequest, ctx: &InvocationContext) -> HandlerResponse {
        let start = Instant::now();
        let logger = self.bind_logger(&request, ctx);

        let route = match_route(&request.method, &request.path);
        tracing::debug!(phase = ?Phase::MatchedRoute, route = route.name(), "Route matched");

        let outcome = AssertUnwindSafe(self.run(&route, &request, &logger, start))
            .catch_unwind()
            .await;

        let response = match outcome {
            Ok(Ok(response)) => {
                tracing::debug!(phase = ?Phase::HandlerExecuted, status = response.status_code, "Handler finished");
                response
            }
            Ok(Err(err)) => {
                tracing::debug!(phase = ?Phase::Error, "Handler failed");
                logger.error("unhandled error", json!({
                    "error": err.to_string(),
                    "stack": error_chain(&err),
                    "durationMs": elapsed_ms(start),
                }));
                HandlerResponse::internal_error()
            }
            Err(panic) => {
                tracing::debug!(phase = ?Phase::Error, "Handler panicked");
                let message = panic_message(panic.as_ref());
                logger.error("unhandled error", json!({
                    "error": message,
                    "stack": [format!("panic: {}", message)],
                    "durationMs": elapsed_ms(start),
                }));
                HandlerResponse::internal_error()
            }
        };

        metrics::record_request(route.name(), response.status_code, start);
        response
    }

    async fn run(
        &self,
        route: &Route,
        request: &IncomingRequest,
        logger: &StructuredLogger,
        start: Instant,
    ) -> Result<HandlerResponse, HandlerError> {
        match route {
            Route::Health => handlers::health(logger),
            Route::CreateVisit => {
                handlers::create_visit(self.store.as_ref(), &self.injector, request, logger, start).await
            }
            Route::GetVisit { id } => {
                handlers::get_visit(self.store.as_ref(), &self.injector, id, logger, start).await
            }
            Route::NotFound => {
                logger.warn("route not found", json!({ "durationMs": elapsed_ms(start) }));
                Ok(HandlerResponse::not_found())
            }
        }
    }

    fn bind_logger(&self, request: &IncomingRequest, ctx: &InvocationContext) -> StructuredLogger {
        let trace = match ctx.trace_header.as_deref() {
            Some(raw) => TraceContext::parse(Some(raw)),
            None => TraceContext::from_env(),
        };
        let correlation_id = resolve_correlation_id(&request.headers, ctx.request_id.as_deref());

        let function = ctx
            .function_name
            .clone()
            .or_else(|| self.function_name.clone())
            .unwrap_or_else(|| UNKNOWN_FUNCTION.to_string());

        let context = LogContext {
            function,
            request_id: ctx.request_id.clone(),
            correlation_id,
            method: request.method.clone(),
            path: request.path.clone(),
            trace,
        };
        StructuredLogger::new(&context, self.sink.clone())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
