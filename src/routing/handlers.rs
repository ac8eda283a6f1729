//! Route handlers.
//!
//! Handlers log their own success records and return errors to the
//! dispatcher, which owns the error path.

use std::time::Instant;

use serde_json::{json, Value};

use crate::error::HandlerError;
use crate::http::{HandlerResponse, IncomingRequest};
use crate::observability::StructuredLogger;
use crate::resilience::{LatencyInjector, RouteClass};
use crate::store::VisitStore;

pub fn health(logger: &StructuredLogger) -> Result<HandlerResponse, HandlerError> {
    logger.info("health check", json!({}));
    Ok(HandlerResponse::ok(&json!({ "status": "ok" })))
}

pub async fn create_visit(
    store: &dyn VisitStore,
    injector: &LatencyInjector,
    request: &IncomingRequest,
    logger: &StructuredLogger,
    start: Instant,
) -> Result<HandlerResponse, HandlerError> {
    let body = parse_body(request.body.as_deref());
    logger.debug("visit created", json!({ "body": body }));

    let id = visit_id(&body).unwrap_or_else(|| now_millis().to_string());

    injector.inject(RouteClass::Post).await;

    store.put(&id, now_millis()).await?;

    logger.info("visit created", json!({ "id": id, "durationMs": elapsed_ms(start) }));
    Ok(HandlerResponse::ok(&json!({ "id": id })))
}

pub async fn get_visit(
    store: &dyn VisitStore,
    injector: &LatencyInjector,
    id: &str,
    logger: &StructuredLogger,
    start: Instant,
) -> Result<HandlerResponse, HandlerError> {
    injector.inject(RouteClass::Get).await;

    let record = store.get(id).await?;

    logger.info("visit fetched", json!({
        "id": id,
        "found": record.is_some(),
        "durationMs": elapsed_ms(start),
    }));

    let body = match record {
        Some(record) => serde_json::to_value(&record)
            .map_err(|e| HandlerError::Internal(format!("record could not be encoded: {}", e)))?,
        None => Value::Null,
    };
    Ok(HandlerResponse::ok(&body))
}

/// Parse a request body, treating absent or malformed JSON as `{}`.
pub fn parse_body(body: Option<&str>) -> Value {
    body.filter(|b| !b.trim().is_empty())
        .and_then(|b| serde_json::from_str(b).ok())
        .unwrap_or_else(|| json!({}))
}

/// Caller-supplied id: a non-empty string or a number.
fn visit_id(body: &Value) -> Option<String> {
    match body.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
