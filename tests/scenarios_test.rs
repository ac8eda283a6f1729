//! End-to-end scenarios through the dispatcher and the local server.

use std::sync::Arc;

use serde_json::{json, Value};
use visit_handler::observability::CaptureSink;
use visit_handler::resilience::LatencyInjector;
use visit_handler::store::{AttributeValue, Item};
use visit_handler::{HttpEvent, InvocationContext, MemoryStore};
use visit_sdk::{Visit, VisitClient};

mod common;

fn ctx(request_id: &str) -> InvocationContext {
    InvocationContext {
        trace_header: Some(String::new()),
        ..InvocationContext::with_request_id(request_id)
    }
}

#[tokio::test]
async fn test_health() {
    let sink = CaptureSink::new();
    let dispatcher = common::memory_dispatcher(&sink);

    let response = dispatcher.invoke(HttpEvent::new("GET", "/health"), &ctx("r1")).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json(), Some(json!({ "status": "ok" })));

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "info");
    assert_eq!(records[0]["message"], "health check");
}

#[tokio::test]
async fn test_create_then_read() {
    let sink = CaptureSink::new();
    let dispatcher = common::memory_dispatcher(&sink);

    let created = dispatcher
        .invoke(HttpEvent::new("POST", "/visit").with_body(r#"{"id":"abc"}"#), &ctx("r1"))
        .await;
    assert_eq!(created.status_code, 200);
    assert_eq!(created.body_json(), Some(json!({ "id": "abc" })));

    let fetched = dispatcher.invoke(HttpEvent::new("GET", "/visit/abc"), &ctx("r2")).await;
    assert_eq!(fetched.status_code, 200);
    let body = fetched.body_json().unwrap();
    assert_eq!(body["id"], "abc");
    assert!(body["ts"].is_i64());

    let fetched_log = sink.records().into_iter().last().unwrap();
    assert_eq!(fetched_log["message"], "visit fetched");
    assert_eq!(fetched_log["found"], true);
    assert_eq!(fetched_log["id"], "abc");
    assert!(fetched_log["durationMs"].is_u64());
}

#[tokio::test]
async fn test_create_without_body_generates_numeric_id() {
    let sink = CaptureSink::new();
    let dispatcher = common::memory_dispatcher(&sink);

    for event in [
        HttpEvent::new("POST", "/visit"),
        HttpEvent::new("POST", "/visit").with_body(""),
        HttpEvent::new("POST", "/visit").with_body("{oops"),
    ] {
        let response = dispatcher.invoke(event, &ctx("r")).await;
        assert_eq!(response.status_code, 200);
        let id = response.body_json().unwrap()["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty() && id.chars().all(|c| c.is_ascii_digit()), "id {}", id);
    }
}

#[tokio::test]
async fn test_missing_record_is_null_not_404() {
    let sink = CaptureSink::new();
    let dispatcher = common::memory_dispatcher(&sink);

    let response = dispatcher.invoke(HttpEvent::new("GET", "/visit/does-not-exist"), &ctx("r")).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "null");

    let record = &sink.records()[0];
    assert_eq!(record["found"], false);
}

#[tokio::test]
async fn test_unknown_route() {
    let sink = CaptureSink::new();
    let dispatcher = common::memory_dispatcher(&sink);

    let response = dispatcher.invoke(HttpEvent::new("GET", "/unknown/path"), &ctx("r")).await;
    assert_eq!(response.status_code, 404);
    assert_eq!(response.body, "Not Found");
    assert!(response.headers.is_empty());
    assert_eq!(sink.records()[0]["level"], "warn");
}

#[tokio::test]
async fn test_reads_are_idempotent() {
    let sink = CaptureSink::new();
    let dispatcher = common::memory_dispatcher(&sink);
    dispatcher
        .invoke(HttpEvent::new("POST", "/visit").with_body(r#"{"id":"same"}"#), &ctx("r"))
        .await;

    let first = dispatcher.invoke(HttpEvent::new("GET", "/visit/same"), &ctx("r1")).await;
    let second = dispatcher.invoke(HttpEvent::new("GET", "/visit/same"), &ctx("r2")).await;
    assert_eq!(first, second);

    let first = dispatcher.invoke(HttpEvent::new("GET", "/visit/none"), &ctx("r3")).await;
    let second = dispatcher.invoke(HttpEvent::new("GET", "/visit/none"), &ctx("r4")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_legacy_item_without_ts() {
    let store = Arc::new(MemoryStore::new("visits"));
    let mut item = Item::new();
    item.insert("id".into(), AttributeValue::S("old".into()));
    store.insert_item("old", item);

    let sink = CaptureSink::new();
    let dispatcher = common::dispatcher_with(store, LatencyInjector::disabled(), &sink);
    let response = dispatcher.invoke(HttpEvent::new("GET", "/visit/old"), &ctx("r")).await;
    assert_eq!(response.body_json(), Some(json!({ "id": "old" })));
}

#[tokio::test]
async fn test_routing_is_total() {
    let sink = CaptureSink::new();
    let dispatcher = common::memory_dispatcher(&sink);

    let methods = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "get", ""];
    let paths = ["/", "/health", "/health/", "/visit", "/visit/", "/visit/x", "/visit/x/y", "/other", ""];
    for method in methods {
        for path in paths {
            let response = dispatcher.invoke(HttpEvent::new(method, path), &ctx("r")).await;
            assert!(
                [200, 404].contains(&response.status_code),
                "{} {:?} produced {}",
                method,
                path,
                response.status_code
            );
        }
    }
}

#[tokio::test]
async fn test_local_server_round_trip() {
    let sink = CaptureSink::new();
    let (addr, shutdown) = common::start_local_server(common::memory_dispatcher(&sink)).await;
    let base = format!("http://{}", addr);
    let client = VisitClient::with_client(reqwest::Client::builder().no_proxy().build().unwrap(), &base);

    assert_eq!(client.health().await.unwrap().status, "ok");

    let id = client.create_visit(Some("from-http")).await.unwrap();
    assert_eq!(id, "from-http");

    let visit: Option<Visit> = client.get_visit("from-http").await.unwrap();
    let visit = visit.unwrap();
    assert_eq!(visit.id, "from-http");
    assert!(visit.ts.is_some());

    assert_eq!(client.get_visit("nobody").await.unwrap(), None);

    let raw = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = raw
        .get(format!("{}/unknown/path", base))
        .header("X-Correlation-Id", "corr-http")
        .header("X-Amzn-Trace-Id", "Root=1-http;Parent=p;Sampled=0")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "Not Found");

    let warn: Value = sink
        .records()
        .into_iter()
        .find(|r| r["level"] == "warn")
        .unwrap();
    assert_eq!(warn["correlationId"], "corr-http");
    assert_eq!(warn["traceId"], "1-http");
    assert_eq!(warn["sampled"], "0");
    assert!(warn["requestId"].as_str().is_some_and(|id| id.len() == 36));

    shutdown.trigger();
}
