//! Startup orchestration.
//!
//! Builds the objects a warm environment reuses across invocations: the store
//! client and the dispatcher wrapping it.

use std::sync::Arc;

use crate::config::HandlerConfig;
use crate::resilience::LatencyInjector;
use crate::routing::Dispatcher;
use crate::store::{MemoryStore, VisitStore};

pub const DEFAULT_TABLE_NAME: &str = "visits";

pub fn build_store(config: &HandlerConfig) -> Arc<dyn VisitStore> {
    let table = config.table_name.as_deref().unwrap_or(DEFAULT_TABLE_NAME);
    tracing::info!(
        table = %table,
        region = config.region.as_deref().unwrap_or("default"),
        "Store client ready"
    );
    Arc::new(MemoryStore::new(table))
}

pub fn build_dispatcher(config: &HandlerConfig, store: Arc<dyn VisitStore>) -> Dispatcher {
    tracing::info!(
        post_pct = config.latency.post.pct,
        post_ms = config.latency.post.ms,
        get_pct = config.latency.get.pct,
        get_ms = config.latency.get.ms,
        "Latency injection configured"
    );

    let dispatcher = Dispatcher::new(store, LatencyInjector::new(config.latency));
    match config.function_name.as_deref() {
        Some(name) => dispatcher.with_function_name(name),
        None => dispatcher,
    }
}
