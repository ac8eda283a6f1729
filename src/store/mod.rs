//! Visit storage collaborator.
//!
//! # Data Flow
//! ```text
//! Dispatcher
//!     → VisitStore::put(id, ts) / VisitStore::get(id)
//!     → item.rs (VisitRecord ⇄ persisted item layout)
//!     → engine (memory.rs in-process, or a managed table behind the same trait)
//! ```
//!
//! # Design Decisions
//! - Injected as `Arc<dyn VisitStore>` so handlers run against any engine
//! - One client per warm environment, shared read-only across invocations
//! - No retries or timeouts here; the platform deadline bounds every call

pub mod item;
pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;

pub use item::{AttributeValue, Item, VisitRecord};
pub use memory::MemoryStore;

/// Key-value store holding one item per visit, keyed by `id`.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Write (or overwrite) the visit `id` with timestamp `ts_ms`.
    async fn put(&self, id: &str, ts_ms: i64) -> Result<(), StoreError>;

    /// Read the visit `id`. `Ok(None)` when no item exists.
    async fn get(&self, id: &str) -> Result<Option<VisitRecord>, StoreError>;
}
